use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    edge,
    graph::{Graph, NodeIndex},
    node,
};

/// Two routes from A to D, the upper one is shorter.
///
/// ```text
/// A ---- B ---- D
///  \          /
///   `-- C ---´
/// ```
pub fn diamond() -> Graph {
    let mut g = Graph::new();
    let a = g.add_node(node!("A", 0, 0));
    let b = g.add_node(node!("B", 10, 0));
    let c = g.add_node(node!("C", 10, 10));
    let d = g.add_node(node!("D", 20, 0));

    g.add_edge(edge!(a => b));
    g.add_edge(edge!(a => c));
    g.add_edge(edge!(b => d));
    g.add_edge(edge!(c => d));

    g
}

/// Connected graph plus one node without edges. Returns the graph, a start
/// node and the isolated node.
pub fn graph_with_isolated_node() -> (Graph, NodeIndex, NodeIndex) {
    let mut g = Graph::new();
    let a = g.add_node(node!("A", 0, 0));
    let b = g.add_node(node!("B", 10, 0));
    let c = g.add_node(node!("C", 10, 10));
    let d = g.add_node(node!("D", 20, 0));
    let e = g.add_node(node!("E", 30, 30));

    g.add_edges(edge!(a, b));
    g.add_edges(edge!(a, c));
    g.add_edges(edge!(b, d));
    g.add_edges(edge!(c, d));

    (g, a, e)
}

/// `n` nodes 10 apart on the x axis, neighbours connected both ways
pub fn line(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(node!(format!("L{}", i), i as i32 * 10, 0));
    }
    for i in 1..n {
        g.add_edges(edge!(i - 1, i));
    }
    g
}

/// `width` x `height` grid with spacing 10. Node `y * width + x` sits at
/// `(10x, 10y)` and is connected both ways to its right and lower neighbour.
pub fn grid(width: usize, height: usize) -> Graph {
    let mut g = Graph::with_capacity(width * height, 4 * width * height);
    for y in 0..height {
        for x in 0..width {
            g.add_node(node!(x as i32 * 10, y as i32 * 10));
        }
    }
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if x + 1 < width {
                g.add_edges(edge!(idx, idx + 1));
            }
            if y + 1 < height {
                g.add_edges(edge!(idx, idx + width));
            }
        }
    }
    g
}

pub fn complex_graph() -> Graph {
    let mut graph = Graph::new();

    let a = graph.add_node(node!("A", 60, 20));
    let b = graph.add_node(node!("B", 30, 30));
    let c = graph.add_node(node!("C", 40, 60));
    let d = graph.add_node(node!("D", 20, 70));
    let e = graph.add_node(node!("E", 30, 100));
    let f = graph.add_node(node!("F", 20, 130));
    let g = graph.add_node(node!("G", 70, 150));
    let h = graph.add_node(node!("H", 50, 120));
    let i = graph.add_node(node!("I", 70, 110));
    let j = graph.add_node(node!("J", 50, 90));
    let k = graph.add_node(node!("K", 70, 70));

    graph.add_edges(edge!(a, b)); // A <=> B
    graph.add_edges(edge!(a, c)); // A <=> C
    graph.add_edges(edge!(a, k)); // A <=> K

    graph.add_edges(edge!(b, d)); // B <=> D
    graph.add_edges(edge!(b, c)); // B <=> C

    graph.add_edges(edge!(c, d)); // C <=> D
    graph.add_edges(edge!(c, j)); // C <=> J

    graph.add_edges(edge!(d, j)); // D <=> J
    graph.add_edges(edge!(d, e)); // D <=> E

    graph.add_edges(edge!(e, j)); // E <=> J
    graph.add_edges(edge!(e, f)); // E <=> F

    graph.add_edges(edge!(f, h)); // F <=> H
    graph.add_edges(edge!(f, g)); // F <=> G

    graph.add_edges(edge!(g, h)); // G <=> H
    graph.add_edges(edge!(g, i)); // G <=> I

    graph.add_edges(edge!(h, i)); // H <=> I
    graph.add_edges(edge!(h, j)); // H <=> J

    graph.add_edges(edge!(i, j)); // I <=> J
    graph.add_edges(edge!(i, k)); // I <=> K

    graph.add_edges(edge!(j, k)); // J <=> K

    graph
}

/// Random directed graph on a 1000 x 1000 area. Every node gets a name so
/// it can serve as an endpoint.
pub fn random_graph(num_nodes: usize, num_edges: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::with_capacity(num_nodes, num_edges);
    for i in 0..num_nodes {
        g.add_node(node!(i.to_string(), rng.gen_range(0..1000), rng.gen_range(0..1000)));
    }
    if num_nodes < 2 {
        return g;
    }
    for _ in 0..num_edges {
        let source = rng.gen_range(0..num_nodes);
        let target = rng.gen_range(0..num_nodes);
        if source != target {
            g.add_edge(edge!(source => target));
        }
    }
    g
}
