use std::{cmp::Ordering, collections::BinaryHeap};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    constants::Weight,
    graph::NodeIndex,
    options::OptionSet,
    registry::AlgorithmKind,
};

use super::{Algorithm, SearchContext, TokenArena, TokenId, MSG_VISITING};

#[derive(Debug)]
pub(crate) struct Candidate {
    pub(crate) token: TokenId,
    pub(crate) node_idx: NodeIndex,
    pub(crate) weight: Weight,
    // insertion order, breaks ties first in first out
    pub(crate) seq: u64,
}

impl Candidate {
    pub(crate) fn new(token: TokenId, node_idx: NodeIndex, weight: Weight, seq: u64) -> Self {
        Self {
            token,
            node_idx,
            weight,
            seq,
        }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Label setting shortest path search
#[derive(Debug, Clone, Default)]
pub struct Dijkstra {
    options: OptionSet,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for Dijkstra {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Dijkstra
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let g = ctx.graph();
        let mut arena = TokenArena::new();
        let mut settled: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut distances: FxHashMap<NodeIndex, Weight> = FxHashMap::default();
        let mut queue = BinaryHeap::new();
        let mut seq = 0;

        distances.insert(start, 0.0);
        queue.push(Candidate::new(arena.root(start), start, 0.0, seq));

        while let Some(Candidate {
            token, node_idx, ..
        }) = queue.pop()
        {
            if ctx.should_stop() {
                return;
            }
            if !settled.insert(node_idx) {
                continue;
            }
            if node_idx == destination {
                ctx.found(arena.build_path(token));
                return;
            }
            ctx.add_backtracking(node_idx);
            ctx.progress(MSG_VISITING, arena.build_path(token));

            for (edge_idx, edge) in g.neighbors_outgoing(node_idx) {
                if settled.contains(&edge.target) {
                    continue;
                }
                let new_distance = arena.get(token).value + edge.length();
                if new_distance < *distances.get(&edge.target).unwrap_or(&f64::INFINITY) {
                    distances.insert(edge.target, new_distance);
                    seq += 1;
                    let child = arena.child(token, edge_idx, edge);
                    queue.push(Candidate::new(child, edge.target, new_distance, seq));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        edge,
        graph::Graph,
        node,
        search::test_support::*,
        util::test_graphs::{diamond, graph_with_isolated_node},
    };
    use approx::assert_relative_eq;

    #[test]
    fn simple_path() {
        //      7 -> 8 -> 9
        //      |         |
        // 0 -> 5 -> 6 -  |
        // |         |  \ |
        // 1 -> 2 -> 3 -> 4
        let mut g = Graph::new();
        let coords = [
            (0, 10),
            (0, 20),
            (10, 20),
            (20, 20),
            (40, 20),
            (10, 10),
            (20, 10),
            (10, 0),
            (20, 0),
            (40, 0),
        ];
        for (i, (x, y)) in coords.into_iter().enumerate() {
            g.add_node(node!(i.to_string(), x, y));
        }
        g.add_edges(vec![
            edge!(0 => 1),
            edge!(1 => 2),
            edge!(2 => 3),
            edge!(3 => 4; (30, 100)),
            edge!(0 => 5),
            edge!(5 => 6),
            edge!(6 => 4; (30, 100)),
            edge!(6 => 3; (20, 100)),
            edge!(5 => 7),
            edge!(7 => 8),
            edge!(8 => 9),
            edge!(9 => 4),
        ]);

        let mut d = Dijkstra::new();
        assert_not_found(&run(&mut d, &g, 4.into(), 0.into()));

        let steps = run(&mut d, &g, 0.into(), 4.into());
        assert_found(&g, &steps, "0 -> 5 -> 7 -> 8 -> 9 -> 4");
        assert_relative_eq!(final_path(&steps).length(&g), 70.0);

        let steps = run(&mut d, &g, 1.into(), 4.into());
        assert_found(&g, &steps, "1 -> 2 -> 3 -> 4");
    }

    #[test]
    fn ties_are_first_in_first_out() {
        // both routes have length 20
        let mut g = Graph::new();
        let a = g.add_node(node!("a", 0, 0));
        let b = g.add_node(node!("b", 10, 0));
        let c = g.add_node(node!("c", 0, 10));
        let d = g.add_node(node!("d", 10, 10));
        g.add_edge(edge!(a => b));
        g.add_edge(edge!(a => c));
        g.add_edge(edge!(b => d));
        g.add_edge(edge!(c => d));

        let mut dijkstra = Dijkstra::new();
        let steps = run(&mut dijkstra, &g, a, d);
        assert_found(&g, &steps, "a -> b -> d");
    }

    #[test]
    fn diamond_route() {
        let g = diamond();
        let mut d = Dijkstra::new();
        let steps = run(&mut d, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());
        assert_found(&g, &steps, "A -> B -> D");
    }

    #[test]
    fn isolated_destination() {
        let (g, start, destination) = graph_with_isolated_node();
        let mut d = Dijkstra::new();
        assert_not_found(&run(&mut d, &g, start, destination));
    }
}
