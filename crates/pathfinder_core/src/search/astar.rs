//! Implementation of the A* search algorithm.
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    constants::Weight,
    graph::NodeIndex,
    options::OptionSet,
    registry::AlgorithmKind,
};

use super::{
    heuristics::{cmp_score, estimate_distance},
    Algorithm, SearchContext, TokenArena, TokenId,
};

/// Best first search on `f = g + h` with the straight line distance as `h`.
///
/// The open list is scanned linearly for the smallest `f`, ties go to the
/// entry that was opened first. A node on the open list is relaxed when a
/// strictly cheaper route to it shows up.
#[derive(Debug, Clone, Default)]
pub struct AStar {
    options: OptionSet,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for AStar {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::AStar
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
        // node -> token of the cheapest known route
        let mut best: FxHashMap<NodeIndex, TokenId> = FxHashMap::default();
        let mut open: Vec<NodeIndex> = vec![start];
        let mut closed: FxHashSet<NodeIndex> = FxHashSet::default();

        best.insert(start, arena.root(start));
        ctx.add_backtracking(start);

        let f = |arena: &TokenArena, id: TokenId| -> Weight {
            let token = arena.get(id);
            token.value + estimate_distance(g, token.node, destination)
        };

        while !open.is_empty() {
            if ctx.should_stop() {
                return;
            }

            let mut min_pos = 0;
            let mut min_f = f(&arena, best[&open[0]]);
            for (pos, node) in open.iter().enumerate().skip(1) {
                let candidate = f(&arena, best[node]);
                if cmp_score(candidate, min_f).is_lt() {
                    min_pos = pos;
                    min_f = candidate;
                }
            }
            let current = open.remove(min_pos);
            let current_id = best[&current];
            closed.insert(current);

            if current == destination {
                ctx.found(arena.build_path(current_id));
                return;
            }

            for (edge_idx, edge) in g.neighbors_outgoing(current) {
                let next = edge.target;
                if closed.contains(&next) {
                    continue;
                }
                let g_next = arena.get(current_id).value + edge.length();
                match best.get(&next) {
                    Some(&existing) => {
                        if g_next < arena.get(existing).value {
                            best.insert(next, arena.child(current_id, edge_idx, edge));
                        }
                    }
                    None => {
                        best.insert(next, arena.child(current_id, edge_idx, edge));
                        open.push(next);
                        ctx.add_backtracking(next);
                    }
                }
                ctx.progress("Step", arena.build_path(best[&next]));
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
        util::test_graphs::{diamond, graph_with_isolated_node, grid},
    };
    use approx::assert_relative_eq;

    #[test]
    fn diamond_shortest_route() {
        let g = diamond();
        let mut astar = AStar::new();
        let steps = run(&mut astar, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());
        assert_found(&g, &steps, "A -> B -> D");
        assert_relative_eq!(final_path(&steps).length(&g), 20.0);
    }

    #[test]
    fn go_around() {
        // 0 -> 1
        // |    |
        // 2 -> 3
        // the direct edge to 1 makes a long detour
        let mut g = Graph::new();
        let a = g.add_node(node!("0", 0, 0));
        let b = g.add_node(node!("1", 10, 0));
        let c = g.add_node(node!("2", 0, 10));
        let d = g.add_node(node!("3", 10, 10));
        g.add_edge(edge!(a => b; (5, 100)));
        g.add_edge(edge!(a => c));
        g.add_edge(edge!(c => d));
        g.add_edge(edge!(d => b));

        let mut astar = AStar::new();
        let steps = run(&mut astar, &g, a, b);
        assert_found(&g, &steps, "0 -> 2 -> 3 -> 1");
        assert_relative_eq!(final_path(&steps).length(&g), 30.0);
    }

    #[test]
    fn relaxes_open_entries() {
        // 0 -> 2 is opened first with a detour, 0 -> 1 -> 2 is cheaper
        let mut g = Graph::new();
        let a = g.add_node(node!("a", 0, 0));
        let b = g.add_node(node!("b", 10, 0));
        let c = g.add_node(node!("c", 20, 0));
        let d = g.add_node(node!("d", 30, 0));
        g.add_edge(edge!(a => c; (10, 50)));
        g.add_edge(edge!(a => b));
        g.add_edge(edge!(b => c));
        g.add_edge(edge!(c => d));

        let mut astar = AStar::new();
        let steps = run(&mut astar, &g, a, d);
        assert_found(&g, &steps, "a -> b -> c -> d");
    }

    #[test]
    fn grid_length_is_manhattan() {
        let g = grid(5, 5);
        let mut astar = AStar::new();
        let steps = run(&mut astar, &g, 0.into(), 24.into());
        assert_single_terminal(&steps);
        assert_relative_eq!(final_path(&steps).length(&g), 80.0);
    }

    #[test]
    fn isolated_destination() {
        let (g, start, destination) = graph_with_isolated_node();
        let mut astar = AStar::new();
        assert_not_found(&run(&mut astar, &g, start, destination));
    }
}
