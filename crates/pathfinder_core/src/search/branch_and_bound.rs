//! Branch and bound search with optional lower bound estimate and
//! dynamic programming principle.
use rustc_hash::FxHashSet;

use crate::{
    graph::NodeIndex,
    options::{OptionInfo, OptionKind, OptionSet},
    registry::AlgorithmKind,
};

use super::{
    heuristics::{cmp_score, estimate_distance},
    params::{self, *},
    Algorithm, SearchContext, TokenArena, TokenId, MSG_VISITING,
};

const HEURISTICS: &[&str] = &[
    HEURISTIC_NONE,
    HEURISTIC_LOWER_BOUND_ESTIMATE,
    HEURISTIC_DYN_PROG_PRINCIPLE,
    HEURISTIC_BOTH,
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    id: TokenId,
    node: NodeIndex,
    score: f64,
}

/// Adds `entry` unless an entry for the same node with an equal or better
/// score is already on the stack. Worse entries for the node are dropped.
fn admit(stack: &mut Vec<Entry>, entry: Entry) {
    let dominated = stack
        .iter()
        .any(|e| e.node == entry.node && e.score <= entry.score);
    if dominated {
        return;
    }
    stack.retain(|e| e.node != entry.node);
    stack.push(entry);
}

/// Keeps the first `limit` children of an expansion and moves them onto the
/// stack, which is then sorted with the best score on top. Dominance only
/// runs on children that survived the limit.
fn push_children(stack: &mut Vec<Entry>, children: Vec<Entry>, limit: usize, dominance: bool) {
    for entry in children.into_iter().take(limit) {
        if dominance {
            admit(stack, entry);
        } else {
            stack.push(entry);
        }
    }
    stack.sort_by(|a, b| cmp_score(a.score, b.score));
    stack.reverse();
}

/// Depth first search on a stack kept sorted by score, best entry on top.
///
/// The score of an entry is the length of its route, plus the straight line
/// distance to the destination when the lower bound estimate is enabled. With
/// the dynamic programming principle only the best entry per node stays on
/// the stack.
#[derive(Debug, Clone)]
pub struct BranchAndBound {
    options: OptionSet,
}

impl BranchAndBound {
    pub fn new() -> Self {
        BranchAndBound {
            options: OptionSet::new()
                .with(OptionInfo::new(
                    HEURISTIC,
                    "Sets the heuristic to use",
                    OptionKind::Choice(HEURISTICS),
                    HEURISTIC_NONE,
                ))
                .with(params::storage_limit()),
        }
    }
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for BranchAndBound {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BranchAndBound
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let g = ctx.graph();
        let heuristic = self.options.choice(HEURISTIC).unwrap_or(HEURISTIC_NONE);
        let lower_bound = matches!(heuristic, HEURISTIC_LOWER_BOUND_ESTIMATE | HEURISTIC_BOTH);
        let dominance = matches!(heuristic, HEURISTIC_DYN_PROG_PRINCIPLE | HEURISTIC_BOTH);
        let limit = params::read_storage_limit(&self.options).unwrap_or(usize::MAX);

        let mut arena = TokenArena::new();
        let mut visited = FxHashSet::default();
        let mut stack = vec![Entry {
            id: arena.root(start),
            node: start,
            score: 0.0,
        }];

        while let Some(current) = stack.pop() {
            if ctx.should_stop() {
                return;
            }
            if !visited.insert(current.node) {
                continue;
            }
            if current.node == destination {
                ctx.found(arena.build_path(current.id));
                return;
            }
            ctx.add_backtracking(current.node);
            ctx.progress(MSG_VISITING, arena.build_path(current.id));

            let mut children = Vec::new();
            for (edge_idx, edge) in g.neighbors_outgoing(current.node) {
                let id = arena.child(current.id, edge_idx, edge);
                let mut score = arena.get(id).value;
                if lower_bound {
                    score += estimate_distance(g, edge.target, destination);
                }
                children.push(Entry {
                    id,
                    node: edge.target,
                    score,
                });
            }
            push_children(&mut stack, children, limit, dominance);
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
    use proptest::{prelude::*, test_runner::TestRunner};

    fn entry(id: u32, node: usize, score: f64) -> Entry {
        Entry {
            id: TokenId(id),
            node: node.into(),
            score,
        }
    }

    #[test]
    fn dominance_keeps_best_entry_per_node() {
        let mut stack = vec![entry(0, 1, 5.0), entry(1, 2, 4.0)];

        admit(&mut stack, entry(2, 1, 3.0));
        assert_eq!(stack, vec![entry(1, 2, 4.0), entry(2, 1, 3.0)]);

        // worse and equal entries are discarded
        admit(&mut stack, entry(3, 1, 7.0));
        admit(&mut stack, entry(4, 2, 4.0));
        assert_eq!(stack.len(), 2);

        push_children(&mut stack, vec![entry(5, 1, 1.0), entry(6, 3, 9.0)], usize::MAX, true);
        assert_eq!(stack, vec![entry(6, 3, 9.0), entry(1, 2, 4.0), entry(5, 1, 1.0)]);
    }

    #[test]
    fn limit_is_applied_before_dominance() {
        let mut stack = vec![entry(0, 1, 50.0)];
        // the cheaper entry for node 1 does not survive the limit
        push_children(
            &mut stack,
            vec![entry(1, 2, 3.0), entry(2, 3, 4.0), entry(3, 1, 2.0)],
            2,
            true,
        );
        assert_eq!(stack, vec![entry(0, 1, 50.0), entry(2, 3, 4.0), entry(1, 2, 3.0)]);
    }

    #[test]
    fn at_most_one_entry_per_node_after_expansion() {
        let mut runner = TestRunner::default();
        let children = prop::collection::vec((0usize..6, 0.0..100.0f64), 0..12);
        runner
            .run(&(children.clone(), children, 1usize..8), |(before, after, limit)| {
                let mut stack = Vec::new();
                let mut id = 0;
                let mut entries = |list: Vec<(usize, f64)>| {
                    list.into_iter()
                        .map(|(node, score)| {
                            id += 1;
                            entry(id, node, score)
                        })
                        .collect::<Vec<_>>()
                };
                let before = entries(before);
                let after = entries(after);
                push_children(&mut stack, before.clone(), limit, true);
                push_children(&mut stack, after.clone(), limit, true);

                let admitted: Vec<_> = before
                    .iter()
                    .take(limit)
                    .chain(after.iter().take(limit))
                    .collect();
                for e in &stack {
                    assert_eq!(stack.iter().filter(|o| o.node == e.node).count(), 1);
                    let best = admitted
                        .iter()
                        .filter(|o| o.node == e.node)
                        .map(|o| o.score)
                        .fold(f64::INFINITY, f64::min);
                    assert_eq!(e.score, best);
                }
                // every admitted node keeps an entry
                assert!(admitted.iter().all(|a| stack.iter().any(|e| e.node == a.node)));
                Ok(())
            })
            .unwrap();
    }

    /// S -> X is a long detour, the short way to X runs through P whose
    /// children are cut by the storage limit.
    fn detour_graph() -> Graph {
        let mut g = Graph::new();
        let s = g.add_node(node!("S", 0, 0));
        let x = g.add_node(node!("X", 10, 10));
        let p = g.add_node(node!("P", 0, 10));
        let y = g.add_node(node!("Y", -10, 10));
        let z = g.add_node(node!("Z", -10, 20));
        let t = g.add_node(node!("T", 20, 10));
        g.add_edge(edge!(s => x; (10, 100)));
        g.add_edge(edge!(s => p));
        g.add_edge(edge!(p => y));
        g.add_edge(edge!(p => z));
        g.add_edge(edge!(p => x));
        g.add_edge(edge!(x => t));
        g
    }

    #[test]
    fn dominance_with_storage_limit_keeps_reachable_nodes() {
        let g = detour_graph();
        let (s, t) = (g.find_node("S").unwrap(), g.find_node("T").unwrap());
        for heuristic in HEURISTICS {
            let mut bnb = BranchAndBound::new();
            bnb.options_mut().set(HEURISTIC, *heuristic).unwrap();
            bnb.options_mut().set(STORAGE_LIMIT, 2i64).unwrap();
            let steps = run(&mut bnb, &g, s, t);
            assert_found(&g, &steps, "S -> X -> T");
        }
    }

    #[test]
    fn finds_shortest_route_with_every_heuristic() {
        let g = grid(4, 4);
        for heuristic in HEURISTICS {
            let mut bnb = BranchAndBound::new();
            bnb.options_mut().set(HEURISTIC, *heuristic).unwrap();
            let steps = run(&mut bnb, &g, 0.into(), 15.into());
            assert_single_terminal(&steps);
            assert!(steps.last().unwrap().found);
            assert_relative_eq!(final_path(&steps).length(&g), 60.0);
        }
    }

    #[test]
    fn diamond_route() {
        let g = diamond();
        let mut bnb = BranchAndBound::new();
        let steps = run(&mut bnb, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());
        assert_found(&g, &steps, "A -> B -> D");
    }

    #[test]
    fn dominance_expands_fewer_nodes() {
        let g = grid(6, 6);
        let mut plain = BranchAndBound::new();
        let mut both = BranchAndBound::new();
        both.options_mut().set(HEURISTIC, HEURISTIC_BOTH).unwrap();

        let plain_steps = run(&mut plain, &g, 0.into(), 35.into());
        let both_steps = run(&mut both, &g, 0.into(), 35.into());
        assert!(both_steps.len() <= plain_steps.len());
    }

    #[test]
    fn isolated_destination() {
        let (g, start, destination) = graph_with_isolated_node();
        let mut bnb = BranchAndBound::new();
        assert_not_found(&run(&mut bnb, &g, start, destination));
    }
}
