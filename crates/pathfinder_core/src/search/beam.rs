//! Beam search.
use rustc_hash::FxHashSet;

use crate::{graph::NodeIndex, options::OptionSet, registry::AlgorithmKind};

use super::{
    heuristics::Ranking, params, unvisited_children, Algorithm, Frontier, SearchContext,
    TokenArena, MSG_VISITING,
};

/// Breadth first search that enqueues only the best ranked children of every
/// expansion. The storage limit is the beam width, 0 keeps every child.
#[derive(Debug, Clone)]
pub struct Beam {
    options: OptionSet,
}

impl Beam {
    pub fn new() -> Self {
        let mut options = OptionSet::new()
            .with(params::ranking_heuristic())
            .with(params::storage_limit())
            .with(params::orientation_direction());
        params::declare_climbing(&mut options);
        Beam { options }
    }
}

impl Default for Beam {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Beam {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Beam
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let g = ctx.graph();
        let ranking = Ranking::from_options(&self.options);
        let width = params::read_storage_limit(&self.options).unwrap_or(usize::MAX);

        let mut arena = TokenArena::new();
        let mut queue = Frontier::fifo();
        let mut visited = FxHashSet::default();
        queue.push(arena.root(start));

        while let Some(id) = queue.pop() {
            if ctx.should_stop() {
                return;
            }
            let node = arena.get(id).node;
            if visited.contains(&node) {
                continue;
            }
            if node == destination {
                ctx.found(arena.build_path(id));
                return;
            }
            ctx.add_backtracking(node);
            ctx.progress(MSG_VISITING, arena.build_path(id));
            visited.insert(node);

            let ranked = ranking.rank(
                g,
                start,
                node,
                destination,
                unvisited_children(g, node, &visited),
            );
            for (edge_idx, edge) in ranked.into_iter().take(width) {
                queue.push(arena.child(id, edge_idx, edge));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        search::{params::*, test_support::*},
        util::test_graphs::{complex_graph, diamond, graph_with_isolated_node},
    };

    #[test]
    fn width_one_follows_best_child() {
        let g = diamond();
        let mut beam = Beam::new();
        beam.options_mut().set(STORAGE_LIMIT, 1i64).unwrap();
        let steps = run(&mut beam, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());
        assert_found(&g, &steps, "A -> B -> D");
    }

    #[test]
    fn width_one_visits_each_node_at_most_once() {
        let g = complex_graph();
        let destination = g.find_node("G").unwrap();
        for heuristic in RANKING_HEURISTICS {
            let mut beam = Beam::new();
            beam.options_mut().set(STORAGE_LIMIT, 1i64).unwrap();
            beam.options_mut().set(HEURISTIC, *heuristic).unwrap();
            let steps = run(&mut beam, &g, 0.into(), destination);
            assert_single_terminal(&steps);
            let backtracking = &steps.last().unwrap().path.backtracking;
            assert!(backtracking.len() <= g.nodes.len());
        }
    }

    #[test]
    fn climbing_prefers_high_grades() {
        let g = diamond();
        let mut beam = Beam::new();
        beam.options_mut().set(STORAGE_LIMIT, 1i64).unwrap();
        beam.options_mut().set(HEURISTIC, HEURISTIC_CLIMBING).unwrap();
        let steps = run(&mut beam, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());
        assert_found(&g, &steps, "A -> B -> D");
    }

    #[test]
    fn isolated_destination() {
        let (g, start, destination) = graph_with_isolated_node();
        let mut beam = Beam::new();
        assert_not_found(&run(&mut beam, &g, start, destination));
    }
}
