//! Depth first search that tries the most promising child first.
use rustc_hash::FxHashSet;

use crate::{graph::NodeIndex, options::OptionSet, registry::AlgorithmKind};

use super::{
    heuristics::Ranking, params, unvisited_children, Algorithm, Frontier, SearchContext,
    TokenArena, MSG_VISITING,
};

/// Depth first search whose children are ranked by the selected heuristic.
///
/// With a storage limit of N only the N best children of every expansion are
/// kept. They are pushed worst first so the best child is expanded next.
#[derive(Debug, Clone)]
pub struct DepthFirstHeuristic {
    options: OptionSet,
}

impl DepthFirstHeuristic {
    pub fn new() -> Self {
        let mut options = OptionSet::new()
            .with(params::ranking_heuristic())
            .with(params::storage_limit())
            .with(params::orientation_direction());
        params::declare_climbing(&mut options);
        DepthFirstHeuristic { options }
    }
}

impl Default for DepthFirstHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for DepthFirstHeuristic {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::DepthFirstHeuristic
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
        let limit = params::read_storage_limit(&self.options).unwrap_or(usize::MAX);

        let mut arena = TokenArena::new();
        let mut stack = Frontier::lifo();
        let mut visited = FxHashSet::default();
        stack.push(arena.root(start));

        while let Some(id) = stack.pop() {
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

            let mut ranked = ranking.rank(
                g,
                start,
                node,
                destination,
                unvisited_children(g, node, &visited),
            );
            ranked.truncate(limit);
            for (edge_idx, edge) in ranked.into_iter().rev() {
                stack.push(arena.child(id, edge_idx, edge));
            }
        }
    }
}
