//! Depth limited search with optional iterative deepening.
use log::debug;
use rustc_hash::FxHashSet;

use crate::{
    constants::SEARCH_DEPTH_DEFAULT,
    graph::NodeIndex,
    options::{OptionInfo, OptionKind, OptionSet},
    registry::AlgorithmKind,
};

use super::{
    params::{self, *},
    unvisited_children, Algorithm, SearchContext, TokenArena, TokenId, MSG_VISITING,
};

const HEURISTICS: &[&str] = &[HEURISTIC_NONE, HEURISTIC_ITERATIVE_DEEPENING];

/// Depth first search that does not expand tokens at or beyond the depth
/// limit.
///
/// Tokens hitting the limit are deferred. With iterative deepening the limit
/// starts at 1 and the deferred tokens are resumed one level deeper each time
/// the stack runs empty.
#[derive(Debug, Clone)]
pub struct DepthLimited {
    options: OptionSet,
}

impl DepthLimited {
    pub fn new() -> Self {
        DepthLimited {
            options: OptionSet::new()
                .with(OptionInfo::new(
                    HEURISTIC,
                    "Sets the heuristic to use",
                    OptionKind::Choice(HEURISTICS),
                    HEURISTIC_NONE,
                ))
                .with(params::search_depth()),
        }
    }
}

impl Default for DepthLimited {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for DepthLimited {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::DepthLimited
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let g = ctx.graph();
        let deepening = self.options.choice(HEURISTIC) == Some(HEURISTIC_ITERATIVE_DEEPENING);
        let mut limit = if deepening {
            1
        } else {
            self.options
                .integer(SEARCH_DEPTH)
                .unwrap_or(SEARCH_DEPTH_DEFAULT) as usize
        };

        let mut arena = TokenArena::new();
        let mut visited = FxHashSet::default();
        let mut stack: Vec<TokenId> = vec![arena.root(start)];
        let mut deferred: Vec<TokenId> = Vec::new();

        loop {
            while let Some(id) = stack.pop() {
                if ctx.should_stop() {
                    return;
                }
                let token = *arena.get(id);
                if visited.contains(&token.node) {
                    continue;
                }
                if token.node == destination {
                    ctx.found(arena.build_path(id));
                    return;
                }
                if token.depth >= limit {
                    deferred.push(id);
                    continue;
                }
                ctx.add_backtracking(token.node);
                ctx.progress(MSG_VISITING, arena.build_path(id));
                visited.insert(token.node);

                for (edge_idx, edge) in unvisited_children(g, token.node, &visited) {
                    stack.push(arena.child(id, edge_idx, edge));
                }
            }

            if !deepening || deferred.is_empty() {
                return;
            }
            limit += 1;
            debug!("Increasing depth limit to {}", limit);
            ctx.progress(format!("Increasing depth limit to {}", limit), Default::default());
            stack.append(&mut deferred);
        }
    }
}
