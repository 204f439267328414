//! British museum procedure: exhaustive search keeping the shortest route.
use log::debug;
use rustc_hash::FxHashSet;

use crate::{
    graph::NodeIndex,
    options::{OptionInfo, OptionKind, OptionSet},
    path::Path,
    registry::AlgorithmKind,
};

use super::{
    params::*, unvisited_children, Algorithm, Frontier, SearchContext, TokenArena, MSG_VISITING,
};

pub const MSG_POSSIBLE_PATH: &str = "Possible path";

/// Traverses everything reachable from the start.
///
/// Every arrival at the destination is reported as a possible path. The
/// destination itself is never expanded, so it can be reached again along
/// other routes. The shortest possible path is reported once the traversal
/// is exhausted.
#[derive(Debug, Clone)]
pub struct BritishMuseum {
    options: OptionSet,
}

impl BritishMuseum {
    pub fn new() -> Self {
        BritishMuseum {
            options: OptionSet::new().with(OptionInfo::new(
                BASE_ALGORITHM,
                "Traversal order of the exhaustive search",
                OptionKind::Choice(&[BASE_ALGORITHM_BREADTH_FIRST, BASE_ALGORITHM_DEPTH_FIRST]),
                BASE_ALGORITHM_BREADTH_FIRST,
            )),
        }
    }
}

impl Default for BritishMuseum {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for BritishMuseum {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BritishMuseum
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let g = ctx.graph();
        let mut frontier = match self.options.choice(BASE_ALGORITHM) {
            Some(BASE_ALGORITHM_DEPTH_FIRST) => Frontier::lifo(),
            _ => Frontier::fifo(),
        };

        let mut arena = TokenArena::new();
        let mut visited = FxHashSet::default();
        let mut shortest: Option<(f64, Path)> = None;
        let mut possible = 0usize;
        frontier.push(arena.root(start));

        while let Some(id) = frontier.pop() {
            if ctx.should_stop() {
                return;
            }
            let node = arena.get(id).node;
            if visited.contains(&node) {
                continue;
            }
            if node == destination {
                let path = arena.build_path(id);
                let length = arena.get(id).value;
                ctx.progress(MSG_POSSIBLE_PATH, path.clone());
                possible += 1;
                if shortest.as_ref().map_or(true, |(best, _)| length < *best) {
                    shortest = Some((length, path));
                }
                continue;
            }
            ctx.add_backtracking(node);
            ctx.progress(MSG_VISITING, arena.build_path(id));
            visited.insert(node);

            for (edge_idx, edge) in unvisited_children(g, node, &visited) {
                frontier.push(arena.child(id, edge_idx, edge));
            }
        }

        debug!("{} possible paths collected", possible);
        if let Some((_, path)) = shortest {
            ctx.found(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        search::{test_support::*, SearchStep},
        util::test_graphs::{complex_graph, diamond, graph_with_isolated_node},
    };

    fn possible_paths(steps: &[SearchStep]) -> Vec<&Path> {
        steps
            .iter()
            .filter(|s| s.message == MSG_POSSIBLE_PATH)
            .map(|s| &s.path)
            .collect()
    }

    #[test]
    fn reports_every_arrival_and_keeps_shortest() {
        let g = diamond();
        for base in [BASE_ALGORITHM_BREADTH_FIRST, BASE_ALGORITHM_DEPTH_FIRST] {
            let mut bmp = BritishMuseum::new();
            bmp.options_mut().set(BASE_ALGORITHM, base).unwrap();
            let steps = run(&mut bmp, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());

            assert_eq!(possible_paths(&steps).len(), 2);
            assert_found(&g, &steps, "A -> B -> D");
        }
    }

    #[test]
    fn final_path_is_not_longer_than_any_possible_path() {
        let g = complex_graph();
        let mut bmp = BritishMuseum::new();
        let steps = run(&mut bmp, &g, 0.into(), g.find_node("G").unwrap());
        let best = final_path(&steps).length(&g);
        let possible = possible_paths(&steps);
        assert!(!possible.is_empty());
        assert!(possible.iter().all(|p| best <= p.length(&g)));
        assert!(steps.last().unwrap().found);
    }

    #[test]
    fn isolated_destination() {
        let (g, start, destination) = graph_with_isolated_node();
        let mut bmp = BritishMuseum::new();
        assert_not_found(&run(&mut bmp, &g, start, destination));
    }
}
