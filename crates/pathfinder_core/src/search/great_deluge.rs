//! Great deluge search over the climb grade surface.
use rustc_hash::FxHashSet;

use crate::{
    constants::CLIMBING_GRADIENT_FACTOR_DEFAULT,
    graph::NodeIndex,
    options::OptionSet,
    registry::AlgorithmKind,
};

use super::{
    heuristics::{climb_grade, cmp_score, ClimbParams},
    params::{self, CLIMBING_GRADIENT_FACTOR},
    unvisited_children, Algorithm, Frontier, SearchContext, TokenArena, MSG_VISITING,
};

/// Depth first search that only admits children standing above a rising
/// water level.
///
/// The level starts at the climb grade of the start node and rises by the
/// gradient factor after every expansion. Admitted children are pushed so
/// the highest one is expanded next.
#[derive(Debug, Clone)]
pub struct GreatDeluge {
    options: OptionSet,
}

impl GreatDeluge {
    pub fn new() -> Self {
        let mut options = OptionSet::new();
        params::declare_climbing(&mut options);
        options.declare(params::gradient_factor());
        GreatDeluge { options }
    }
}

impl Default for GreatDeluge {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for GreatDeluge {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::GreatDeluge
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let g = ctx.graph();
        let climb = ClimbParams::from_options(&self.options);
        let gradient = self
            .options
            .real(CLIMBING_GRADIENT_FACTOR)
            .unwrap_or(CLIMBING_GRADIENT_FACTOR_DEFAULT);
        let mut water_level = climb_grade(g, start, destination, &climb);

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

            let mut admitted: Vec<_> = unvisited_children(g, node, &visited)
                .into_iter()
                .map(|child| (climb_grade(g, child.1.target, destination, &climb), child))
                .filter(|(grade, _)| *grade >= water_level)
                .collect();
            water_level += gradient;

            admitted.sort_by(|a, b| cmp_score(a.0, b.0));
            for (_, (edge_idx, edge)) in admitted {
                stack.push(arena.child(id, edge_idx, edge));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        search::test_support::*,
        util::test_graphs::{diamond, graph_with_isolated_node},
    };

    #[test]
    fn climbs_towards_destination() {
        let g = diamond();
        let mut deluge = GreatDeluge::new();
        let steps = run(&mut deluge, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());
        assert_found(&g, &steps, "A -> B -> D");
    }

    #[test]
    fn fast_rising_water_drowns_the_search() {
        let g = diamond();
        let mut deluge = GreatDeluge::new();
        deluge
            .options_mut()
            .set(CLIMBING_GRADIENT_FACTOR, 2.0)
            .unwrap();
        let steps = run(&mut deluge, &g, g.find_node("A").unwrap(), g.find_node("D").unwrap());
        assert_not_found(&steps);
    }

    #[test]
    fn isolated_destination() {
        let (g, start, destination) = graph_with_isolated_node();
        let mut deluge = GreatDeluge::new();
        assert_not_found(&run(&mut deluge, &g, start, destination));
    }
}
