//! Breadth first search.
use crate::{
    graph::NodeIndex,
    options::OptionSet,
    registry::AlgorithmKind,
};

use super::{blind_search, params, Algorithm, Frontier, SearchContext};

/// Expands nodes in the order they were discovered. Finds the route with the
/// fewest edges when the storage limit is off.
#[derive(Debug, Clone)]
pub struct BreadthFirst {
    options: OptionSet,
}

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst {
            options: OptionSet::new().with(params::storage_limit()),
        }
    }
}

impl Default for BreadthFirst {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for BreadthFirst {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BreadthFirst
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let limit = params::read_storage_limit(&self.options);
        blind_search(ctx, start, destination, Frontier::fifo(), limit);
    }
}
