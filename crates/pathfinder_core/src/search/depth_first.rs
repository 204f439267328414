//! Depth first search.
use crate::{graph::NodeIndex, options::OptionSet, registry::AlgorithmKind};

use super::{blind_search, params, Algorithm, Frontier, SearchContext};

/// Follows the most recently discovered edge first
#[derive(Debug, Clone)]
pub struct DepthFirst {
    options: OptionSet,
}

impl DepthFirst {
    pub fn new() -> Self {
        DepthFirst {
            options: OptionSet::new().with(params::storage_limit()),
        }
    }
}

impl Default for DepthFirst {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for DepthFirst {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::DepthFirst
    }

    fn options(&self) -> &OptionSet {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex) {
        let limit = params::read_storage_limit(&self.options);
        blind_search(ctx, start, destination, Frontier::lifo(), limit);
    }
}
