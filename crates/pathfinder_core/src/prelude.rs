//! Re-exports of the most commonly used items in `pathfinder_core`.
pub use crate::options::{OptionSet, OptionValue};
pub use crate::registry::{AlgorithmKind, AlgorithmRegistry};
pub use crate::runner::{PathRunner, RunHandle};
pub use crate::search::{Algorithm, CancelToken, SearchError, SearchStep, StepSink};
pub use crate::statistics::PathStatistics;

pub use crate::search;

pub use crate::graph::node_index;
pub use crate::graph::Graph;
pub use crate::path::Path;
pub use crate::util::test_graphs::diamond as generate_diamond_graph;
