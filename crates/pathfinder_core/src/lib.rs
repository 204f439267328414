//! Crate to compute routes on small road graphs with interchangeable search
//! strategies and to observe their progress step by step.
//!
//! # Basic usage
//! ```
//! use pathfinder_core::prelude::*;
//!
//! // A -> B -> D is shorter than A -> C -> D
//! let g = generate_diamond_graph();
//! let (a, d) = (g.find_node("A").unwrap(), g.find_node("D").unwrap());
//!
//! // Pick a strategy and configure it
//! let registry = AlgorithmRegistry::new();
//! let mut alg = registry.create_by_name("Beam Search").unwrap();
//! alg.options_mut().set("Storage Limit", 1i64).unwrap();
//!
//! // Collect every step reported by the search
//! let mut steps: Vec<SearchStep> = Vec::new();
//! let found = alg.find_route(&g, a, d, &mut steps).unwrap();
//!
//! assert!(found);
//! assert_eq!(steps.last().unwrap().path.describe(&g), "A -> B -> D");
//!```
//! [`Graph`]: crate::graph::Graph
pub mod constants;
pub mod geometry;
pub mod graph;
pub mod options;
pub mod path;
pub mod prelude;
pub mod registry;
pub mod runner;
pub mod search;
pub mod statistics;
pub mod util;
