//! The set of available search strategies.
use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

use crate::search::{
    astar::AStar, beam::Beam, branch_and_bound::BranchAndBound, breadth_first::BreadthFirst,
    british_museum::BritishMuseum, depth_first::DepthFirst,
    depth_first_heuristic::DepthFirstHeuristic, depth_limited::DepthLimited, dijkstra::Dijkstra,
    great_deluge::GreatDeluge, Algorithm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlgorithmKind {
    BreadthFirst,
    DepthFirst,
    DepthFirstHeuristic,
    AStar,
    BranchAndBound,
    GreatDeluge,
    BritishMuseum,
    DepthLimited,
    Dijkstra,
    Beam,
}

impl AlgorithmKind {
    const ALL: [AlgorithmKind; 10] = [
        AlgorithmKind::BreadthFirst,
        AlgorithmKind::DepthFirst,
        AlgorithmKind::DepthFirstHeuristic,
        AlgorithmKind::AStar,
        AlgorithmKind::BranchAndBound,
        AlgorithmKind::GreatDeluge,
        AlgorithmKind::BritishMuseum,
        AlgorithmKind::DepthLimited,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Beam,
    ];

    pub fn all() -> &'static [AlgorithmKind] {
        &Self::ALL
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::BreadthFirst => "Breadth-First Search",
            AlgorithmKind::DepthFirst => "Depth-First Search",
            AlgorithmKind::DepthFirstHeuristic => "Depth-First Search with Heuristic",
            AlgorithmKind::AStar => "A*",
            AlgorithmKind::BranchAndBound => "Branch and Bound",
            AlgorithmKind::GreatDeluge => "Great Deluge",
            AlgorithmKind::BritishMuseum => "British Museum Procedure",
            AlgorithmKind::DepthLimited => "Depth-Limited Search",
            AlgorithmKind::Dijkstra => "Dijkstra",
            AlgorithmKind::Beam => "Beam Search",
        }
    }

    /// Key of the help page describing the strategy
    pub fn help_ref(self) -> &'static str {
        match self {
            AlgorithmKind::BreadthFirst => "breadth-first",
            AlgorithmKind::DepthFirst => "depth-first",
            AlgorithmKind::DepthFirstHeuristic => "depth-first-heuristic",
            AlgorithmKind::AStar => "astar",
            AlgorithmKind::BranchAndBound => "branch-and-bound",
            AlgorithmKind::GreatDeluge => "great-deluge",
            AlgorithmKind::BritishMuseum => "british-museum",
            AlgorithmKind::DepthLimited => "depth-limited",
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::Beam => "beam",
        }
    }

    /// Creates the strategy with default options
    pub fn create(self) -> Box<dyn Algorithm> {
        match self {
            AlgorithmKind::BreadthFirst => Box::new(BreadthFirst::new()),
            AlgorithmKind::DepthFirst => Box::new(DepthFirst::new()),
            AlgorithmKind::DepthFirstHeuristic => Box::new(DepthFirstHeuristic::new()),
            AlgorithmKind::AStar => Box::new(AStar::new()),
            AlgorithmKind::BranchAndBound => Box::new(BranchAndBound::new()),
            AlgorithmKind::GreatDeluge => Box::new(GreatDeluge::new()),
            AlgorithmKind::BritishMuseum => Box::new(BritishMuseum::new()),
            AlgorithmKind::DepthLimited => Box::new(DepthLimited::new()),
            AlgorithmKind::Dijkstra => Box::new(Dijkstra::new()),
            AlgorithmKind::Beam => Box::new(Beam::new()),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown algorithm {0:?}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    /// Accepts the display name or the help key, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s) || k.help_ref().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmDescriptor {
    pub kind: AlgorithmKind,
    pub name: &'static str,
    pub help_ref: &'static str,
}

/// Lists the strategies a front end offers, in menu order
#[derive(Debug, Clone)]
pub struct AlgorithmRegistry {
    descriptors: Vec<AlgorithmDescriptor>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        AlgorithmRegistry {
            descriptors: AlgorithmKind::all()
                .iter()
                .map(|&kind| AlgorithmDescriptor {
                    kind,
                    name: kind.name(),
                    help_ref: kind.help_ref(),
                })
                .collect(),
        }
    }

    pub fn descriptors(&self) -> &[AlgorithmDescriptor] {
        &self.descriptors
    }

    pub fn create(&self, kind: AlgorithmKind) -> Box<dyn Algorithm> {
        kind.create()
    }

    pub fn create_by_name(&self, name: &str) -> Result<Box<dyn Algorithm>, UnknownAlgorithm> {
        name.parse::<AlgorithmKind>().map(AlgorithmKind::create)
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}
