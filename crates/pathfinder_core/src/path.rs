//! Routes as reported by the search algorithms.
use serde::Serialize;

use crate::{
    constants::Weight,
    graph::{EdgeIndex, Graph, NodeIndex},
};

/// One hop of a [`Path`]: the node reached and the edge used to get there.
/// The first step of a path has no incoming edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub node: NodeIndex,
    pub edge: Option<EdgeIndex>,
}

impl PathStep {
    pub fn new(node: NodeIndex, edge: Option<EdgeIndex>) -> Self {
        PathStep { node, edge }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    pub steps: Vec<PathStep>,
    /// Every node the algorithm touched up to the moment the path was
    /// reported, in first-touch order. Only used for visualization.
    pub backtracking: Vec<NodeIndex>,
}

impl Path {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Path {
            steps,
            backtracking: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<NodeIndex> {
        self.steps.first().map(|s| s.node)
    }

    pub fn destination(&self) -> Option<NodeIndex> {
        self.steps.last().map(|s| s.node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.steps.iter().map(|s| s.node)
    }

    /// Sum of the lengths of all incoming edges
    pub fn length(&self, g: &Graph) -> Weight {
        self.steps
            .iter()
            .filter_map(|s| s.edge)
            .filter_map(|e| g.edge(e))
            .map(|e| e.length())
            .fold(0.0, |acc, l| acc + l)
    }

    /// Checks that consecutive steps are joined by the recorded edges
    pub fn is_connected(&self, g: &Graph) -> bool {
        match self.steps.first() {
            None => true,
            Some(first) if first.edge.is_some() => false,
            Some(_) => self.steps.windows(2).all(|w| {
                w[1].edge
                    .and_then(|e| g.edge(e))
                    .map_or(false, |e| e.source == w[0].node && e.target == w[1].node)
            }),
        }
    }

    /// Human readable node sequence using node names where available
    pub fn describe(&self, g: &Graph) -> String {
        self.steps
            .iter()
            .map(|s| match g.node(s.node).and_then(|n| n.name.as_deref()) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => s.node.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
