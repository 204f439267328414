//! Common contract of the path search strategies.
//!
//! A strategy implements [`Algorithm::search`] on top of a [`SearchContext`],
//! which owns the step reporting and the backtracking set of one run. The
//! provided [`Algorithm::find_route`] validates the endpoints, sets up the
//! context and guarantees that exactly one terminal [`SearchStep`] reaches the
//! [`StepSink`], always as the last step of the run.
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

use crate::{
    constants::Weight,
    graph::{Edge, EdgeIndex, Graph, NodeIndex},
    options::OptionSet,
    path::{Path, PathStep},
    registry::AlgorithmKind,
};

pub mod astar;
pub mod beam;
pub mod branch_and_bound;
pub mod breadth_first;
pub mod british_museum;
pub mod depth_first;
pub mod depth_first_heuristic;
pub mod depth_limited;
pub mod dijkstra;
pub mod great_deluge;
pub mod heuristics;
pub mod params;

#[cfg(test)]
mod properties;

pub const MSG_PATH_FOUND: &str = "Path found";
pub const MSG_NO_PATH: &str = "No path found";
pub const MSG_CANCELLED: &str = "Search cancelled";
pub const MSG_VISITING: &str = "Visiting Node";

/// One progress or terminal report of a running search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStep {
    pub message: String,
    pub path: Path,
    pub finished: bool,
    pub found: bool,
}

impl SearchStep {
    pub fn progress(message: impl Into<String>, path: Path) -> Self {
        SearchStep {
            message: message.into(),
            path,
            finished: false,
            found: false,
        }
    }
}

/// Receives the steps of a run synchronously on the searching thread
pub trait StepSink {
    fn on_step(&mut self, step: SearchStep);
}

impl<F: FnMut(SearchStep)> StepSink for F {
    fn on_step(&mut self, step: SearchStep) {
        self(step)
    }
}

impl StepSink for Vec<SearchStep> {
    fn on_step(&mut self, step: SearchStep) {
        self.push(step);
    }
}

/// Discards every step
impl StepSink for () {
    fn on_step(&mut self, _step: SearchStep) {}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("start node {0} is not part of the graph")]
    UnknownStart(NodeIndex),
    #[error("destination node {0} is not part of the graph")]
    UnknownDestination(NodeIndex),
}

/// Cooperative cancellation flag, checked by the strategies before every
/// expansion. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node reached along one particular route. `value` is the cost of the
/// route so far, `depth` its number of edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeToken {
    pub node: NodeIndex,
    pub edge: Option<EdgeIndex>,
    pub parent: Option<TokenId>,
    pub value: Weight,
    pub depth: usize,
}

/// Append only storage of the tokens of one run. Parents always have a
/// smaller id than their children.
#[derive(Debug, Default)]
pub struct TokenArena {
    tokens: Vec<NodeToken>,
}

impl TokenArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&mut self, node: NodeIndex) -> TokenId {
        self.push(NodeToken {
            node,
            edge: None,
            parent: None,
            value: 0.0,
            depth: 0,
        })
    }

    /// Token for following `edge` out of `parent`, its value is the parent
    /// value plus the edge length.
    pub fn child(&mut self, parent: TokenId, edge_idx: EdgeIndex, edge: &Edge) -> TokenId {
        let p = self.tokens[parent.index()];
        self.push(NodeToken {
            node: edge.target,
            edge: Some(edge_idx),
            parent: Some(parent),
            value: p.value + edge.length(),
            depth: p.depth + 1,
        })
    }

    fn push(&mut self, token: NodeToken) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(token);
        id
    }

    #[inline]
    pub fn get(&self, id: TokenId) -> &NodeToken {
        &self.tokens[id.index()]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Walks the parent chain of `id` and returns it from the root on
    pub fn build_path(&self, id: TokenId) -> Path {
        let mut steps = Vec::new();
        let mut current = Some(id);
        while let Some(t) = current {
            let token = self.get(t);
            steps.push(PathStep::new(token.node, token.edge));
            current = token.parent;
        }
        steps.reverse();
        Path::new(steps)
    }
}

/// Queue or stack of pending tokens
#[derive(Debug)]
pub enum Frontier {
    Fifo(VecDeque<TokenId>),
    Lifo(Vec<TokenId>),
}

impl Frontier {
    pub fn fifo() -> Self {
        Frontier::Fifo(VecDeque::new())
    }

    pub fn lifo() -> Self {
        Frontier::Lifo(Vec::new())
    }

    pub fn push(&mut self, id: TokenId) {
        match self {
            Frontier::Fifo(q) => q.push_back(id),
            Frontier::Lifo(s) => s.push(id),
        }
    }

    pub fn pop(&mut self) -> Option<TokenId> {
        match self {
            Frontier::Fifo(q) => q.pop_front(),
            Frontier::Lifo(s) => s.pop(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Fifo(q) => q.len(),
            Frontier::Lifo(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outgoing edges of `node` leading to nodes not yet visited, in adjacency order
pub(crate) fn unvisited_children<'g>(
    g: &'g Graph,
    node: NodeIndex,
    visited: &FxHashSet<NodeIndex>,
) -> Vec<(EdgeIndex, &'g Edge)> {
    g.neighbors_outgoing(node)
        .filter(|(_, e)| !visited.contains(&e.target))
        .collect()
}

/// Uninformed traversal shared by breadth first and depth first search.
/// Keeps at most `limit` new children per expansion.
pub(crate) fn blind_search(
    ctx: &mut SearchContext<'_>,
    start: NodeIndex,
    destination: NodeIndex,
    mut frontier: Frontier,
    limit: Option<usize>,
) {
    let g = ctx.graph();
    let mut arena = TokenArena::new();
    let mut visited = FxHashSet::default();
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
            ctx.found(arena.build_path(id));
            return;
        }
        ctx.add_backtracking(node);
        ctx.progress(MSG_VISITING, arena.build_path(id));
        visited.insert(node);

        let children = unvisited_children(g, node, &visited);
        for (edge_idx, edge) in children.into_iter().take(limit.unwrap_or(usize::MAX)) {
            frontier.push(arena.child(id, edge_idx, edge));
        }
    }
}

/// State shared by all strategies during one run
pub struct SearchContext<'a> {
    graph: &'a Graph,
    sink: &'a mut dyn StepSink,
    cancel: CancelToken,
    backtracking: Vec<NodeIndex>,
    seen: FxHashSet<NodeIndex>,
    terminal: Option<bool>,
}

impl<'a> SearchContext<'a> {
    pub fn new(graph: &'a Graph, sink: &'a mut dyn StepSink, cancel: CancelToken) -> Self {
        SearchContext {
            graph,
            sink,
            cancel,
            backtracking: Vec::new(),
            seen: FxHashSet::default(),
            terminal: None,
        }
    }

    #[inline]
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Records a touched node, duplicates are ignored
    pub fn add_backtracking(&mut self, node: NodeIndex) {
        if self.seen.insert(node) {
            self.backtracking.push(node);
        }
    }

    pub fn backtracking(&self) -> &[NodeIndex] {
        &self.backtracking
    }

    pub fn is_finished(&self) -> bool {
        self.terminal.is_some()
    }

    fn emit(&mut self, mut step: SearchStep) {
        if self.terminal.is_some() {
            debug!("Dropping step after terminal report: {}", step.message);
            return;
        }
        step.path.backtracking = self.backtracking.clone();
        if step.finished {
            self.terminal = Some(step.found);
        }
        self.sink.on_step(step);
    }

    pub fn progress(&mut self, message: impl Into<String>, path: Path) {
        self.emit(SearchStep::progress(message, path));
    }

    /// Terminal report of a found path
    pub fn found(&mut self, path: Path) {
        debug!("Path found: {:?}", path.steps);
        self.emit(SearchStep {
            message: MSG_PATH_FOUND.to_string(),
            path,
            finished: true,
            found: true,
        });
    }

    /// Terminal report with an empty path
    pub fn not_found(&mut self, message: impl Into<String>) {
        self.emit(SearchStep {
            message: message.into(),
            path: Path::default(),
            finished: true,
            found: false,
        });
    }

    /// True once the run was cancelled. Reports the cancellation the first
    /// time it is noticed.
    pub fn should_stop(&mut self) -> bool {
        if self.terminal.is_some() {
            return true;
        }
        if self.cancel.is_cancelled() {
            info!("Search cancelled");
            self.not_found(MSG_CANCELLED);
            return true;
        }
        false
    }

    /// Ends the run, reporting "no path" if the strategy did not report a
    /// terminal step itself. Returns whether a path was found.
    pub fn close(&mut self) -> bool {
        if self.terminal.is_none() {
            self.not_found(MSG_NO_PATH);
        }
        self.terminal.unwrap_or(false)
    }
}

/// A configurable path search strategy
pub trait Algorithm: Send {
    fn kind(&self) -> AlgorithmKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn options(&self) -> &OptionSet;

    fn options_mut(&mut self) -> &mut OptionSet;

    /// Runs the strategy. Implementations report through `ctx` and may return
    /// without a terminal step when the search space is exhausted.
    fn search(&self, ctx: &mut SearchContext<'_>, start: NodeIndex, destination: NodeIndex);

    /// Searches a route from `start` to `destination`, returns whether one
    /// was found.
    fn find_route(
        &mut self,
        graph: &Graph,
        start: NodeIndex,
        destination: NodeIndex,
        sink: &mut dyn StepSink,
    ) -> Result<bool, SearchError> {
        self.find_route_with_cancel(graph, start, destination, sink, &CancelToken::new())
    }

    fn find_route_with_cancel(
        &mut self,
        graph: &Graph,
        start: NodeIndex,
        destination: NodeIndex,
        sink: &mut dyn StepSink,
        cancel: &CancelToken,
    ) -> Result<bool, SearchError> {
        if !graph.contains_node(start) {
            return Err(SearchError::UnknownStart(start));
        }
        if !graph.contains_node(destination) {
            return Err(SearchError::UnknownDestination(destination));
        }

        info!(
            "BEGIN {} from {} to {}",
            self.name().to_uppercase(),
            start,
            destination
        );
        let mut ctx = SearchContext::new(graph, sink, cancel.clone());
        self.search(&mut ctx, start, destination);
        let found = ctx.close();
        info!(
            "END {}: found={}, {} nodes touched",
            self.name().to_uppercase(),
            found,
            ctx.backtracking().len()
        );
        Ok(found)
    }
}
