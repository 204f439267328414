use crate::constants::{Coord, Weight};
use crate::geometry::Coordinate;
use anyhow::{bail, Context};
use log::{debug, info};
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{fmt, io, path::Path};
use thiserror::Error;

/// Default integer typer for node and edge indices
pub type DefaultIdx = u32;

/// Node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct NodeIndex(DefaultIdx);

impl NodeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn end() -> Self {
        NodeIndex(DefaultIdx::MAX)
    }
}

impl From<usize> for NodeIndex {
    fn from(ix: usize) -> Self {
        NodeIndex::new(ix)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Short version of `NodeIndex::new`
pub fn node_index(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Edge identifier.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize,
)]
pub struct EdgeIndex(DefaultIdx);

impl EdgeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        EdgeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// An invalid `EdgeIndex` used to denote absence of an edge.
    #[inline]
    pub fn end() -> Self {
        EdgeIndex(DefaultIdx::MAX)
    }
}

impl From<usize> for EdgeIndex {
    fn from(ix: usize) -> Self {
        EdgeIndex::new(ix)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeIndex),
    #[error("maximum number of elements for index type exceeded")]
    IndexOverflow,
}

/// A place on the map. Nodes without a name are plain way-points and are not
/// offered as start or destination of a route.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Node {
    pub coordinate: Coordinate,
    pub name: Option<String>,
}

impl Node {
    pub fn new(x: Coord, y: Coord) -> Self {
        Node {
            coordinate: Coordinate::new(x, y),
            name: None,
        }
    }

    pub fn named(name: impl Into<String>, x: Coord, y: Coord) -> Self {
        Node {
            coordinate: Coordinate::new(x, y),
            name: Some(name.into()),
        }
    }

    /// True if the node carries a non-empty name and can end a route
    pub fn is_end_node(&self) -> bool {
        self.name.as_deref().map_or(false, |n| !n.is_empty())
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Directed connection between two nodes. The edge runs from `source` through
/// all `way_points` in order to `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub way_points: Vec<Coordinate>,
    length: Weight,
}

impl Edge {
    pub fn new(source: NodeIndex, target: NodeIndex) -> Self {
        Edge::with_way_points(source, target, Vec::new())
    }

    pub fn with_way_points(source: NodeIndex, target: NodeIndex, way_points: Vec<Coordinate>) -> Self {
        Edge {
            source,
            target,
            way_points,
            length: 0.0,
        }
    }

    /// Length of the polyline, available once the edge was added to a graph
    #[inline]
    pub fn length(&self) -> Weight {
        self.length
    }

    /// Returns the same connection in opposite direction
    pub fn reverse(&self) -> Self {
        let mut way_points = self.way_points.clone();
        way_points.reverse();
        Edge {
            source: self.target,
            target: self.source,
            way_points,
            length: self.length,
        }
    }

    fn polyline_length(&self, from: Coordinate, to: Coordinate) -> Weight {
        let mut length = 0.0;
        let mut previous = from;
        for way_point in &self.way_points {
            length += previous.distance(way_point);
            previous = *way_point;
        }
        length + previous.distance(&to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub edges_out: Vec<Vec<EdgeIndex>>,
    width: Coord,
    height: Coord,
    edge_count: OnceCell<usize>,
    end_node_count: OnceCell<usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(num_nodes: usize, num_edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(num_nodes),
            edges: Vec::with_capacity(num_edges),
            edges_out: Vec::with_capacity(num_nodes),
            ..Default::default()
        }
    }

    /// Adds a new node to the graph. The extents grow to contain the node.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        let node_idx = NodeIndex::new(self.nodes.len());

        assert!(
            NodeIndex::end() != node_idx,
            "Maximum number of nodes for index type {} exceeded",
            std::any::type_name::<DefaultIdx>()
        );

        self.width = self.width.max(node.coordinate.x);
        self.height = self.height.max(node.coordinate.y);

        self.edges_out.push(Vec::new());
        self.nodes.push(node);
        self.end_node_count = OnceCell::new();

        node_idx
    }

    /// Add a new `edge` to the graph.
    ///
    /// **Panics** if the source or target node does not exist
    ///
    /// Returns the index of the new created edge.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeIndex {
        match self.try_add_edge(edge) {
            Ok(edge_idx) => edge_idx,
            Err(e) => panic!("Cannot add edge: {}", e),
        }
    }

    /// Like [`Graph::add_edge`] but reports dangling endpoints as error.
    pub fn try_add_edge(&mut self, mut edge: Edge) -> Result<EdgeIndex, GraphError> {
        let edge_idx = EdgeIndex::new(self.edges.len());
        if EdgeIndex::end() == edge_idx {
            return Err(GraphError::IndexOverflow);
        }
        let from = self
            .node(edge.source)
            .ok_or(GraphError::UnknownNode(edge.source))?
            .coordinate;
        let to = self
            .node(edge.target)
            .ok_or(GraphError::UnknownNode(edge.target))?
            .coordinate;

        edge.length = edge.polyline_length(from, to);

        self.edges_out[edge.source.index()].push(edge_idx);
        self.edges.push(edge);
        self.edge_count = OnceCell::new();

        Ok(edge_idx)
    }

    pub fn add_edges(&mut self, edges: Vec<Edge>) {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    /// Adds `edge` and its reverse, returns both indices
    pub fn add_bidir_edge(&mut self, edge: Edge) -> (EdgeIndex, EdgeIndex) {
        let reverse = edge.reverse();
        (self.add_edge(edge), self.add_edge(reverse))
    }

    pub fn node(&self, node_idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(node_idx.index())
    }

    pub fn edge(&self, edge_idx: EdgeIndex) -> Option<&Edge> {
        self.edges.get(edge_idx.index())
    }

    pub fn contains_node(&self, node_idx: NodeIndex) -> bool {
        node_idx.index() < self.nodes.len()
    }

    /// Coordinate of a node. **Panics** on an index from another graph.
    #[inline]
    pub fn coordinate(&self, node_idx: NodeIndex) -> Coordinate {
        self.nodes[node_idx.index()].coordinate
    }

    /// Returns an iterator over all nodes of the graph
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex::new)
    }

    /// Returns an iterator over all edges of the graph
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Outgoing edges of `node_idx` in insertion order
    pub fn neighbors_outgoing(
        &self,
        node_idx: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, &Edge)> + '_ {
        self.edges_out[node_idx.index()]
            .iter()
            .map(move |edge_idx| (*edge_idx, &self.edges[edge_idx.index()]))
    }

    /// Returns the first edge from `source` to `target`
    pub fn find_edge(&self, source: NodeIndex, target: NodeIndex) -> Option<EdgeIndex> {
        self.neighbors_outgoing(source)
            .find(|(_, edge)| edge.target == target)
            .map(|(edge_idx, _)| edge_idx)
    }

    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|node| node.name.as_deref() == Some(name))
            .map(NodeIndex::new)
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    /// Overrides the extents derived from the node coordinates
    pub fn set_extents(&mut self, width: Coord, height: Coord) {
        self.width = width;
        self.height = height;
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        *self.edge_count.get_or_init(|| self.edges.len())
    }

    /// Number of nodes that can be used as start or destination
    pub fn end_node_count(&self) -> usize {
        *self
            .end_node_count
            .get_or_init(|| self.nodes.iter().filter(|n| n.is_end_node()).count())
    }

    pub fn print_info(&self) {
        println!(
            "Graph:\t#Nodes: {} ({} named), #Edges: {}, Extents: {}x{}",
            self.nodes.len(),
            self.end_node_count(),
            self.edge_count(),
            self.width,
            self.height
        );
    }

    /// Reads a graph from two csv files.
    ///
    /// `nodes.csv`: `id,name,x,y` where an empty name marks a way-point node.
    ///
    /// `edges.csv`: `source,target,way_points,bidirectional` with node ids as
    /// endpoints and way-points written as `x:y` pairs separated by `;`.
    pub fn from_csv(path_to_nodes: &Path, path_to_edges: &Path) -> anyhow::Result<Self> {
        info!("Reading graph from {:?} and {:?}", path_to_nodes, path_to_edges);
        let nodes = csv::Reader::from_path(path_to_nodes)
            .with_context(|| format!("Could not open {:?}", path_to_nodes))?;
        let edges = csv::Reader::from_path(path_to_edges)
            .with_context(|| format!("Could not open {:?}", path_to_edges))?;
        Self::from_csv_readers(nodes, edges)
    }

    /// Same as [`Graph::from_csv`] for arbitrary readers
    pub fn from_csv_readers<N: io::Read, E: io::Read>(
        mut nodes: csv::Reader<N>,
        mut edges: csv::Reader<E>,
    ) -> anyhow::Result<Self> {
        let mut g = Graph::new();
        let mut node_index: FxHashMap<usize, NodeIndex> = FxHashMap::default();

        for result in nodes.deserialize() {
            let record: NodeRecord = result.context("Failed to parse Node")?;
            let node = Node {
                coordinate: Coordinate::new(record.x, record.y),
                name: record.name.filter(|n| !n.is_empty()),
            };
            if node_index.insert(record.id, g.add_node(node)).is_some() {
                bail!("Duplicate node id {}", record.id);
            }
        }

        for result in edges.deserialize() {
            let record: EdgeRecord = result.context("Failed to parse Edge")?;
            let lookup = |id: usize| {
                node_index
                    .get(&id)
                    .copied()
                    .with_context(|| format!("Edge references unknown node id {}", id))
            };
            let way_points = parse_way_points(record.way_points.as_deref().unwrap_or(""))?;
            let edge = Edge::with_way_points(lookup(record.source)?, lookup(record.target)?, way_points);

            if record.bidirectional.unwrap_or(false) {
                g.add_bidir_edge(edge);
            } else {
                g.try_add_edge(edge)?;
            }
        }

        debug!("Graph has {} nodes and {} edges", g.nodes.len(), g.edges.len());
        Ok(g)
    }
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: usize,
    name: Option<String>,
    x: Coord,
    y: Coord,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: usize,
    target: usize,
    way_points: Option<String>,
    bidirectional: Option<bool>,
}

/// Parses `"x:y;x:y"` into coordinates. Blank input yields no way-points.
pub fn parse_way_points(s: &str) -> anyhow::Result<Vec<Coordinate>> {
    s.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|pair| {
            let (x, y) = pair
                .split_once(':')
                .with_context(|| format!("Malformed way-point {:?}", pair))?;
            Ok(Coordinate::new(
                x.trim().parse().with_context(|| format!("Malformed x in {:?}", pair))?,
                y.trim().parse().with_context(|| format!("Malformed y in {:?}", pair))?,
            ))
        })
        .collect()
}

/// Macro to create an edge from source to target
///
/// edge!(0 , 1) Returns edge in both directions
///
/// edge!(0 => 1) Returns directed edge
///
/// edge!(0 => 1; (5, 5), (6, 6)) Returns directed edge with way-points
#[macro_export]
macro_rules! edge {
    ($source:expr => $target:expr) => {
        $crate::graph::Edge::new($source.into(), $target.into())
    };
    ($source:expr => $target:expr; $(($x:expr, $y:expr)),+ $(,)?) => {
        $crate::graph::Edge::with_way_points(
            $source.into(),
            $target.into(),
            vec![$($crate::geometry::Coordinate::new($x, $y)),+],
        )
    };
    ($source:expr , $target:expr) => {
        vec![
            $crate::graph::Edge::new($source.into(), $target.into()),
            $crate::graph::Edge::new($target.into(), $source.into()),
        ]
    };
}

/// Macro to create a node
/// node!(1, 1) way-point node, node!("A", 1, 1) named node
#[macro_export]
macro_rules! node {
    ($x:expr, $y:expr) => {
        $crate::graph::Node::new($x, $y)
    };
    ($name:expr, $x:expr, $y:expr) => {
        $crate::graph::Node::named($name, $x, $y)
    };
}
