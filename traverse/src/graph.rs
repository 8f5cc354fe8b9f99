//! Property graph vertices and edges, with adjacency stored per endpoint.
//!
//! A vertex holds its own copy of every edge incident on it: an edge `a -[l]-> b`
//! appears once among the outbound edges of `a` and once among the inbound edges
//! of `b`. There is no shared edge object, and any stage that introduces an edge
//! is responsible for delivering both copies.

use std::collections::BTreeMap;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique vertex identifier.
pub type VertexId = u64;

/// Property names mapped to values.
pub type Properties = BTreeMap<String, Value>;

/// A 64-bit float with a total order, so that it may live in ordered collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Double(pub f64);

impl PartialEq for Double { fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal } }
impl Eq for Double { }
impl PartialOrd for Double { fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) } }
impl Ord for Double { fn cmp(&self, other: &Self) -> Ordering { self.0.total_cmp(&other.0) } }
impl Hash for Double { fn hash<H: Hasher>(&self, state: &mut H) { self.0.to_bits().hash(state) } }

/// A property value.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Long(i64),
    /// A floating point number.
    Double(Double),
    /// A string.
    Text(String),
}

impl From<bool> for Value { fn from(b: bool) -> Self { Value::Bool(b) } }
impl From<i64> for Value { fn from(l: i64) -> Self { Value::Long(l) } }
impl From<f64> for Value { fn from(d: f64) -> Self { Value::Double(Double(d)) } }
impl From<&str> for Value { fn from(s: &str) -> Self { Value::Text(s.to_string()) } }
impl From<String> for Value { fn from(s: String) -> Self { Value::Text(s) } }

/// The two sides of an edge, as seen from one of its endpoints.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Edges arriving at a vertex; the vertex is the edge's head.
    In,
    /// Edges leaving a vertex; the vertex is the edge's tail.
    Out,
}

impl Direction {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => f.write_str("IN"),
            Direction::Out => f.write_str("OUT"),
        }
    }
}

/// A labeled edge from `tail` to `head`.
///
/// Edges are identified by position and label only, and are never deduplicated:
/// two edges with equal fields are two edges.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The vertex the edge leaves.
    pub tail: VertexId,
    /// The vertex the edge arrives at.
    pub head: VertexId,
    /// The edge label.
    pub label: String,
    /// Edge properties, often empty.
    #[serde(default)]
    pub properties: Properties,
}

impl Edge {
    /// Creates an edge without properties.
    pub fn new(tail: VertexId, head: VertexId, label: impl Into<String>) -> Self {
        Edge { tail, head, label: label.into(), properties: Properties::new() }
    }

    /// Adds a property to the edge.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// The id of the endpoint on side `direction`.
    ///
    /// `Direction::Out` names the tail, `Direction::In` names the head.
    pub fn vertex_id(&self, direction: Direction) -> VertexId {
        match direction {
            Direction::Out => self.tail,
            Direction::In => self.head,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.tail, self.label, self.head)
    }
}

/// A vertex with its properties and both halves of its local adjacency.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    /// The vertex identifier.
    pub id: VertexId,
    /// Vertex properties.
    #[serde(default)]
    pub properties: Properties,
    /// Edges whose head is this vertex.
    #[serde(default)]
    pub inbound: Vec<Edge>,
    /// Edges whose tail is this vertex.
    #[serde(default)]
    pub outbound: Vec<Edge>,
}

impl Vertex {
    /// Creates a vertex with no properties and no edges.
    pub fn new(id: VertexId) -> Self {
        Vertex { id, properties: Properties::new(), inbound: Vec::new(), outbound: Vec::new() }
    }

    /// Adds a property to the vertex.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Adds `edge` to the adjacency on side `direction`.
    ///
    /// The edge is stored as given; callers are expected to hand in edges whose
    /// head (for `In`) or tail (for `Out`) is this vertex.
    pub fn add_edge(&mut self, direction: Direction, edge: Edge) {
        match direction {
            Direction::In => self.inbound.push(edge),
            Direction::Out => self.outbound.push(edge),
        }
    }

    /// Adds `edge` and returns the vertex, for building vertices inline.
    pub fn with_edge(mut self, direction: Direction, edge: Edge) -> Self {
        self.add_edge(direction, edge);
        self
    }

    /// The edges on side `direction`.
    pub fn edges(&self, direction: Direction) -> &[Edge] {
        match direction {
            Direction::In => &self.inbound[..],
            Direction::Out => &self.outbound[..],
        }
    }

    /// The edges on side `direction` carrying `label`.
    pub fn edges_labeled<'a>(&'a self, direction: Direction, label: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges(direction).iter().filter(move |edge| edge.label == label)
    }

    /// A copy of the vertex's id and properties, without adjacency.
    pub fn clone_id_and_properties(&self) -> Vertex {
        Vertex { id: self.id, properties: self.properties.clone(), inbound: Vec::new(), outbound: Vec::new() }
    }
}
