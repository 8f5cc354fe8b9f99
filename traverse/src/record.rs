//! Tagged records, the single value type carried through the exchange.
//!
//! One key (a vertex id) receives three kinds of record: the vertex's own
//! properties, and edges to be filed under its inbound or outbound adjacency.
//! Each kind serializes under a one-character tag: `v`, `i`, or `o`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{Direction, Edge, Properties, Vertex, VertexId};

/// A record routed to the vertex named by its key.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Record {
    /// The id and properties of the keyed vertex, without adjacency.
    #[serde(rename = "v")]
    VertexSelf {
        /// The vertex id; always equal to the key.
        id: VertexId,
        /// The vertex properties.
        properties: Properties,
    },
    /// An edge whose head is the keyed vertex.
    #[serde(rename = "i")]
    InboundEdge(Edge),
    /// An edge whose tail is the keyed vertex.
    #[serde(rename = "o")]
    OutboundEdge(Edge),
}

impl Record {
    /// The self record for `vertex`.
    pub fn vertex_self(vertex: &Vertex) -> Self {
        let copy = vertex.clone_id_and_properties();
        Record::VertexSelf { id: copy.id, properties: copy.properties }
    }

    /// An edge record filed under adjacency `direction`.
    pub fn edge(direction: Direction, edge: Edge) -> Self {
        match direction {
            Direction::In => Record::InboundEdge(edge),
            Direction::Out => Record::OutboundEdge(edge),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::VertexSelf { id, properties } => write!(f, "v[{} +{}]", id, properties.len()),
            Record::InboundEdge(edge) => write!(f, "i[{}]", edge),
            Record::OutboundEdge(edge) => write!(f, "o[{}]", edge),
        }
    }
}
