//! Two-hop edge derivation in differential dataflow.
//!
//! A traversal pass looks for paths `f -[first]- v -[second]- s` through each
//! vertex `v` of a property graph and derives an edge `f -[new]-> s` for each
//! one, optionally pruning the edges the derived edge summarizes. Vertices hold
//! their adjacency locally, so the pass is a single exchange: each vertex emits
//! records keyed by the vertices they concern, and each key is merged back into
//! a vertex.
//!
//! The pass is assembled from three pieces:
//!
//! * [`emit`]: per-vertex frontier computation and record emission;
//! * [`record`]: the tagged records carried through the exchange;
//! * [`merge`]: reconstruction of a vertex from its records.
//!
//! [`operators::Traverse`] wires them into a differential dataflow, and
//! [`pass::run_pass`] runs that dataflow to completion on a timely worker.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use differential_traverse::*;
//!
//! let config = TraverseConfig::builder()
//!     .first(Direction::Out, "knows")
//!     .second(Direction::Out, "likes")
//!     .new_label("knows_likes")
//!     .action(Action::Prune)
//!     .build()
//!     .unwrap();
//!
//! let vertex =
//! Vertex::new(1)
//!     .with_edge(Direction::In, Edge::new(2, 1, "knows"))
//!     .with_edge(Direction::Out, Edge::new(1, 3, "likes"));
//!
//! let records = emit::emit(&vertex, &config, &NoopEdgeCounter);
//! assert!(records.contains(&(2, Record::OutboundEdge(Edge::new(2, 3, "knows_likes")))));
//! assert!(records.contains(&(3, Record::InboundEdge(Edge::new(2, 3, "knows_likes")))));
//! ```

#![forbid(missing_docs)]

pub mod config;
pub mod counter;
pub mod emit;
pub mod error;
pub mod graph;
pub mod jsonl;
pub mod merge;
pub mod operators;
pub mod pass;
pub mod record;

pub use config::{Action, TraverseConfig};
pub use counter::{AtomicEdgeCounter, Counter, EdgeCounter, NoopEdgeCounter};
pub use emit::Emitter;
pub use error::{Error, Result};
pub use graph::{Direction, Edge, Properties, Value, Vertex, VertexId};
pub use merge::{merge_records, Anomaly, Merged};
pub use operators::{rebuild, Traverse};
pub use pass::{run_pass, Delivery};
pub use record::Record;
