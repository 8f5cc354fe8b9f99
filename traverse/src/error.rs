//! Errors raised by the traversal stage.
//!
//! Every variant is fatal for the pass it occurs in. Configuration errors are
//! raised before any vertex is read; integrity errors indicate a fault in the
//! emitter or the exchange and leave no consistent output to salvage.

use thiserror::Error;

use crate::graph::VertexId;

/// Errors raised by the traversal stage.
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration key was not supplied.
    #[error("missing required configuration key `{0}`")]
    MissingKey(&'static str),
    /// A direction other than `IN` or `OUT` was configured.
    #[error("a direction of {0} is not a legal direction for this operation")]
    InvalidDirection(String),
    /// An action other than `KEEP` or `PRUNE` was configured.
    #[error("an action of {0} is not a legal action for this operation")]
    InvalidAction(String),
    /// A label key was supplied with an empty value.
    #[error("configuration key `{0}` must not be empty")]
    EmptyLabel(&'static str),
    /// A configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// A self record was delivered to the wrong key.
    #[error("record for vertex {id} was delivered to key {key}")]
    KeyMismatch {
        /// The key the record arrived under.
        key: VertexId,
        /// The vertex the record describes.
        id: VertexId,
    },
    /// A record arrived with a non-positive multiplicity.
    #[error("vertex {id} received a record with multiplicity {count}")]
    InvalidMultiplicity {
        /// The key being merged.
        id: VertexId,
        /// The offending multiplicity.
        count: isize,
    },
    /// A vertex line could not be decoded.
    #[error("line {line}: {source}")]
    Decode {
        /// One-based line number in the input.
        line: usize,
        /// The underlying decoding error.
        source: serde_json::Error,
    },
    /// A vertex could not be encoded.
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    /// A timely worker failed or could not be started.
    #[error("worker failed: {0}")]
    Worker(String),
    /// Reading or writing failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for the traversal stage.
pub type Result<T> = std::result::Result<T, Error>;
