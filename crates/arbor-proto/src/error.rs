//! Error types for the arbor-proto crate.

use thiserror::Error;

/// Errors that can occur while building or decoding wire types.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Failed to encode a request body.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Failed to decode a server result.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// A token did not name a known object kind.
    #[error("unknown object kind: {0}")]
    UnknownObjectKind(String),

    /// A token did not name a known property type.
    #[error("unknown property type: {0}")]
    UnknownPropertyType(String),

    /// A token did not name a known attribute cardinality.
    #[error("unknown cardinality: {0} (expected once or multi)")]
    UnknownCardinality(String),
}
