//! CLI error types.

use arbor_proto::ProtoError;
use arbor_validation::ValidationError;
use thiserror::Error;

use crate::args::ArgumentError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong positional arity or malformed keyword tail.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A token failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A symbolic name did not resolve to an identifier.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Entity kind looked up.
        kind: &'static str,
        /// Name that failed to resolve.
        name: String,
    },

    /// A section or action belongs to a different category than the
    /// permission it is mapped to.
    #[error("category mismatch: section belongs to {actual}, permission to {expected}")]
    CategoryMismatch {
        /// Category of the permission, or the one given with `in`.
        expected: String,
        /// Category the section actually belongs to.
        actual: String,
    },

    /// Two references to the same thing disagree.
    #[error("conflicting {what}: {first} vs {second}")]
    Mismatch {
        /// What was specified twice.
        what: &'static str,
        /// First value.
        first: String,
        /// Second value.
        second: String,
    },

    /// The tokens do not form a valid command.
    #[error("{0}")]
    Usage(String),

    /// The HTTP request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an application error.
    #[error("server error ({code}): {message}")]
    Server {
        /// Status code reported by the server.
        code: u16,
        /// Error text reported by the server.
        message: String,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// Wire type error.
    #[error(transparent)]
    Proto(#[from] ProtoError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Lookup failure for `kind` named `name`.
    #[must_use]
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
