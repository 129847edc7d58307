//! Error types for controller operations.

use thiserror::Error;

use crate::history::CodecError;

/// Why the graph rejected a mutation.
///
/// Every variant is recoverable: the model is left untouched by the failed
/// operation and the editing session continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("node '{0}' not found")]
    NodeNotFound(String),

    #[error("pin '{0}' not found")]
    PinNotFound(String),

    #[error("link '{src} -> {target}' not found")]
    LinkNotFound { src: String, target: String },

    #[error("name '{0}' is already taken")]
    NameCollision(String),

    #[error("node '{node}' is a {found}, expected a {expected}")]
    KindMismatch {
        node: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    InvalidOperation(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for controller operations.
pub type ControllerResult<T = ()> = Result<T, ControllerError>;
