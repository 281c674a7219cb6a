//! Error types for the mapper layer.

use thiserror::Error;

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;

/// Errors that can occur while building or running a mapper tree.
#[derive(Debug, Error)]
pub enum MapperError {
    /// The tree was set up inconsistently (e.g. a component registered over
    /// a property already bound to another mapper kind).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The introspector could not resolve or read an attribute.
    #[error("introspection error: {0}")]
    Introspection(String),

    /// The collection differ failed.
    #[error("collection diff error: {0}")]
    Diff(String),

    /// An entity or component could not be materialized during reverse
    /// projection.
    #[error("materialization error: {0}")]
    Materialization(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
