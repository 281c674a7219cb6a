//! Core type definitions for Chronicle.
//!
//! This crate defines the plain data types shared by the projection engine
//! and its collaborators:
//! - Property keys naming one audited attribute of an entity
//! - Revision numbers
//! - Element-level collection change records
//!
//! Nothing here knows how entities are read or how mappers are arranged;
//! that lives in `chronicle-mapper`.

mod change;
mod property;
mod revision;

pub use change::{ChangeRecord, RevisionType};
pub use property::{AccessType, DEFAULT_MODIFIED_FLAG_SUFFIX, PropertyKey};
pub use revision::Revision;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid revision: {0}")]
    InvalidRevision(String),

    #[error("invalid revision type: {0}")]
    InvalidRevisionType(String),
}
