//! Element-level collection change records.
//!
//! Collection-valued properties are never part of the before/after state
//! vectors. Their changes are computed separately, one record per added,
//! removed or modified element, and written as rows of the collection's own
//! audit table.

use crate::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of change a revision applied to an entity or collection element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionType {
    Add,
    Mod,
    Del,
}

impl RevisionType {
    /// Stored code: 0 = add, 1 = mod, 2 = del.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Add => 0,
            Self::Mod => 1,
            Self::Del => 2,
        }
    }

    pub fn from_code(code: u8) -> crate::Result<Self> {
        match code {
            0 => Ok(Self::Add),
            1 => Ok(Self::Mod),
            2 => Ok(Self::Del),
            other => Err(Error::InvalidRevisionType(other.to_string())),
        }
    }
}

impl fmt::Display for RevisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Mod => write!(f, "mod"),
            Self::Del => write!(f, "del"),
        }
    }
}

impl FromStr for RevisionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "mod" => Ok(Self::Mod),
            "del" => Ok(Self::Del),
            _ => Err(Error::InvalidRevisionType(s.to_string())),
        }
    }
}

/// One element-level change of a collection property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Name of the audit entity the row belongs to (the collection's
    /// middle table, or the element entity).
    pub entity_name: String,
    /// Column data of the row, already flattened.
    pub data: Map<String, Value>,
    /// The element that was added, removed or modified.
    pub changed_element: Value,
    pub revision_type: RevisionType,
}

impl ChangeRecord {
    /// Creates a record with empty row data.
    #[must_use]
    pub fn new(
        entity_name: impl Into<String>,
        changed_element: Value,
        revision_type: RevisionType,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            data: Map::new(),
            changed_element,
            revision_type,
        }
    }

    /// Serializes the record to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a record from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
