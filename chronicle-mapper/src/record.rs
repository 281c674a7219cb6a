//! The flat record projections write into.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flattened audit row: named values plus the parallel modified flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    data: Map<String, Value>,
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

impl FlatRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-flattened row data, e.g. a row loaded for reverse
    /// projection.
    #[must_use]
    pub fn from_data(data: Map<String, Value>) -> Self {
        Self {
            data,
            flags: BTreeMap::new(),
        }
    }

    /// Returns the value stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Returns the value stored under `name`, or null.
    #[must_use]
    pub fn value(&self, name: &str) -> Value {
        self.data.get(name).cloned().unwrap_or(Value::Null)
    }

    /// True if `name` is absent or holds null.
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        self.data.get(name).is_none_or(Value::is_null)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.data.insert(name.into(), value);
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn set_flag(&mut self, name: impl Into<String>, modified: bool) {
        self.flags.insert(name.into(), modified);
    }

    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    #[must_use]
    pub fn flags(&self) -> &BTreeMap<String, bool> {
        &self.flags
    }

    /// True if neither values nor flags have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.flags.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Map<String, Value>, BTreeMap<String, bool>) {
        (self.data, self.flags)
    }
}
