//! Collaborators of the collection and reverse-projection paths.

use crate::MapperResult;
use chronicle_types::{ChangeRecord, PropertyKey, Revision};
use serde_json::Value;

/// Computes element-level changes of a collection property.
pub trait CollectionDiffer: Send + Sync {
    /// Diffs `new_collection` against the stored `old_snapshot` of the
    /// collection bound to `key` on the entity identified by `owner_id`.
    fn diff(
        &self,
        key: &PropertyKey,
        owner_id: &Value,
        new_collection: Option<&Value>,
        old_snapshot: Option<&Value>,
    ) -> MapperResult<Vec<ChangeRecord>>;
}

/// Materializes instances while replaying a flat record onto an entity.
pub trait AuditReader: Send + Sync {
    /// Allocates a fresh, empty instance of a component type.
    fn instantiate(&self, component_type: &str) -> MapperResult<Value>;

    /// Loads the state of the collection bound to `key` on the entity
    /// `primary_key`, as of `revision`.
    fn load_collection(
        &self,
        key: &PropertyKey,
        primary_key: &Value,
        revision: Revision,
    ) -> MapperResult<Value>;
}
