//! Mapper for collection-valued properties.
//!
//! Collections do not travel in the before/after state vectors. Their
//! contents reach the audit trail through collection change events, which
//! the owning tree routes here by name.

use crate::mapper::{differs, set_attribute};
use crate::{AuditReader, CollectionDiffer, FlatRecord, MapperResult};
use chronicle_types::{ChangeRecord, PropertyKey, Revision};
use serde_json::Value;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct CollectionMapper {
    key: PropertyKey,
}

impl CollectionMapper {
    #[must_use]
    pub fn new(key: PropertyKey) -> Self {
        Self { key }
    }

    #[must_use]
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    pub fn map_modified_flags(&self, record: &mut FlatRecord, new: Option<&Value>, old: Option<&Value>) {
        if let Some(flag) = self.key.modified_flag_name() {
            record.set_flag(flag, differs(new, old));
        }
    }

    pub fn map_modified_flags_for_collection_change(&self, reference: &str, record: &mut FlatRecord) {
        if let Some(flag) = self.key.modified_flag_name() {
            record.set_flag(flag, self.key.name() == reference);
        }
    }

    pub fn map_collection_changes(
        &self,
        differ: &dyn CollectionDiffer,
        reference: &str,
        new_collection: Option<&Value>,
        old_snapshot: Option<&Value>,
        owner_id: &Value,
    ) -> MapperResult<Option<Vec<ChangeRecord>>> {
        if self.key.name() != reference {
            trace!("collection {} does not handle {}", self.key, reference);
            return Ok(None);
        }
        let changes = differ.diff(&self.key, owner_id, new_collection, old_snapshot)?;
        trace!("collection {} produced {} change(s)", self.key, changes.len());
        Ok(Some(changes))
    }

    pub fn map_to_entity_from_map(
        &self,
        target: &mut Value,
        primary_key: &Value,
        reader: &dyn AuditReader,
        revision: Revision,
    ) -> MapperResult<()> {
        if target.is_null() {
            return Ok(());
        }
        let collection = reader.load_collection(&self.key, primary_key, revision)?;
        set_attribute(target, self.key.attribute(), collection)
    }
}
