//! Mapper for a single scalar property.

use crate::mapper::{differs, present, set_attribute};
use crate::{FlatRecord, MapperResult};
use chronicle_types::PropertyKey;
use serde_json::Value;

/// Copies one value between an entity and the flat record.
///
/// A value counts as changed when the two sides are not structurally equal
/// JSON, with null and absent treated alike.
#[derive(Debug, Clone)]
pub struct LeafMapper {
    key: PropertyKey,
}

impl LeafMapper {
    #[must_use]
    pub fn new(key: PropertyKey) -> Self {
        Self { key }
    }

    #[must_use]
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    pub fn map_to_map_from_entity(
        &self,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> bool {
        record.insert(
            self.key.name(),
            present(new).cloned().unwrap_or(Value::Null),
        );
        differs(new, old)
    }

    pub fn map_modified_flags(&self, record: &mut FlatRecord, new: Option<&Value>, old: Option<&Value>) {
        if let Some(flag) = self.key.modified_flag_name() {
            record.set_flag(flag, differs(new, old));
        }
    }

    pub fn map_to_entity_from_map(&self, target: &mut Value, record: &FlatRecord) -> MapperResult<()> {
        if target.is_null() {
            return Ok(());
        }
        set_attribute(target, self.key.attribute(), record.value(self.key.name()))
    }
}
