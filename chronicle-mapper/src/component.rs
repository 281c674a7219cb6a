//! Mapper for embedded components.
//!
//! A component's fields are flattened into the owner's record under the
//! component prefix (`address_city` for field `city` of component
//! `address`). The component never writes data under its own name.

use crate::mapper::{present, set_attribute};
use crate::path::component_prefix;
use crate::{
    AuditConfig, AuditReader, CollectionDiffer, FlatRecord, Introspector, Mapper, MapperResult,
    PropertyMapperTree,
};
use chronicle_types::{ChangeRecord, PropertyKey, Revision};
use serde_json::Value;
use tracing::trace;

/// Owns the tree of a component's properties and acts as its builder
/// during setup.
#[derive(Debug, Clone)]
pub struct CompositeMapper {
    key: PropertyKey,
    component_type: String,
    delegate: PropertyMapperTree,
}

impl CompositeMapper {
    #[must_use]
    pub fn new(key: PropertyKey, component_type: impl Into<String>) -> Self {
        Self {
            key,
            component_type: component_type.into(),
            delegate: PropertyMapperTree::new(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    #[must_use]
    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    /// The component's own tree, keyed by prefixed names.
    #[must_use]
    pub fn delegate(&self) -> &PropertyMapperTree {
        &self.delegate
    }

    fn prefix(&self) -> String {
        component_prefix(self.key.name())
    }

    /// Adds a scalar field of the component.
    pub fn add(&mut self, key: PropertyKey) {
        let key = key.prefixed(&self.prefix());
        self.delegate.add(key);
    }

    /// Adds (or returns the already added) nested component.
    pub fn add_component(
        &mut self,
        key: PropertyKey,
        component_type: impl Into<String>,
    ) -> MapperResult<&mut CompositeMapper> {
        let key = key.prefixed(&self.prefix());
        self.delegate.add_component(key, component_type)
    }

    /// Adds a collection-valued field of the component.
    pub fn add_collection(&mut self, key: PropertyKey) {
        let key = key.prefixed(&self.prefix());
        self.delegate.add_collection(key);
    }

    /// Binds a mapper built elsewhere. Only the binding key is prefixed; the
    /// mapper writes under whatever names it was built with.
    pub fn add_composite(&mut self, key: PropertyKey, mapper: impl Into<Mapper>) {
        let key = key.prefixed(&self.prefix());
        self.delegate.add_composite(key, mapper);
    }

    pub fn map_to_map_from_entity(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<bool> {
        self.delegate.map_to_map_from_entity(introspector, record, new, old)
    }

    /// Writes the fields' values and flags, then the component's own flag.
    pub fn map_to_map_with_flags(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<bool> {
        let changed = self
            .delegate
            .map_to_map_from_entity(introspector, record, new, old)?;
        if let Some(flag) = self.key.modified_flag_name() {
            record.set_flag(flag, changed);
        }
        Ok(changed)
    }

    /// Writes the fields' flags, plus the component's own flag (set when any
    /// field changed) if it records one. The child tree is walked once, into
    /// a scratch record whose flags are then copied over.
    pub fn map_modified_flags(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<()> {
        let mut scratch = FlatRecord::new();
        let changed = self
            .delegate
            .map_to_map_from_entity(introspector, &mut scratch, new, old)?;
        for (flag, &value) in scratch.flags() {
            record.set_flag(flag, value);
        }
        if let Some(flag) = self.key.modified_flag_name() {
            record.set_flag(flag, changed);
        }
        Ok(())
    }

    pub fn map_modified_flags_for_collection_change(&self, reference: &str, record: &mut FlatRecord) {
        if let Some(flag) = self.key.modified_flag_name() {
            record.set_flag(flag, self.delegate.owns(reference));
        }
        self.delegate
            .map_modified_flags_for_collection_change(reference, record);
    }

    pub fn map_collection_changes(
        &self,
        differ: &dyn CollectionDiffer,
        reference: &str,
        new_collection: Option<&Value>,
        old_snapshot: Option<&Value>,
        owner_id: &Value,
    ) -> MapperResult<Option<Vec<ChangeRecord>>> {
        self.delegate
            .map_collection_changes(differ, reference, new_collection, old_snapshot, owner_id)
    }

    /// Rebuilds the component from the flat record.
    ///
    /// Without an attribute name the fields sit directly on `target`. A
    /// component made only of scalar fields that are all null is restored
    /// as null.
    pub fn map_to_entity_from_map(
        &self,
        config: &AuditConfig,
        target: &mut Value,
        record: &FlatRecord,
        primary_key: &Value,
        reader: &dyn AuditReader,
        revision: Revision,
    ) -> MapperResult<()> {
        if target.is_null() {
            return Ok(());
        }
        let Some(attribute) = self.key.bean_name() else {
            return self
                .delegate
                .map_to_entity_from_map(config, target, record, primary_key, reader, revision);
        };

        let all_null_and_single = self
            .delegate
            .properties()
            .all(|(key, mapper)| matches!(mapper, Mapper::Leaf(_)) && record.is_null(key.name()));
        if all_null_and_single {
            trace!("component {} is null in the record", self.key);
            return set_attribute(target, attribute, Value::Null);
        }

        let mut component = reader.instantiate(&self.component_type)?;
        if let Value::Object(map) = &mut component {
            if present(map.get(&config.type_field)).is_none() {
                map.insert(
                    config.type_field.clone(),
                    Value::String(self.component_type.clone()),
                );
            }
        }
        self.delegate
            .map_to_entity_from_map(config, &mut component, record, primary_key, reader, revision)?;
        set_attribute(target, attribute, component)
    }
}
