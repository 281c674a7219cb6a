//! The closed set of property mappers and their dispatch.

use crate::introspect::json_kind;
use crate::{
    AuditConfig, AuditReader, CollectionDiffer, CollectionMapper, CompositeMapper, FlatRecord,
    Introspector, LeafMapper, MapperError, MapperResult, PropertyMapperTree,
};
use chronicle_types::{ChangeRecord, Revision};
use serde_json::Value;

/// A mapper bound to one property of a tree.
#[derive(Debug, Clone)]
pub enum Mapper {
    /// A single scalar property.
    Leaf(LeafMapper),
    /// An embedded component flattened under a prefix.
    Composite(CompositeMapper),
    /// A collection-valued property.
    Collection(CollectionMapper),
    /// A nested tree bound without an embedding mapper.
    Tree(PropertyMapperTree),
}

impl Mapper {
    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Composite(_) => "composite",
            Self::Collection(_) => "collection",
            Self::Tree(_) => "tree",
        }
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    #[must_use]
    pub fn as_composite(&self) -> Option<&CompositeMapper> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Writes the property's value(s) into `record`. Returns whether the
    /// property changed between `old` and `new`.
    pub fn map_to_map_from_entity(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<bool> {
        match self {
            Self::Leaf(leaf) => Ok(leaf.map_to_map_from_entity(record, new, old)),
            Self::Composite(composite) => {
                composite.map_to_map_from_entity(introspector, record, new, old)
            }
            Self::Collection(_) => Ok(false),
            Self::Tree(tree) => tree.map_to_map_from_entity(introspector, record, new, old),
        }
    }

    /// Writes the property's value(s) and modified flag(s) into `record` in
    /// a single pass. Returns whether the property changed.
    pub fn map_to_map_with_flags(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<bool> {
        match self {
            Self::Leaf(leaf) => {
                let changed = leaf.map_to_map_from_entity(record, new, old);
                leaf.map_modified_flags(record, new, old);
                Ok(changed)
            }
            Self::Composite(composite) => {
                composite.map_to_map_with_flags(introspector, record, new, old)
            }
            Self::Collection(collection) => {
                collection.map_modified_flags(record, new, old);
                Ok(false)
            }
            Self::Tree(tree) => tree.map_to_map_from_entity(introspector, record, new, old),
        }
    }

    /// Writes the property's modified flag(s) into `record`.
    pub fn map_modified_flags(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<()> {
        match self {
            Self::Leaf(leaf) => {
                leaf.map_modified_flags(record, new, old);
                Ok(())
            }
            Self::Composite(composite) => {
                composite.map_modified_flags(introspector, record, new, old)
            }
            Self::Collection(collection) => {
                collection.map_modified_flags(record, new, old);
                Ok(())
            }
            Self::Tree(tree) => tree.map_modified_flags(introspector, record, new, old),
        }
    }

    /// Replays the property from `record` onto `target`.
    pub fn map_to_entity_from_map(
        &self,
        config: &AuditConfig,
        target: &mut Value,
        record: &FlatRecord,
        primary_key: &Value,
        reader: &dyn AuditReader,
        revision: Revision,
    ) -> MapperResult<()> {
        match self {
            Self::Leaf(leaf) => leaf.map_to_entity_from_map(target, record),
            Self::Composite(composite) => {
                composite.map_to_entity_from_map(config, target, record, primary_key, reader, revision)
            }
            Self::Collection(collection) => {
                collection.map_to_entity_from_map(target, primary_key, reader, revision)
            }
            Self::Tree(tree) => {
                tree.map_to_entity_from_map(config, target, record, primary_key, reader, revision)
            }
        }
    }

    /// Records that the collection named `reference` changed.
    pub fn map_modified_flags_for_collection_change(&self, reference: &str, record: &mut FlatRecord) {
        match self {
            Self::Leaf(_) => {}
            Self::Composite(composite) => {
                composite.map_modified_flags_for_collection_change(reference, record);
            }
            Self::Collection(collection) => {
                collection.map_modified_flags_for_collection_change(reference, record);
            }
            Self::Tree(tree) => tree.map_modified_flags_for_collection_change(reference, record),
        }
    }

    /// Computes the element changes of the collection named `reference`.
    /// `None` means this mapper does not handle that collection.
    pub fn map_collection_changes(
        &self,
        differ: &dyn CollectionDiffer,
        reference: &str,
        new_collection: Option<&Value>,
        old_snapshot: Option<&Value>,
        owner_id: &Value,
    ) -> MapperResult<Option<Vec<ChangeRecord>>> {
        match self {
            Self::Leaf(_) => Ok(None),
            Self::Composite(composite) => composite.map_collection_changes(
                differ,
                reference,
                new_collection,
                old_snapshot,
                owner_id,
            ),
            Self::Collection(collection) => collection.map_collection_changes(
                differ,
                reference,
                new_collection,
                old_snapshot,
                owner_id,
            ),
            Self::Tree(tree) => {
                tree.map_collection_changes(differ, reference, new_collection, old_snapshot, owner_id)
            }
        }
    }
}

impl From<LeafMapper> for Mapper {
    fn from(leaf: LeafMapper) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<CompositeMapper> for Mapper {
    fn from(composite: CompositeMapper) -> Self {
        Self::Composite(composite)
    }
}

impl From<CollectionMapper> for Mapper {
    fn from(collection: CollectionMapper) -> Self {
        Self::Collection(collection)
    }
}

impl From<PropertyMapperTree> for Mapper {
    fn from(tree: PropertyMapperTree) -> Self {
        Self::Tree(tree)
    }
}

/// Treats a JSON null the same as an absent value.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// True if the two sides differ, with null and absent being equal.
pub(crate) fn differs(new: Option<&Value>, old: Option<&Value>) -> bool {
    present(new) != present(old)
}

pub(crate) fn set_attribute(target: &mut Value, attribute: &str, value: Value) -> MapperResult<()> {
    match target {
        Value::Object(map) => {
            map.insert(attribute.to_string(), value);
            Ok(())
        }
        other => Err(MapperError::Materialization(format!(
            "cannot set '{attribute}' on a {}",
            json_kind(other)
        ))),
    }
}
