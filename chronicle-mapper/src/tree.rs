//! The property mapper tree.
//!
//! A tree binds each audited property of one entity (or component) to the
//! mapper that projects it, and walks those bindings for every projection.
//! Bindings keep their registration order so records come out in a
//! reproducible order.

use crate::mapper::present;
use crate::path::resolve;
use crate::{
    AuditConfig, AuditReader, CollectionDiffer, CollectionMapper, CompositeMapper, FlatRecord,
    Introspector, LeafMapper, Mapper, MapperError, MapperResult,
};
use chronicle_types::{ChangeRecord, PropertyKey, Revision};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Ordered property → mapper bindings with a name index.
///
/// Built single-threaded through `&mut` registration calls, then shared
/// read-only; every projection takes `&self`.
#[derive(Debug, Clone, Default)]
pub struct PropertyMapperTree {
    properties: Vec<(PropertyKey, Mapper)>,
    names: HashMap<String, usize>,
}

impl PropertyMapperTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&mut self, key: PropertyKey, mapper: Mapper) -> usize {
        match self.names.get(key.name()).copied() {
            Some(index) => {
                debug!(
                    "rebinding {} from {} to {} mapper",
                    key,
                    self.properties[index].1.kind(),
                    mapper.kind()
                );
                self.properties[index] = (key, mapper);
                index
            }
            None => {
                self.names.insert(key.name().to_string(), self.properties.len());
                self.properties.push((key, mapper));
                self.properties.len() - 1
            }
        }
    }

    /// Binds `key` to a scalar mapper, replacing any previous binding.
    pub fn add(&mut self, key: PropertyKey) {
        let mapper = Mapper::Leaf(LeafMapper::new(key.clone()));
        self.bind(key, mapper);
    }

    /// Returns the component mapper bound to `key`, creating it if needed.
    ///
    /// Repeated calls for the same key return the same mapper, so several
    /// setup passes can add fields to one component. Fails if `key` is
    /// already bound to anything other than a component.
    pub fn add_component(
        &mut self,
        key: PropertyKey,
        component_type: impl Into<String>,
    ) -> MapperResult<&mut CompositeMapper> {
        let index = match self.names.get(key.name()).copied() {
            Some(index) => index,
            None => {
                let mapper = Mapper::Composite(CompositeMapper::new(key.clone(), component_type));
                self.bind(key.clone(), mapper)
            }
        };
        match &mut self.properties[index].1 {
            Mapper::Composite(composite) => Ok(composite),
            other => {
                warn!("rejecting component {}: already bound to a {} mapper", key, other.kind());
                Err(MapperError::Configuration(format!(
                    "property '{}' is already bound to a {} mapper, not a component",
                    key,
                    other.kind()
                )))
            }
        }
    }

    /// Binds `key` to a collection mapper, replacing any previous binding.
    pub fn add_collection(&mut self, key: PropertyKey) {
        let mapper = Mapper::Collection(CollectionMapper::new(key.clone()));
        self.bind(key, mapper);
    }

    /// Binds an already-built mapper to `key`.
    ///
    /// A composite or tree bound under a key without an attribute name reads
    /// its fields from the owner itself.
    pub fn add_composite(&mut self, key: PropertyKey, mapper: impl Into<Mapper>) {
        self.bind(key, mapper.into());
    }

    /// The bindings, in registration order.
    pub fn properties(&self) -> impl Iterator<Item = (&PropertyKey, &Mapper)> {
        self.properties.iter().map(|(key, mapper)| (key, mapper))
    }

    /// The mapper bound under the external name `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Mapper> {
        self.names.get(name).map(|&index| &self.properties[index].1)
    }

    /// The key bound under the external name `name`.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&PropertyKey> {
        self.names.get(name).map(|&index| &self.properties[index].0)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// True if some binding owns the (possibly dotted) `reference`.
    #[must_use]
    pub fn owns(&self, reference: &str) -> bool {
        self.contains(resolve(reference).owner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Projects aligned state vectors.
    ///
    /// `property_names[i]` names the value at `new_state[i]` and
    /// `old_state[i]`; a missing vector or index reads as null. Names not
    /// bound here are skipped. Modified flags are written for every bound
    /// name, whether or not it changed.
    pub fn map_state<S: AsRef<str>>(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        property_names: &[S],
        new_state: Option<&[Value]>,
        old_state: Option<&[Value]>,
    ) -> MapperResult<bool> {
        let mut changed = false;
        for (index, name) in property_names.iter().enumerate() {
            let name = name.as_ref();
            let Some(mapper) = self.get(name) else {
                trace!("skipping unmapped property {}", name);
                continue;
            };
            let new = new_state.and_then(|state| state.get(index));
            let old = old_state.and_then(|state| state.get(index));
            changed |= mapper.map_to_map_with_flags(introspector, record, new, old)?;
        }
        Ok(changed)
    }

    /// Projects two entity instances, reading every bound property through
    /// the introspector. Returns `false` without writing anything when both
    /// instances are null.
    pub fn map_to_map_from_entity(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<bool> {
        let (new, old) = (present(new), present(old));
        let mut changed = false;
        for (key, mapper) in &self.properties {
            let Some((new_value, old_value)) = read_pair(introspector, key, mapper, new, old)? else {
                trace!("both sides null, nothing to project");
                return Ok(false);
            };
            changed |= mapper.map_to_map_with_flags(
                introspector,
                record,
                new_value.as_ref(),
                old_value.as_ref(),
            )?;
        }
        Ok(changed)
    }

    /// Writes the modified flags of every bound property. Writes nothing when
    /// both instances are null.
    pub fn map_modified_flags(
        &self,
        introspector: &dyn Introspector,
        record: &mut FlatRecord,
        new: Option<&Value>,
        old: Option<&Value>,
    ) -> MapperResult<()> {
        let (new, old) = (present(new), present(old));
        for (key, mapper) in &self.properties {
            let Some((new_value, old_value)) = read_pair(introspector, key, mapper, new, old)? else {
                return Ok(());
            };
            mapper.map_modified_flags(introspector, record, new_value.as_ref(), old_value.as_ref())?;
        }
        Ok(())
    }

    /// Replays `record` onto `target` through every bound mapper.
    pub fn map_to_entity_from_map(
        &self,
        config: &AuditConfig,
        target: &mut Value,
        record: &FlatRecord,
        primary_key: &Value,
        reader: &dyn AuditReader,
        revision: Revision,
    ) -> MapperResult<()> {
        for (_, mapper) in &self.properties {
            mapper.map_to_entity_from_map(config, target, record, primary_key, reader, revision)?;
        }
        Ok(())
    }

    fn resolve_mapper<'a>(&self, reference: &'a str) -> Option<(&Mapper, Cow<'a, str>)> {
        let path = resolve(reference);
        match self.get(path.owner) {
            Some(mapper) => Some((mapper, path.delegate)),
            None => {
                debug!("no mapper owns collection reference {}", reference);
                None
            }
        }
    }

    /// Routes a collection change event to the mapper owning `reference`.
    /// Unmapped references are ignored.
    pub fn map_modified_flags_for_collection_change(&self, reference: &str, record: &mut FlatRecord) {
        if let Some((mapper, delegate)) = self.resolve_mapper(reference) {
            mapper.map_modified_flags_for_collection_change(&delegate, record);
        }
    }

    /// Computes the element changes of the collection `reference`. Returns
    /// `None` when no mapper owns the reference.
    pub fn map_collection_changes(
        &self,
        differ: &dyn CollectionDiffer,
        reference: &str,
        new_collection: Option<&Value>,
        old_snapshot: Option<&Value>,
        owner_id: &Value,
    ) -> MapperResult<Option<Vec<ChangeRecord>>> {
        match self.resolve_mapper(reference) {
            Some((mapper, delegate)) => {
                mapper.map_collection_changes(differ, &delegate, new_collection, old_snapshot, owner_id)
            }
            None => Ok(None),
        }
    }
}

/// Reads `key` from both sides, resolving the accessor against the new
/// instance's runtime type when present, else the old one's. `None` when
/// both sides are null.
///
/// A component or nested tree bound without an attribute name keeps its
/// fields on the owner, so it receives the owner instances unchanged.
fn read_pair(
    introspector: &dyn Introspector,
    key: &PropertyKey,
    mapper: &Mapper,
    new: Option<&Value>,
    old: Option<&Value>,
) -> MapperResult<Option<(Option<Value>, Option<Value>)>> {
    let Some(instance) = new.or(old) else {
        return Ok(None);
    };
    if matches!(mapper, Mapper::Composite(_) | Mapper::Tree(_)) && key.bean_name().is_none() {
        return Ok(Some((new.cloned(), old.cloned())));
    }
    let accessor = introspector.resolve_accessor(&introspector.runtime_type(instance), key)?;
    let new_value = new.map(|instance| accessor.read(instance)).transpose()?;
    let old_value = old.map(|instance| accessor.read(instance)).transpose()?;
    Ok(Some((new_value, old_value)))
}
