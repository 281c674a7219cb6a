//! Property mapper tree for Chronicle.
//!
//! Projects the before/after state of an audited entity into a flat record
//! of named values plus a parallel set of modified flags, and replays such
//! a record back onto a fresh instance:
//! - [`PropertyMapperTree`]: ordered property → mapper bindings; the entry
//!   point for every projection
//! - [`Mapper`]: the closed set of mappers a property can be bound to
//!   ([`LeafMapper`], [`CompositeMapper`], [`CollectionMapper`], or a nested
//!   tree)
//! - [`path`]: dotted collection references (`address.tags`) and the
//!   component prefix convention
//! - [`Introspector`], [`CollectionDiffer`], [`AuditReader`]: the
//!   collaborators the tree calls out to
//!
//! Entity instances, component instances, collections and record values
//! are all `serde_json::Value`; JSON null and an absent value are treated
//! alike everywhere.

mod collection;
mod component;
mod config;
mod error;
mod introspect;
mod leaf;
mod mapper;
pub mod path;
mod reader;
mod record;
mod tree;

pub use collection::CollectionMapper;
pub use component::CompositeMapper;
pub use config::{AuditConfig, DEFAULT_TYPE_FIELD};
pub use error::{MapperError, MapperResult};
pub use introspect::{Accessor, FieldAccessor, Introspector, JsonIntrospector, json_kind};
pub use leaf::LeafMapper;
pub use mapper::Mapper;
pub use reader::{AuditReader, CollectionDiffer};
pub use record::FlatRecord;
pub use tree::PropertyMapperTree;
