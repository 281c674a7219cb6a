//! Attribute access on entity instances.
//!
//! The mapper tree never looks inside an instance itself. For every bound
//! property it asks an [`Introspector`] for an [`Accessor`], resolved against
//! the runtime type of whichever side of the update is present, and reads
//! the value through it.

use crate::{AuditConfig, MapperError, MapperResult};
use chronicle_types::PropertyKey;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Resolves accessors for audited properties.
///
/// Implementations must be side-effect free for reads; a finished tree may
/// be projected from several threads at once.
pub trait Introspector: Send + Sync {
    /// Returns the runtime type tag of `instance`.
    fn runtime_type(&self, instance: &Value) -> String;

    /// Resolves the accessor for `key` on instances of `runtime_type`.
    fn resolve_accessor(
        &self,
        runtime_type: &str,
        key: &PropertyKey,
    ) -> MapperResult<Box<dyn Accessor>>;
}

/// Reads one attribute from an instance.
pub trait Accessor {
    fn read(&self, instance: &Value) -> MapperResult<Value>;
}

/// Name of the JSON kind of `value`, used as the runtime type of untyped
/// instances.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Introspector over JSON object instances.
///
/// The runtime type is the string stored under the type field (`"@type"` by
/// default), falling back to the JSON kind. Types may be declared with their
/// attribute set, in which case resolving any other attribute fails.
#[derive(Debug, Clone)]
pub struct JsonIntrospector {
    type_field: String,
    declared: HashMap<String, HashSet<String>>,
}

impl JsonIntrospector {
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&AuditConfig::default())
    }

    #[must_use]
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            type_field: config.type_field.clone(),
            declared: HashMap::new(),
        }
    }

    /// Declares the attributes instances of `type_name` carry.
    #[must_use]
    pub fn declare_type<I, S>(mut self, type_name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared.insert(
            type_name.into(),
            attributes.into_iter().map(Into::into).collect(),
        );
        self
    }

    #[must_use]
    pub fn type_field(&self) -> &str {
        &self.type_field
    }
}

impl Default for JsonIntrospector {
    fn default() -> Self {
        Self::new()
    }
}

impl Introspector for JsonIntrospector {
    fn runtime_type(&self, instance: &Value) -> String {
        instance
            .get(&self.type_field)
            .and_then(Value::as_str)
            .map_or_else(|| json_kind(instance).to_string(), str::to_string)
    }

    fn resolve_accessor(
        &self,
        runtime_type: &str,
        key: &PropertyKey,
    ) -> MapperResult<Box<dyn Accessor>> {
        let attribute = key.attribute();
        if let Some(attributes) = self.declared.get(runtime_type) {
            if !attributes.contains(attribute) {
                return Err(MapperError::Introspection(format!(
                    "type '{runtime_type}' has no attribute '{attribute}'"
                )));
            }
        }
        Ok(Box::new(FieldAccessor {
            attribute: attribute.to_string(),
        }))
    }
}

/// Reads a named member of a JSON object. Missing members read as null.
#[derive(Debug, Clone)]
pub struct FieldAccessor {
    attribute: String,
}

impl FieldAccessor {
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }
}

impl Accessor for FieldAccessor {
    fn read(&self, instance: &Value) -> MapperResult<Value> {
        match instance {
            Value::Object(map) => Ok(map.get(&self.attribute).cloned().unwrap_or(Value::Null)),
            other => Err(MapperError::Introspection(format!(
                "cannot read '{}' from a {}",
                self.attribute,
                json_kind(other)
            ))),
        }
    }
}
