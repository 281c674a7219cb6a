//! Property keys.
//!
//! A [`PropertyKey`] names one audited attribute: the external name it is
//! flattened under, the attribute the introspector reads on the owning
//! instance, and the name of the modified flag recorded for it (if any).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to a property name to form its modified-flag name.
pub const DEFAULT_MODIFIED_FLAG_SUFFIX: &str = "_MOD";

/// How the introspector reaches the attribute on an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    /// Direct field access.
    #[default]
    Field,
    /// Accessor-method style access.
    Property,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "field"),
            Self::Property => write!(f, "property"),
        }
    }
}

/// Identifies one logical property of an audited entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyKey {
    /// External (flattened) name.
    name: String,
    /// Attribute read on the owning instance. `None` for dynamic entities,
    /// where the value lives directly under `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bean_name: Option<String>,
    #[serde(default)]
    access_type: AccessType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modified_flag_name: Option<String>,
}

impl PropertyKey {
    /// Creates a key whose attribute matches its name, recording a modified
    /// flag under `<name>_MOD`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            modified_flag_name: Some(format!("{name}{DEFAULT_MODIFIED_FLAG_SUFFIX}")),
            bean_name: Some(name.clone()),
            access_type: AccessType::Field,
            name,
        }
    }

    /// Creates a key for a dynamic (map-shaped) entity with no attribute name.
    #[must_use]
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            bean_name: None,
            ..Self::new(name)
        }
    }

    /// Overrides the attribute read on the owning instance.
    #[must_use]
    pub fn with_bean_name(mut self, bean_name: impl Into<String>) -> Self {
        self.bean_name = Some(bean_name.into());
        self
    }

    #[must_use]
    pub fn with_access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = access_type;
        self
    }

    /// Records the modified flag under `<name><suffix>`.
    #[must_use]
    pub fn with_modified_flag_suffix(mut self, suffix: &str) -> Self {
        self.modified_flag_name = Some(format!("{}{suffix}", self.name));
        self
    }

    /// Stops recording a modified flag for this property.
    #[must_use]
    pub fn without_modified_flag(mut self) -> Self {
        self.modified_flag_name = None;
        self
    }

    /// Returns a copy of this key renamed under `prefix`.
    ///
    /// The attribute name is kept, so the introspector still reads the
    /// local field of the component instance. The modified-flag name moves
    /// with the external name.
    #[must_use]
    pub fn prefixed(&self, prefix: &str) -> Self {
        Self {
            name: format!("{prefix}{}", self.name),
            bean_name: Some(self.attribute().to_string()),
            access_type: self.access_type,
            modified_flag_name: self
                .modified_flag_name
                .as_ref()
                .map(|flag| format!("{prefix}{flag}")),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bean_name(&self) -> Option<&str> {
        self.bean_name.as_deref()
    }

    /// The attribute to read or write: the bean name, or the external name
    /// for dynamic entities.
    #[must_use]
    pub fn attribute(&self) -> &str {
        self.bean_name.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn access_type(&self) -> AccessType {
        self.access_type
    }

    #[must_use]
    pub fn modified_flag_name(&self) -> Option<&str> {
        self.modified_flag_name.as_deref()
    }

    #[must_use]
    pub fn is_using_modified_flag(&self) -> bool {
        self.modified_flag_name.is_some()
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
