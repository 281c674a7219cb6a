//! Audit configuration.

use crate::MapperResult;
use chronicle_types::{DEFAULT_MODIFIED_FLAG_SUFFIX, PropertyKey};
use serde::{Deserialize, Serialize};

/// Default field holding an instance's runtime type in JSON entities.
pub const DEFAULT_TYPE_FIELD: &str = "@type";

/// Settings shared by tree setup and reverse projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Suffix appended to a property name to form its modified-flag name.
    pub modified_flag_suffix: String,
    /// Whether keys built through [`AuditConfig::property`] record modified
    /// flags.
    pub global_with_modified_flag: bool,
    /// Field holding the runtime type of a JSON instance.
    pub type_field: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            modified_flag_suffix: DEFAULT_MODIFIED_FLAG_SUFFIX.to_string(),
            global_with_modified_flag: true,
            type_field: DEFAULT_TYPE_FIELD.to_string(),
        }
    }
}

impl AuditConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> MapperResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a property key following this configuration's flag settings.
    #[must_use]
    pub fn property(&self, name: &str) -> PropertyKey {
        let key = PropertyKey::new(name);
        if self.global_with_modified_flag {
            key.with_modified_flag_suffix(&self.modified_flag_suffix)
        } else {
            key.without_modified_flag()
        }
    }
}
