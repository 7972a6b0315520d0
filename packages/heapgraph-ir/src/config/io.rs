//! Configuration I/O (YAML)
//!
//! Defines the versioned YAML schema. Section overrides are merged key by key
//! onto the chosen preset, so a file only lists what it changes:
//!
//! ```yaml
//! version: 1
//! preset: fast
//! enumeration:
//!   max_branches: 500
//!   time_budget_ms: null   # explicit null removes the cap
//! retained_size:
//!   strategy: path_self_size
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::error::{ConfigError, ConfigResult};

/// Only supported schema version
pub const CONFIG_VERSION: u32 = 1;

/// YAML Schema v1
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset_name")]
    pub preset: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoder: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retained_size: Option<Value>,
}

fn default_preset_name() -> String {
    "balanced".to_string()
}

impl ConfigFileV1 {
    /// Reject files without `version: 1`
    pub fn check_version(&self) -> ConfigResult<()> {
        match self.version {
            None => Err(ConfigError::MissingVersion),
            Some(CONFIG_VERSION) => Ok(()),
            Some(found) => Err(ConfigError::UnsupportedVersion {
                found,
                supported: vec![CONFIG_VERSION],
            }),
        }
    }
}

/// Merge `patch` (a YAML mapping) onto `base` key by key
///
/// Keys the section does not have are reported with a spelling suggestion.
pub fn overlay<T>(base: &T, patch: Option<Value>, section: &str) -> ConfigResult<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Some(patch) = patch else {
        return Ok(base.clone());
    };

    let mut merged = match serde_yaml::to_value(base)? {
        Value::Mapping(map) => map,
        _ => Mapping::new(),
    };

    let patch = match patch {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        other => {
            return Err(ConfigError::Validation(format!(
                "section '{}' must be a mapping, found {:?}",
                section, other
            )))
        }
    };

    let valid_fields: Vec<String> = merged
        .keys()
        .filter_map(|k| k.as_str().map(str::to_owned))
        .collect();

    for (key, value) in patch {
        let known = key
            .as_str()
            .map(|k| valid_fields.iter().any(|f| f == k))
            .unwrap_or(false);
        if !known {
            let field = key.as_str().map(str::to_owned).unwrap_or_else(|| format!("{:?}", key));
            return Err(ConfigError::unknown_field_with_suggestion(
                field,
                section,
                valid_fields,
            ));
        }
        merged.insert(key, value);
    }

    Ok(serde_yaml::from_value(Value::Mapping(merged))?)
}
