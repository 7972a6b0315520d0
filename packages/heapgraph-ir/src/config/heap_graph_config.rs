//! Top-level configuration
//!
//! ```rust,ignore
//! use heapgraph_ir::config::{HeapGraphConfig, Preset};
//!
//! // Preset only
//! let config = HeapGraphConfig::preset(Preset::Fast);
//!
//! // Preset plus section overrides
//! let config = HeapGraphConfig::preset(Preset::Balanced)
//!     .enumeration(|c| c.max_branches(Some(50_000)).emit_dead_ends(true));
//!
//! // YAML file
//! let config = HeapGraphConfig::from_yaml("heapgraph.yaml")?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::error::ConfigResult;
use super::io::{overlay, ConfigFileV1, CONFIG_VERSION};
use super::preset::Preset;
use super::stage_configs::{DecoderConfig, EnumerationConfig, RetainedSizeConfig};
use super::validation::Validatable;

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapGraphConfig {
    pub preset: Preset,
    pub decoder: DecoderConfig,
    pub enumeration: EnumerationConfig,
    pub retained_size: RetainedSizeConfig,
}

impl HeapGraphConfig {
    /// Complete configuration for a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            decoder: DecoderConfig::from_preset(preset),
            enumeration: EnumerationConfig::from_preset(preset),
            retained_size: RetainedSizeConfig::from_preset(preset),
        }
    }

    /// Adjust the decoder section
    pub fn decoder(mut self, f: impl FnOnce(DecoderConfig) -> DecoderConfig) -> Self {
        self.decoder = f(self.decoder);
        self
    }

    /// Adjust the enumeration section
    pub fn enumeration(mut self, f: impl FnOnce(EnumerationConfig) -> EnumerationConfig) -> Self {
        self.enumeration = f(self.enumeration);
        self
    }

    /// Adjust the retained-size section
    pub fn retained_size(
        mut self,
        f: impl FnOnce(RetainedSizeConfig) -> RetainedSizeConfig,
    ) -> Self {
        self.retained_size = f(self.retained_size);
        self
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        let sections: [&dyn Validatable; 3] =
            [&self.decoder, &self.enumeration, &self.retained_size];
        for section in sections {
            if let Err(e) = section.validate() {
                debug!(section = section.config_name(), error = %e, "Configuration section rejected");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;
        file.check_version()?;

        let base = Self::preset(file.preset.parse()?);
        let config = Self {
            preset: base.preset,
            decoder: overlay(&base.decoder, file.decoder, "decoder")?,
            enumeration: overlay(&base.enumeration, file.enumeration, "enumeration")?,
            retained_size: overlay(&base.retained_size, file.retained_size, "retained_size")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Export as a complete v1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(CONFIG_VERSION),
            preset: self.preset.to_string(),
            decoder: Some(serde_yaml::to_value(&self.decoder)?),
            enumeration: Some(serde_yaml::to_value(&self.enumeration)?),
            retained_size: Some(serde_yaml::to_value(self.retained_size)?),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Default for HeapGraphConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}
