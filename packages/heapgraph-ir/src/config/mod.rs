//! Configuration System
//!
//! Three levels, from simple to complete:
//! - Preset: `HeapGraphConfig::preset(Preset::Fast)`
//! - Section override: `.enumeration(|c| c.max_branches(Some(1_000)))`
//! - YAML file: `HeapGraphConfig::from_yaml("heapgraph.yaml")`

pub mod error;
pub mod heap_graph_config;
pub mod io;
pub mod preset;
pub mod stage_configs;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use heap_graph_config::HeapGraphConfig;
pub use io::{ConfigFileV1, CONFIG_VERSION};
pub use preset::Preset;
pub use stage_configs::{DecoderConfig, EnumerationConfig, RetainedSizeConfig};
pub use validation::Validatable;
