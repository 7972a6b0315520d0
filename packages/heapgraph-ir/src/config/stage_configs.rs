//! Per-stage configuration sections
//!
//! One section per pipeline stage: decoding, branch enumeration and
//! retained-size aggregation. Each section can be built from a preset,
//! adjusted with builder methods and validated on its own.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use crate::features::retained_size::domain::AggregationStrategy;

// ═══════════════════════════════════════════════════════════════════════════
// Decoder
// ═══════════════════════════════════════════════════════════════════════════

/// Snapshot decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Edge types whose position-1 value is a raw element/hidden ordinal
    /// instead of a string-table index. Empty list: every edge name goes
    /// through the string table.
    pub numeric_name_edge_types: Vec<String>,
}

impl DecoderConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            numeric_name_edge_types: vec!["element".to_string(), "hidden".to_string()],
        }
    }

    /// Builder: replace the numeric-name edge types
    pub fn numeric_name_edge_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_name_edge_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(empty) = self.numeric_name_edge_types.iter().position(|t| t.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "numeric_name_edge_types[{}] is empty",
                empty
            )));
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Branch enumeration
// ═══════════════════════════════════════════════════════════════════════════

/// Branch enumeration caps
///
/// `None` means unbounded for each cap. Enumeration cost is exponential in the
/// branching factor, so production callers should keep at least one cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnumerationConfig {
    /// Stop after this many branches (whole call, not per start node)
    pub max_branches: Option<usize>,

    /// Paths reaching this many steps are emitted without further expansion
    pub max_depth: Option<usize>,

    /// Wall-clock budget for one enumeration call
    pub time_budget_ms: Option<u64>,

    /// Also emit the path when a node has outgoing edges but none of them can
    /// be followed (every target already on the path or dangling)
    pub emit_dead_ends: bool,
}

impl EnumerationConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                max_branches: Some(10_000),
                max_depth: Some(64),
                time_budget_ms: Some(1_000),
                emit_dead_ends: false,
            },
            Preset::Balanced => Self {
                max_branches: Some(1_000_000),
                max_depth: Some(4_096),
                time_budget_ms: Some(30_000),
                emit_dead_ends: false,
            },
            Preset::Thorough | Preset::Custom => Self::unbounded(),
        }
    }

    /// No caps at all
    pub fn unbounded() -> Self {
        Self {
            max_branches: None,
            max_depth: None,
            time_budget_ms: None,
            emit_dead_ends: false,
        }
    }

    /// Builder: Set max_branches
    pub fn max_branches(mut self, v: Option<usize>) -> Self {
        self.max_branches = v;
        self
    }

    /// Builder: Set max_depth
    pub fn max_depth(mut self, v: Option<usize>) -> Self {
        self.max_depth = v;
        self
    }

    /// Builder: Set time_budget_ms
    pub fn time_budget_ms(mut self, v: Option<u64>) -> Self {
        self.time_budget_ms = v;
        self
    }

    /// Builder: Set emit_dead_ends
    pub fn emit_dead_ends(mut self, v: bool) -> Self {
        self.emit_dead_ends = v;
        self
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_branches.is_none() && self.max_depth.is_none() && self.time_budget_ms.is_none()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_branches == Some(0) {
            return Err(ConfigError::range_with_hint(
                "max_branches",
                0,
                1,
                usize::MAX,
                "Use null for an unbounded enumeration",
            ));
        }

        if self.max_depth == Some(0) {
            return Err(ConfigError::range_with_hint(
                "max_depth",
                0,
                1,
                usize::MAX,
                "A branch always holds its start node, so depth must be at least 1",
            ));
        }

        if self.time_budget_ms == Some(0) {
            return Err(ConfigError::range_with_hint(
                "time_budget_ms",
                0,
                1,
                u64::MAX,
                "Use null to disable the wall-clock budget",
            ));
        }

        Ok(())
    }
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Retained size
// ═══════════════════════════════════════════════════════════════════════════

/// Retained-size aggregation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RetainedSizeConfig {
    pub strategy: AggregationStrategy,
}

impl RetainedSizeConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self::default()
    }

    /// Builder: Set strategy
    pub fn strategy(mut self, strategy: AggregationStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Validatable Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Validatable for DecoderConfig {
    fn validate(&self) -> ConfigResult<()> {
        DecoderConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "decoder"
    }
}

impl Validatable for EnumerationConfig {
    fn validate(&self) -> ConfigResult<()> {
        EnumerationConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "enumeration"
    }
}

impl Validatable for RetainedSizeConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "retained_size"
    }
}
