//! Configuration types and parsing for wholelife.yml
//!
//! The engines themselves are stateless; every default that used to live as
//! a per-call-site literal in the system this tool replaces (discount rate,
//! fallback component lifespan, comparison tolerance) is a named field here
//! and threaded through explicitly.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main project configuration from wholelife.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Discount rate applied to years absent from a project's schedule
    #[serde(default = "default_discount_rate")]
    pub default_discount_rate: f64,

    /// Service life in years assumed for components without a recorded lifespan
    #[serde(default = "default_component_lifespan")]
    pub default_component_lifespan: u32,

    /// Differences below this many currency units are reported as zero
    #[serde(default = "default_comparison_tolerance")]
    pub comparison_tolerance: f64,

    /// Currency label used in rendered reports
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_discount_rate() -> f64 {
    0.03
}

fn default_component_lifespan() -> u32 {
    60
}

fn default_comparison_tolerance() -> f64 {
    0.01
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "wholelife".to_string(),
            version: default_version(),
            default_discount_rate: default_discount_rate(),
            default_component_lifespan: default_component_lifespan(),
            comparison_tolerance: default_comparison_tolerance(),
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        if !self.default_discount_rate.is_finite() || self.default_discount_rate <= -1.0 {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "default_discount_rate {} must be finite and greater than -1.0",
                    self.default_discount_rate
                ),
            });
        }
        if self.default_component_lifespan == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "default_component_lifespan must be at least 1 year".to_string(),
            });
        }
        if !self.comparison_tolerance.is_finite() || self.comparison_tolerance < 0.0 {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "comparison_tolerance {} must be finite and non-negative",
                    self.comparison_tolerance
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
