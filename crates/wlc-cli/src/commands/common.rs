//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use wlc_core::{AttributionRule, Component, ComponentId, Config, CostFact, Project};

use crate::cli::GlobalArgs;

/// Everything one analysis run needs, read from a single JSON file (and
/// accepted verbatim as the body of the HTTP endpoints).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AnalysisInput {
    /// Project horizon and discount schedule
    pub project: Project,

    /// Components under analysis
    #[serde(default)]
    pub components: Vec<Component>,

    /// Nominal cost facts
    #[serde(default)]
    pub facts: Vec<CostFact>,

    /// Attribution rules (may be empty when only distribution is wanted)
    #[serde(default)]
    pub rules: Vec<AttributionRule>,
}

impl AnalysisInput {
    /// Index components by id. A duplicated id keeps the last occurrence,
    /// with a warning; the fact-level duplicate check still applies.
    pub fn component_map(&self) -> BTreeMap<ComponentId, Component> {
        let mut map = BTreeMap::new();
        for component in &self.components {
            if map.insert(component.id.clone(), component.clone()).is_some() {
                log::warn!(
                    "component '{}' appears more than once in the input, keeping the last entry",
                    component.id
                );
            }
        }
        map
    }
}

/// Resolve the config file path from global args.
fn config_path(global: &GlobalArgs) -> PathBuf {
    match &global.config {
        Some(path) => PathBuf::from(path),
        None => Path::new(&global.project_dir).join("wholelife.yml"),
    }
}

/// Load configuration, falling back to defaults when no config file exists
/// and none was explicitly requested.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let path = config_path(global);
    if global.config.is_none() && !path.exists() {
        log::debug!("no {} found, using default configuration", path.display());
        return Ok(Config::default());
    }
    Config::from_file(&path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load and parse an analysis input file.
pub(crate) fn load_input(path: &str) -> Result<AnalysisInput> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let input: AnalysisInput =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path))?;
    Ok(input)
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a currency amount for pretty output.
pub(crate) fn format_money(value: f64, currency: &str) -> String {
    format!("{:.2} {}", value, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults_to_empty_collections() {
        let input: AnalysisInput =
            serde_json::from_str(r#"{"project": {"lifespan_years": 10}}"#).unwrap();
        assert!(input.components.is_empty());
        assert!(input.facts.is_empty());
        assert!(input.rules.is_empty());
        assert_eq!(input.project.lifespan_years, 10);
    }

    #[test]
    fn test_load_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            verbose: false,
            project_dir: dir.path().display().to_string(),
            config: None,
        };

        let config = load_config(&global).unwrap();
        assert_eq!(config.default_discount_rate, 0.03);
        assert_eq!(config.default_component_lifespan, 60);
    }

    #[test]
    fn test_load_config_reads_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("wholelife.yml"),
            "name: tower_block\ncomparison_tolerance: 0.5\n",
        )
        .unwrap();
        let global = GlobalArgs {
            verbose: false,
            project_dir: dir.path().display().to_string(),
            config: None,
        };

        let config = load_config(&global).unwrap();
        assert_eq!(config.name, "tower_block");
        assert_eq!(config.comparison_tolerance, 0.5);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            verbose: false,
            project_dir: ".".to_string(),
            config: Some(dir.path().join("nope.yml").display().to_string()),
        };

        assert!(load_config(&global).is_err());
    }

    #[test]
    fn test_component_map_keeps_last_duplicate() {
        let input: AnalysisInput = serde_json::from_str(
            r#"{
                "project": {"lifespan_years": 10},
                "components": [
                    {"id": "c1", "material": "steel"},
                    {"id": "c1", "material": "timber"}
                ]
            }"#,
        )
        .unwrap();

        let map = input.component_map();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map[&ComponentId::new("c1")].material.as_deref(),
            Some("timber")
        );
    }
}
