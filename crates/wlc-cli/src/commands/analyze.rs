//! Analyze command implementation
//!
//! The full pipeline: distribute, attribute, and bundle the results into an
//! analysis snapshot. With `--output`, the snapshot is written to disk for
//! later use as the "previous" side of a comparison.

use anyhow::{Context, Result};
use std::path::Path;
use wlc_core::AnalysisSnapshot;

use crate::cli::{AnalyzeArgs, GlobalArgs};
use crate::commands::common::{format_money, load_config, load_input, print_json};

/// Execute the analyze command
pub async fn execute(args: &AnalyzeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let input = load_input(&args.input)?;
    let components = input.component_map();

    let distribution =
        wlc_engine::distribute(&input.facts, &components, &input.project, &config)
            .context("Distribution failed")?;
    let stakeholders =
        wlc_engine::attribute(&input.rules, &components, &distribution.components)
            .context("Attribution failed")?;

    let snapshot = AnalysisSnapshot::build(&input.project, &distribution, stakeholders);

    match &args.output {
        Some(path) => {
            snapshot
                .save(Path::new(path))
                .with_context(|| format!("Failed to write snapshot to {}", path))?;
            println!(
                "Wrote snapshot {} ({} component(s), total WLC {} nominal / {} discounted)",
                path,
                snapshot.component_count,
                format_money(snapshot.total_nominal_wlc, &config.currency),
                format_money(snapshot.total_discounted_wlc, &config.currency),
            );
            Ok(())
        }
        None => print_json(&snapshot),
    }
}
