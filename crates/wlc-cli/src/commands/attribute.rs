//! Attribute command implementation
//!
//! Runs distribution to obtain per-component life-cycle totals, then
//! apportions them to stakeholders according to the input's rules.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use wlc_core::StakeholderTotal;

use crate::cli::{AttributeArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{format_money, load_config, load_input, print_json};

/// Execute the attribute command
pub async fn execute(args: &AttributeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let input = load_input(&args.input)?;
    let components = input.component_map();

    let distribution =
        wlc_engine::distribute(&input.facts, &components, &input.project, &config)
            .context("Distribution failed")?;
    let stakeholders =
        wlc_engine::attribute(&input.rules, &components, &distribution.components)
            .context("Attribution failed")?;

    match args.output {
        OutputFormat::Json => print_json(&stakeholders),
        OutputFormat::Pretty => {
            print_pretty(&stakeholders, &config.currency);
            Ok(())
        }
    }
}

fn print_pretty(stakeholders: &BTreeMap<String, StakeholderTotal>, currency: &str) {
    if stakeholders.is_empty() {
        println!("No attribution rules in input; nothing to apportion.");
        return;
    }

    println!("Stakeholder responsibility:");
    println!(
        "{:<24} {:>16} {:>12} {:>12} {:>8}",
        "Stakeholder", "Total", "Share", "Components", "Rules"
    );
    for (id, total) in stakeholders {
        println!(
            "{:<24} {:>16} {:>11.1}% {:>12} {:>8}",
            id,
            format_money(total.total_cost, currency),
            total.responsibility_percent,
            total.component_count,
            total.attribution_count,
        );
    }
}
