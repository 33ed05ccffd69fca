//! Compare command implementation
//!
//! Loads two exported snapshots and renders the tolerance-aware change
//! report, ranked by impact.

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use std::path::Path;
use wlc_core::AnalysisSnapshot;
use wlc_engine::ComparisonReport;

use crate::cli::{CompareArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{format_money, load_config, print_json};

/// Execute the compare command
pub async fn execute(args: &CompareArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;

    let current = AnalysisSnapshot::load(Path::new(&args.current))
        .with_context(|| format!("Failed to load current snapshot {}", args.current))?;
    let previous = AnalysisSnapshot::load(Path::new(&args.previous))
        .with_context(|| format!("Failed to load previous snapshot {}", args.previous))?;

    let tolerance = args.tolerance.unwrap_or(config.comparison_tolerance);
    if global.verbose {
        eprintln!(
            "[verbose] Comparing {} against {} with tolerance {}",
            args.current, args.previous, tolerance
        );
    }

    let report = wlc_engine::compare(&current, &previous, tolerance);

    match args.output {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Pretty => {
            print_pretty(&report, &config.currency);
            Ok(())
        }
    }
}

fn print_pretty(report: &ComparisonReport, currency: &str) {
    println!(
        "Comparison: {} vs {}",
        report.current_date.to_rfc3339_opts(SecondsFormat::Secs, true),
        report.previous_date.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    if report.horizon_mismatch {
        println!("WARNING: snapshots were computed over different horizons");
    }
    println!();
    println!("Impact: {}", report.main_impact);
    println!();
    println!(
        "WLC nominal:    {} -> {}  ({:+.2}, {:+.2}%)",
        format_money(report.nominal_wlc.previous, currency),
        format_money(report.nominal_wlc.current, currency),
        report.nominal_wlc.delta,
        report.nominal_wlc.percent,
    );
    println!(
        "WLC discounted: {} -> {}  ({:+.2}, {:+.2}%)",
        format_money(report.discounted_wlc.previous, currency),
        format_money(report.discounted_wlc.current, currency),
        report.discounted_wlc.delta,
        report.discounted_wlc.percent,
    );

    if !report.stakeholder_changes.is_empty() {
        println!();
        println!("Stakeholder changes:");
        for (id, delta) in &report.stakeholder_changes {
            println!(
                "  {:<24} {} -> {}  ({:+.2})",
                id,
                format_money(delta.previous, currency),
                format_money(delta.current, currency),
                delta.delta,
            );
        }
    }

    if report.ranked_changes.is_empty() {
        println!();
        println!("No changes above tolerance.");
        return;
    }

    println!();
    println!("Ranked changes:");
    for (rank, change) in report.ranked_changes.iter().enumerate() {
        let percent = change
            .percent_change
            .map(|p| format!("{:+.1}%", p))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:>4}. {:<44} {} -> {}  ({:+.2}, {})",
            rank + 1,
            change.description,
            format_money(change.previous_value, currency),
            format_money(change.current_value, currency),
            change.delta,
            percent,
        );
    }
}
