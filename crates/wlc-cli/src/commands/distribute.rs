//! Distribute command implementation
//!
//! Reads an analysis input file, distributes the cost facts over the
//! project horizon, and prints the cash-flow series and totals.

use anyhow::{Context, Result};
use wlc_core::{CostKind, DistributionResult};

use crate::cli::{DistributeArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{format_money, load_config, load_input, print_json};

/// Execute the distribute command
pub async fn execute(args: &DistributeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let input = load_input(&args.input)?;
    let components = input.component_map();

    if global.verbose {
        eprintln!(
            "[verbose] Distributing {} fact(s) across {} component(s) over {} year(s)",
            input.facts.len(),
            components.len(),
            input.project.lifespan_years + 1
        );
    }

    let result = wlc_engine::distribute(&input.facts, &components, &input.project, &config)
        .context("Distribution failed")?;

    match args.output {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Pretty => {
            print_pretty(&result, &config.currency);
            Ok(())
        }
    }
}

fn print_pretty(result: &DistributionResult, currency: &str) {
    println!("Cash flow by year:");
    println!("{:>6}  {:>7}  {:>16}  {:>16}", "Year", "Rate", "Nominal", "Discounted");
    for year in &result.cash_flow {
        println!(
            "{:>6}  {:>6.2}%  {:>16}  {:>16}",
            year.year,
            year.discount_rate * 100.0,
            format_money(year.nominal, currency),
            format_money(year.discounted, currency),
        );
    }

    println!();
    println!("Life-cycle totals by phase:");
    for kind in CostKind::ALL {
        let total = &result.phase_totals[&kind];
        println!(
            "  {:<14} {:>16}  ({:.1}% of total)",
            kind.label(),
            format_money(total.value, currency),
            total.percent_of_total
        );
    }

    println!();
    println!(
        "Total WLC (nominal):    {}",
        format_money(result.total_nominal_wlc, currency)
    );
    println!(
        "Total WLC (discounted): {}",
        format_money(result.total_discounted_wlc, currency)
    );
    println!(
        "Weighted discount rate: {:.2}%",
        result.weighted_discount_rate * 100.0
    );
}
