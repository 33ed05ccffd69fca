//! Temporal distribution and NPV engine.
//!
//! Turns per-component nominal cost facts into a year-by-year cash-flow
//! series over the project horizon and discounts it to present value.
//!
//! Placement rules, per cost kind:
//!
//! - **Construction**: the whole amount at year 0.
//! - **Operation**: the annual amount in every year of `[1, N-1]` — not at
//!   year 0 and not in the final year.
//! - **Maintenance**: the per-event amount at every positive multiple of the
//!   component lifespan strictly below N. A multiple landing exactly on N is
//!   demolition, covered by end-of-life, not a mid-life replacement.
//! - **EndOfLife**: the whole amount at year N, unconditionally.

use std::collections::{BTreeMap, BTreeSet};

use wlc_core::{
    CashFlowYear, Component, ComponentId, ComponentTotal, Config, CostFact, CostKind,
    DistributionResult, PhaseBreakdown, PhaseTotal, Project,
};

use crate::error::{EngineError, EngineResult};

/// Number of years an annual operation cost recurs over horizon `n`.
pub fn operation_years(n: u32) -> u32 {
    n.saturating_sub(1)
}

/// Replacement years for a component of lifespan `l` over horizon `n`:
/// every positive multiple of `l` strictly below `n`.
pub fn replacement_years(l: u32, n: u32) -> Vec<u32> {
    debug_assert!(l > 0);
    (1..)
        .map(|k| k * l)
        .take_while(|&year| year < n)
        .collect()
}

/// Distribute cost facts over the project horizon and discount to present
/// value.
///
/// Returns the full cash-flow series (one entry per year `0..=N`), the
/// aggregate life-cycle totals per phase, and per-component life-cycle
/// totals. Fails fast on invalid input: negative or non-finite nominal
/// values, duplicate (component, kind) facts, facts referencing components
/// absent from `components`, or recorded zero-year lifespans.
pub fn distribute(
    facts: &[CostFact],
    components: &BTreeMap<ComponentId, Component>,
    project: &Project,
    config: &Config,
) -> EngineResult<DistributionResult> {
    project.validate()?;

    let n = project.lifespan_years;

    // Validate facts before distributing anything.
    let mut seen: BTreeSet<(&ComponentId, CostKind)> = BTreeSet::new();
    for fact in facts {
        if !fact.nominal_value.is_finite() || fact.nominal_value < 0.0 {
            return Err(EngineError::InvalidNominalValue {
                component: fact.component_id.clone(),
                kind: fact.kind,
                value: fact.nominal_value,
            });
        }
        if !components.contains_key(&fact.component_id) {
            return Err(EngineError::UnknownComponent {
                component: fact.component_id.clone(),
            });
        }
        if !seen.insert((&fact.component_id, fact.kind)) {
            return Err(EngineError::DuplicateFact {
                component: fact.component_id.clone(),
                kind: fact.kind,
            });
        }
    }

    // Every component appears in the totals, facts or not; ones without
    // facts carry zeros.
    let mut component_totals: BTreeMap<ComponentId, ComponentTotal> = components
        .keys()
        .map(|id| (id.clone(), ComponentTotal::default()))
        .collect();

    let mut construction_at_year0 = 0.0;
    let mut operation_annual = 0.0;
    let mut maintenance_by_year: BTreeMap<u32, f64> = BTreeMap::new();
    let mut end_of_life_at_n = 0.0;

    for fact in facts {
        let component = &components[&fact.component_id];
        let lifecycle_value = match fact.kind {
            CostKind::Construction => {
                construction_at_year0 += fact.nominal_value;
                fact.nominal_value
            }
            CostKind::Operation => {
                operation_annual += fact.nominal_value;
                fact.nominal_value * f64::from(operation_years(n))
            }
            CostKind::Maintenance => {
                let lifespan = effective_lifespan(component, config)?;
                let years = replacement_years(lifespan, n);
                for &year in &years {
                    *maintenance_by_year.entry(year).or_insert(0.0) += fact.nominal_value;
                }
                fact.nominal_value * years.len() as f64
            }
            CostKind::EndOfLife => {
                end_of_life_at_n += fact.nominal_value;
                fact.nominal_value
            }
        };

        let totals = component_totals.entry(fact.component_id.clone()).or_default();
        totals.by_kind.add(fact.kind, lifecycle_value);
        totals.total += lifecycle_value;
    }

    // Build the year series.
    let mut cash_flow = Vec::with_capacity(n as usize + 1);
    let mut total_nominal = 0.0;
    let mut total_discounted = 0.0;
    let mut rate_weighted_sum = 0.0;

    for year in 0..=n {
        let mut breakdown = PhaseBreakdown::default();
        if year == 0 {
            breakdown.construction = construction_at_year0;
        }
        if year >= 1 && year < n {
            breakdown.operation = operation_annual;
        }
        if let Some(&maintenance) = maintenance_by_year.get(&year) {
            breakdown.maintenance = maintenance;
        }
        if year == n {
            breakdown.end_of_life = end_of_life_at_n;
        }

        let nominal = breakdown.total();
        let rate = project.rate_for_year(year, config.default_discount_rate);
        let discounted = nominal / (1.0 + rate).powi(year as i32);

        total_nominal += nominal;
        total_discounted += discounted;
        rate_weighted_sum += rate * nominal;

        cash_flow.push(CashFlowYear {
            year,
            nominal,
            discounted,
            discount_rate: rate,
            breakdown,
        });
    }

    // Degenerate N = 0 horizon: construction and demolition share year 0.
    debug_assert_eq!(cash_flow.len(), n as usize + 1);

    let phase_totals = build_phase_totals(&component_totals, total_nominal);

    // Nothing may be created or lost in distribution.
    debug_assert!(
        (phase_totals.values().map(|t| t.value).sum::<f64>() - total_nominal).abs() < 1e-6,
        "phase totals diverged from the cash-flow series"
    );

    let weighted_discount_rate = if total_nominal > 0.0 {
        rate_weighted_sum / total_nominal
    } else {
        config.default_discount_rate
    };

    log::debug!(
        "distributed {} fact(s) over {} year(s): nominal {:.2}, discounted {:.2}",
        facts.len(),
        n + 1,
        total_nominal,
        total_discounted
    );

    Ok(DistributionResult {
        cash_flow,
        phase_totals,
        components: component_totals,
        total_nominal_wlc: total_nominal,
        total_discounted_wlc: total_discounted,
        weighted_discount_rate,
    })
}

/// The lifespan used for a component's replacement arithmetic.
fn effective_lifespan(component: &Component, config: &Config) -> EngineResult<u32> {
    match component.lifespan_years {
        Some(0) => Err(EngineError::InvalidLifespan {
            component: component.id.clone(),
        }),
        Some(lifespan) => Ok(lifespan),
        None => {
            log::debug!(
                "component '{}' has no recorded lifespan, using default of {} years",
                component.id,
                config.default_component_lifespan
            );
            Ok(config.default_component_lifespan)
        }
    }
}

/// Aggregate per-component totals into phase totals with their share of the
/// project nominal WLC.
fn build_phase_totals(
    component_totals: &BTreeMap<ComponentId, ComponentTotal>,
    total_nominal: f64,
) -> BTreeMap<CostKind, PhaseTotal> {
    let mut totals = BTreeMap::new();
    for kind in CostKind::ALL {
        let value: f64 = component_totals
            .values()
            .map(|t| t.by_kind.get(kind))
            .sum();
        let percent_of_total = if total_nominal > 0.0 {
            value / total_nominal * 100.0
        } else {
            0.0
        };
        totals.insert(
            kind,
            PhaseTotal {
                value,
                percent_of_total,
            },
        );
    }
    totals
}

#[cfg(test)]
#[path = "distribution_test.rs"]
mod tests;
