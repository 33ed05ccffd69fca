//! Cash-flow series and life-cycle total types derived by the distribution
//! engine.
//!
//! Everything here is plain derived data: the engines produce these values,
//! snapshots persist them, and the comparison engine consumes them. Maps are
//! `BTreeMap` throughout so that serialized output is byte-stable for equal
//! inputs.

use crate::component::{ComponentId, CostKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nominal amounts of one year (or one total) broken down by life-cycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    #[serde(default)]
    pub construction: f64,
    #[serde(default)]
    pub operation: f64,
    #[serde(default)]
    pub maintenance: f64,
    #[serde(default)]
    pub end_of_life: f64,
}

impl PhaseBreakdown {
    /// The amount recorded for one phase.
    pub fn get(&self, kind: CostKind) -> f64 {
        match kind {
            CostKind::Construction => self.construction,
            CostKind::Operation => self.operation,
            CostKind::Maintenance => self.maintenance,
            CostKind::EndOfLife => self.end_of_life,
        }
    }

    /// Add an amount to one phase.
    pub fn add(&mut self, kind: CostKind, amount: f64) {
        match kind {
            CostKind::Construction => self.construction += amount,
            CostKind::Operation => self.operation += amount,
            CostKind::Maintenance => self.maintenance += amount,
            CostKind::EndOfLife => self.end_of_life += amount,
        }
    }

    /// Sum across all phases.
    pub fn total(&self) -> f64 {
        self.construction + self.operation + self.maintenance + self.end_of_life
    }
}

/// One year of the distributed cash-flow series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowYear {
    /// Year index, 0..=N
    pub year: u32,

    /// Sum of all nominal contributions placed in this year
    pub nominal: f64,

    /// Present value: `nominal / (1 + discount_rate)^year`
    pub discounted: f64,

    /// The rate applied to this year
    pub discount_rate: f64,

    /// Nominal contributions by phase
    pub breakdown: PhaseBreakdown,
}

/// Life-cycle total for one phase across the whole horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTotal {
    /// Nominal life-cycle value of the phase
    pub value: f64,

    /// Share of the project's total nominal WLC, in percent
    pub percent_of_total: f64,
}

/// Life-cycle totals for one component, by phase and overall.
///
/// These are lifecycle values, not raw facts: operation and maintenance
/// amounts are already multiplied out over the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentTotal {
    /// Life-cycle value per phase
    pub by_kind: PhaseBreakdown,

    /// Sum across phases
    pub total: f64,
}

/// Everything the distribution engine derives from one set of facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    /// Year-indexed series, one entry per year 0..=N
    pub cash_flow: Vec<CashFlowYear>,

    /// Life-cycle totals per phase (all four kinds always present)
    pub phase_totals: BTreeMap<CostKind, PhaseTotal>,

    /// Life-cycle totals per component
    pub components: BTreeMap<ComponentId, ComponentTotal>,

    /// Sum of nominal values across the series
    pub total_nominal_wlc: f64,

    /// Sum of discounted values across the series
    pub total_discounted_wlc: f64,

    /// Nominal-weighted mean of the applied discount rates
    pub weighted_discount_rate: f64,
}
