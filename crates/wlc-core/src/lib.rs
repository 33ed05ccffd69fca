//! wlc-core - Core library for wholelife
//!
//! This crate provides the shared types, configuration parsing, and snapshot
//! persistence used across all wholelife components: the cost data model
//! (components, cost facts, projects), the derived structures produced by the
//! engines (cash-flow series, phase and stakeholder totals), and the durable
//! analysis snapshot format.

pub mod cashflow;
pub mod component;
pub mod config;
pub mod error;
pub mod project;
pub mod snapshot;
pub mod stakeholder;

pub use cashflow::{
    CashFlowYear, ComponentTotal, DistributionResult, PhaseBreakdown, PhaseTotal,
};
pub use component::{Component, ComponentId, CostFact, CostKind};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use project::Project;
pub use snapshot::{compute_checksum, AnalysisSnapshot};
pub use stakeholder::{AttributionRule, Selection, StakeholderTotal};
