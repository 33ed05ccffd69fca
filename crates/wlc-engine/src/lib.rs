//! wlc-engine: the whole-life-cost computation engines
//!
//! Three pure, synchronous engines over in-memory inputs:
//!
//! - [`distribute`] maps per-component nominal cost facts to a year-indexed
//!   cash-flow series, discounts it to present value, and derives life-cycle
//!   totals per phase and per component.
//! - [`attribute`] apportions those life-cycle totals to stakeholders via
//!   percentage-based rules.
//! - [`compare`] diffs two fully-computed analysis snapshots into a
//!   tolerance-aware, ranked change report.
//!
//! The engines hold no state, perform no I/O, and either return a complete
//! result or fail fast with a typed error.

pub mod attribution;
pub mod comparison;
pub mod distribution;
pub mod error;

pub use attribution::attribute;
pub use comparison::{
    compare, ChangeKind, ComparisonReport, ComponentChange, ComponentDiff, RankedChange,
    ScalarDelta, DEFAULT_TOLERANCE,
};
pub use distribution::{distribute, operation_years, replacement_years};
pub use error::{EngineError, EngineResult};
