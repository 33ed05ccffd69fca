//! Error types for wlc-engine

use thiserror::Error;
use wlc_core::{ComponentId, CostKind};

/// Engine error type
///
/// These use the `W` prefix (WLC) to avoid collisions with wlc-core's `C`
/// codes. All engines fail fast: no partial cash-flow series or partially
/// accumulated totals ever escape alongside an error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// W001: Negative or non-finite nominal cost value
    #[error("[W001] Invalid nominal value {value} for component '{component}' ({kind})")]
    InvalidNominalValue {
        component: ComponentId,
        kind: CostKind,
        value: f64,
    },

    /// W002: More than one cost fact for the same (component, kind) pair
    #[error("[W002] Duplicate {kind} cost fact for component '{component}'")]
    DuplicateFact {
        component: ComponentId,
        kind: CostKind,
    },

    /// W003: Attribution percentage outside (0, 100]
    #[error(
        "[W003] Attribution percentage {percentage} for stakeholder '{stakeholder}' is outside (0, 100]"
    )]
    InvalidPercentage {
        stakeholder: String,
        percentage: f64,
    },

    /// W004: Selection matched no components
    #[error("[W004] Selection for stakeholder '{stakeholder}' matched no components ({selection})")]
    EmptySelection {
        stakeholder: String,
        selection: String,
    },

    /// W005: Cost fact references a component absent from the model
    #[error("[W005] Cost fact references unknown component '{component}'")]
    UnknownComponent { component: ComponentId },

    /// W006: Component with a recorded lifespan of zero years
    #[error("[W006] Component '{component}' has a zero-year lifespan")]
    InvalidLifespan { component: ComponentId },

    /// W007: Core error propagation
    #[error("[W007] Core error: {0}")]
    Core(#[from] wlc_core::CoreError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
