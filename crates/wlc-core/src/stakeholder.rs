//! Attribution rules and stakeholder totals.

use crate::cashflow::PhaseBreakdown;
use crate::component::{ComponentId, CostKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which components an attribution rule applies to.
///
/// Selection is resolved against the in-memory component set, never against
/// a storage layer, so it is testable independently of any backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Selection {
    /// Every component in the analysis
    All,

    /// An explicit list of component ids
    Components { ids: Vec<ComponentId> },

    /// Components whose classification contains the filter, case-insensitively
    Classification { filter: String },
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "all components"),
            Selection::Components { ids } => write!(f, "{} explicit component id(s)", ids.len()),
            Selection::Classification { filter } => {
                write!(f, "classification contains '{}'", filter)
            }
        }
    }
}

/// A percentage-based responsibility rule.
///
/// Rules are independent and order-insensitive. Applying the same rule twice
/// double-counts by design; deduplication is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRule {
    /// The responsible party
    pub stakeholder_id: String,

    /// Components the rule covers
    pub selection: Selection,

    /// Phases the rule covers
    pub cost_kinds: Vec<CostKind>,

    /// Share of each covered (component, phase) life-cycle total, in (0, 100]
    pub percentage: f64,
}

/// Computed responsibility for one stakeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StakeholderTotal {
    /// Total attributed cost across all rules and phases
    pub total_cost: f64,

    /// Attributed cost per phase
    pub by_kind: PhaseBreakdown,

    /// Number of distinct components the stakeholder is responsible for
    pub component_count: usize,

    /// Number of rules that contributed to this stakeholder
    pub attribution_count: usize,

    /// Share of all attributed cost, in percent (0 when nothing is attributed)
    pub responsibility_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_serde_tagging() {
        let selection = Selection::Classification {
            filter: "walls".to_string(),
        };
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"type":"classification","filter":"walls"}"#);

        let all: Selection = serde_json::from_str(r#"{"type":"all"}"#).unwrap();
        assert_eq!(all, Selection::All);
    }

    #[test]
    fn test_rule_roundtrip() {
        let rule = AttributionRule {
            stakeholder_id: "owner".to_string(),
            selection: Selection::Components {
                ids: vec![ComponentId::new("wall-1")],
            },
            cost_kinds: vec![CostKind::Construction, CostKind::EndOfLife],
            percentage: 50.0,
        };
        let json = serde_json::to_string(&rule).unwrap();
        let back: AttributionRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
