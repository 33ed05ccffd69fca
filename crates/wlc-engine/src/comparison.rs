//! Snapshot comparison engine.
//!
//! Compares a current analysis snapshot against a previous one and produces
//! a tolerance-aware change report: scalar deltas, phase deltas, stakeholder
//! deltas, a per-component added/removed/modified diff, a single main-impact
//! label, and a ranked change list for audit rendering.
//!
//! The engine trusts the two snapshots as given and never re-derives their
//! numbers from raw facts. Snapshots built with incompatible horizons are
//! still compared; the mismatch is flagged in the report rather than
//! treated as fatal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use wlc_core::{AnalysisSnapshot, ComponentId, CostKind, PhaseBreakdown};

/// Differences smaller than this many currency units are noise.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Direction-preserving delta of one scalar between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarDelta {
    pub current: f64,
    pub previous: f64,

    /// `current - previous`, snapped to 0 below the tolerance
    pub delta: f64,

    /// Relative change in percent (0 when the previous value is 0)
    pub percent: f64,
}

impl ScalarDelta {
    fn between(current: f64, previous: f64, tolerance: f64) -> Self {
        let mut delta = current - previous;
        let mut percent = if previous != 0.0 {
            delta / previous * 100.0
        } else {
            0.0
        };
        if delta.abs() < tolerance {
            delta = 0.0;
            percent = 0.0;
        }
        Self {
            current,
            previous,
            delta,
            percent,
        }
    }

    /// True when the delta was snapped to zero.
    pub fn is_zero(&self) -> bool {
        self.delta == 0.0
    }
}

/// Change of one component between snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentChange {
    pub id: ComponentId,
    pub current_total: f64,
    pub previous_total: f64,

    /// `current_total - previous_total`
    pub delta: f64,

    /// Relative change in percent; `None` for added components, which have
    /// no base to compare against
    pub percent_change: Option<f64>,

    pub current_breakdown: PhaseBreakdown,
    pub previous_breakdown: PhaseBreakdown,
}

/// Per-component diff between two snapshots.
///
/// Sets are computed over component ids with nonzero total cost; unchanged
/// components are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDiff {
    /// Present in current only, sorted by descending total
    pub added: Vec<ComponentChange>,

    /// Present in previous only, sorted by descending total
    pub removed: Vec<ComponentChange>,

    /// Present in both with a cost change at or above the tolerance,
    /// sorted by descending absolute change
    pub modified: Vec<ComponentChange>,
}

impl ComponentDiff {
    /// Total number of component-level changes.
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// What a ranked change entry refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    /// A phase's life-cycle total changed
    PhaseCost { kind: CostKind },
    /// A component is present in current only
    ComponentAdded { id: ComponentId },
    /// A component is present in previous only
    ComponentRemoved { id: ComponentId },
    /// A component's total changed
    ComponentModified { id: ComponentId },
    /// The number of components changed
    ComponentCount,
}

/// One entry of the ranked change list, the primary audit artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedChange {
    pub kind: ChangeKind,

    /// Human-readable one-line description
    pub description: String,

    pub previous_value: f64,
    pub current_value: f64,

    /// Signed magnitude the entry is ranked by
    pub delta: f64,

    /// Relative change in percent, when a base exists
    pub percent_change: Option<f64>,
}

/// The full comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// When the current snapshot was computed
    pub current_date: DateTime<Utc>,

    /// When the previous snapshot was computed
    pub previous_date: DateTime<Utc>,

    /// Nominal WLC evolution
    pub nominal_wlc: ScalarDelta,

    /// Discounted WLC evolution (the main indicator)
    pub discounted_wlc: ScalarDelta,

    /// Phases whose life-cycle total changed at or above the tolerance
    pub phase_changes: BTreeMap<CostKind, ScalarDelta>,

    /// Stakeholders whose attributed total changed at or above the tolerance
    pub stakeholder_changes: BTreeMap<String, ScalarDelta>,

    /// Component-level diff
    pub components: ComponentDiff,

    /// `current component count - previous component count`
    pub component_count_change: i64,

    /// Number of phases with significant changes
    pub phases_affected: usize,

    /// Number of stakeholders with significant changes
    pub stakeholders_affected: usize,

    /// How many change categories were touched (structure, phases,
    /// stakeholders, component costs)
    pub parameters_changed: usize,

    /// The snapshots were built over different horizons; the comparison is
    /// still produced but may not be meaningful
    pub horizon_mismatch: bool,

    /// Single human-readable classification of the dominant change
    pub main_impact: String,

    /// True when nothing changed beyond the tolerance
    pub identical: bool,

    /// All changes, sorted by descending absolute magnitude
    pub ranked_changes: Vec<RankedChange>,
}

/// Compare two analysis snapshots.
///
/// `tolerance` is in currency units; differences below it are reported as
/// zero. Both snapshots must have been produced with compatible
/// configuration (same defaults, same tolerance) for the diff to be
/// meaningful — the engine cannot verify that and does not try.
pub fn compare(
    current: &AnalysisSnapshot,
    previous: &AnalysisSnapshot,
    tolerance: f64,
) -> ComparisonReport {
    let tolerance = tolerance.abs();

    let horizon_mismatch = current.project_lifespan != previous.project_lifespan;
    if horizon_mismatch {
        log::warn!(
            "comparing snapshots with different horizons ({} vs {} years); totals are not directly comparable",
            current.project_lifespan,
            previous.project_lifespan
        );
    }

    let nominal_wlc = ScalarDelta::between(
        current.total_nominal_wlc,
        previous.total_nominal_wlc,
        tolerance,
    );
    let discounted_wlc = ScalarDelta::between(
        current.total_discounted_wlc,
        previous.total_discounted_wlc,
        tolerance,
    );

    let phase_changes = compare_phases(current, previous, tolerance);
    let stakeholder_changes = compare_stakeholders(current, previous, tolerance);
    let components = compare_components(current, previous, tolerance);

    let component_count_change =
        current.component_count as i64 - previous.component_count as i64;

    let phases_affected = phase_changes.len();
    let stakeholders_affected = stakeholder_changes.len();

    let mut parameters_changed = 0;
    if component_count_change != 0 {
        parameters_changed += 1;
    }
    if phases_affected > 0 {
        parameters_changed += 1;
    }
    if stakeholders_affected > 0 {
        parameters_changed += 1;
    }
    if !components.modified.is_empty() {
        parameters_changed += 1;
    }

    let main_impact = classify_main_impact(
        component_count_change,
        discounted_wlc.percent,
        phases_affected,
        stakeholders_affected,
        components.modified.len(),
    );

    let identical = discounted_wlc.is_zero()
        && component_count_change == 0
        && phase_changes.is_empty()
        && stakeholder_changes.is_empty()
        && components.modified.is_empty();

    let ranked_changes = rank_changes(
        &phase_changes,
        &components,
        component_count_change,
        current.component_count,
        previous.component_count,
    );

    ComparisonReport {
        current_date: current.computed_at,
        previous_date: previous.computed_at,
        nominal_wlc,
        discounted_wlc,
        phase_changes,
        stakeholder_changes,
        components,
        component_count_change,
        phases_affected,
        stakeholders_affected,
        parameters_changed,
        horizon_mismatch,
        main_impact,
        identical,
        ranked_changes,
    }
}

/// Phase deltas over the union of phases present in either snapshot.
fn compare_phases(
    current: &AnalysisSnapshot,
    previous: &AnalysisSnapshot,
    tolerance: f64,
) -> BTreeMap<CostKind, ScalarDelta> {
    let mut changes = BTreeMap::new();
    for kind in CostKind::ALL {
        let cur = current.phase_totals.get(&kind).map_or(0.0, |t| t.value);
        let prev = previous.phase_totals.get(&kind).map_or(0.0, |t| t.value);
        let delta = ScalarDelta::between(cur, prev, tolerance);
        if !delta.is_zero() {
            changes.insert(kind, delta);
        }
    }
    changes
}

/// Stakeholder deltas over the union of stakeholder ids; a stakeholder
/// absent from one side is treated as having total 0 there.
fn compare_stakeholders(
    current: &AnalysisSnapshot,
    previous: &AnalysisSnapshot,
    tolerance: f64,
) -> BTreeMap<String, ScalarDelta> {
    let ids: BTreeSet<&String> = current
        .stakeholders
        .keys()
        .chain(previous.stakeholders.keys())
        .collect();

    let mut changes = BTreeMap::new();
    for id in ids {
        let cur = current.stakeholders.get(id).map_or(0.0, |s| s.total_cost);
        let prev = previous.stakeholders.get(id).map_or(0.0, |s| s.total_cost);
        let delta = ScalarDelta::between(cur, prev, tolerance);
        if !delta.is_zero() {
            changes.insert(id.clone(), delta);
        }
    }
    changes
}

/// Component sets with nonzero total cost, diffed into added / removed /
/// modified.
fn compare_components(
    current: &AnalysisSnapshot,
    previous: &AnalysisSnapshot,
    tolerance: f64,
) -> ComponentDiff {
    let current_ids: BTreeSet<&ComponentId> = current
        .components
        .iter()
        .filter(|(_, t)| t.total != 0.0)
        .map(|(id, _)| id)
        .collect();
    let previous_ids: BTreeSet<&ComponentId> = previous
        .components
        .iter()
        .filter(|(_, t)| t.total != 0.0)
        .map(|(id, _)| id)
        .collect();

    let mut diff = ComponentDiff::default();

    for &id in current_ids.difference(&previous_ids) {
        let totals = &current.components[id];
        diff.added.push(ComponentChange {
            id: id.clone(),
            current_total: totals.total,
            previous_total: 0.0,
            delta: totals.total,
            percent_change: None,
            current_breakdown: totals.by_kind,
            previous_breakdown: PhaseBreakdown::default(),
        });
    }

    for &id in previous_ids.difference(&current_ids) {
        let totals = &previous.components[id];
        diff.removed.push(ComponentChange {
            id: id.clone(),
            current_total: 0.0,
            previous_total: totals.total,
            delta: -totals.total,
            percent_change: Some(-100.0),
            current_breakdown: PhaseBreakdown::default(),
            previous_breakdown: totals.by_kind,
        });
    }

    for &id in current_ids.intersection(&previous_ids) {
        let cur = &current.components[id];
        let prev = &previous.components[id];
        let delta = cur.total - prev.total;
        if delta.abs() < tolerance {
            continue;
        }
        let percent_change = if prev.total != 0.0 {
            Some(delta / prev.total * 100.0)
        } else {
            Some(0.0)
        };
        diff.modified.push(ComponentChange {
            id: id.clone(),
            current_total: cur.total,
            previous_total: prev.total,
            delta,
            percent_change,
            current_breakdown: cur.by_kind,
            previous_breakdown: prev.by_kind,
        });
    }

    diff.added
        .sort_by(|a, b| b.current_total.total_cmp(&a.current_total));
    diff.removed
        .sort_by(|a, b| b.previous_total.total_cmp(&a.previous_total));
    diff.modified
        .sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));

    diff
}

/// One label for the dominant change, by fixed priority: structural change
/// first, then large and small discounted-WLC movement, then phase and
/// stakeholder redistribution, then component-level modifications.
fn classify_main_impact(
    component_count_change: i64,
    discounted_percent: f64,
    phases_affected: usize,
    stakeholders_affected: usize,
    modified_count: usize,
) -> String {
    if component_count_change != 0 {
        format!(
            "Component count changed ({:+} component(s))",
            component_count_change
        )
    } else if discounted_percent > 10.0 {
        format!(
            "Significant increase in discounted WLC (+{:.1}%)",
            discounted_percent
        )
    } else if discounted_percent < -10.0 {
        format!(
            "Significant reduction in discounted WLC ({:.1}%)",
            discounted_percent
        )
    } else if discounted_percent > 1.0 {
        format!(
            "Slight increase in discounted WLC (+{:.1}%)",
            discounted_percent
        )
    } else if discounted_percent < -1.0 {
        format!(
            "Slight decrease in discounted WLC ({:.1}%)",
            discounted_percent
        )
    } else if phases_affected > 0 {
        format!(
            "Cost redistribution across phases ({} phase(s) changed)",
            phases_affected
        )
    } else if stakeholders_affected > 0 {
        format!(
            "Stakeholder responsibility shifted ({} stakeholder(s) changed)",
            stakeholders_affected
        )
    } else if modified_count > 0 {
        format!(
            "Component cost modifications ({} component(s) changed)",
            modified_count
        )
    } else {
        "Analyses identical".to_string()
    }
}

/// Merge phase deltas, component changes, and the component-count change
/// into one list sorted by descending absolute magnitude.
fn rank_changes(
    phase_changes: &BTreeMap<CostKind, ScalarDelta>,
    components: &ComponentDiff,
    component_count_change: i64,
    current_count: usize,
    previous_count: usize,
) -> Vec<RankedChange> {
    let mut changes = Vec::new();

    for (kind, delta) in phase_changes {
        changes.push(RankedChange {
            kind: ChangeKind::PhaseCost { kind: *kind },
            description: format!("{} phase cost changed", kind),
            previous_value: delta.previous,
            current_value: delta.current,
            delta: delta.delta,
            percent_change: Some(delta.percent),
        });
    }

    for change in &components.added {
        changes.push(RankedChange {
            kind: ChangeKind::ComponentAdded {
                id: change.id.clone(),
            },
            description: format!("Component '{}' added", change.id),
            previous_value: 0.0,
            current_value: change.current_total,
            delta: change.delta,
            percent_change: None,
        });
    }

    for change in &components.removed {
        changes.push(RankedChange {
            kind: ChangeKind::ComponentRemoved {
                id: change.id.clone(),
            },
            description: format!("Component '{}' removed", change.id),
            previous_value: change.previous_total,
            current_value: 0.0,
            delta: change.delta,
            percent_change: change.percent_change,
        });
    }

    for change in &components.modified {
        changes.push(RankedChange {
            kind: ChangeKind::ComponentModified {
                id: change.id.clone(),
            },
            description: format!("Component '{}' cost changed", change.id),
            previous_value: change.previous_total,
            current_value: change.current_total,
            delta: change.delta,
            percent_change: change.percent_change,
        });
    }

    if component_count_change != 0 {
        let percent = if previous_count > 0 {
            Some(component_count_change as f64 / previous_count as f64 * 100.0)
        } else {
            None
        };
        changes.push(RankedChange {
            kind: ChangeKind::ComponentCount,
            description: "Component count changed".to_string(),
            previous_value: previous_count as f64,
            current_value: current_count as f64,
            delta: component_count_change as f64,
            percent_change: percent,
        });
    }

    changes.sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));
    changes
}
