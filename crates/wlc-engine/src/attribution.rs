//! Stakeholder attribution engine.
//!
//! Apportions per-component life-cycle totals to responsible parties via
//! percentage-based rules. Rules are independent and order-insensitive;
//! applying the same rule twice double-counts by design.

use std::collections::{BTreeMap, BTreeSet};

use wlc_core::{
    AttributionRule, Component, ComponentId, ComponentTotal, CostKind, Selection, StakeholderTotal,
};

use crate::error::{EngineError, EngineResult};

/// Apportion life-cycle totals to stakeholders.
///
/// `totals` is the per-component output of
/// [`distribute`](crate::distribution::distribute); `components` is the same
/// component set the distribution ran over (needed to resolve classification
/// filters). Fails fast on a percentage outside (0, 100] or a selection that
/// matches no components.
pub fn attribute(
    rules: &[AttributionRule],
    components: &BTreeMap<ComponentId, Component>,
    totals: &BTreeMap<ComponentId, ComponentTotal>,
) -> EngineResult<BTreeMap<String, StakeholderTotal>> {
    let mut stakeholders: BTreeMap<String, StakeholderTotal> = BTreeMap::new();
    let mut touched: BTreeMap<String, BTreeSet<ComponentId>> = BTreeMap::new();

    for rule in rules {
        if !rule.percentage.is_finite() || rule.percentage <= 0.0 || rule.percentage > 100.0 {
            return Err(EngineError::InvalidPercentage {
                stakeholder: rule.stakeholder_id.clone(),
                percentage: rule.percentage,
            });
        }

        let selected = resolve_selection(&rule.selection, components);
        if selected.is_empty() {
            return Err(EngineError::EmptySelection {
                stakeholder: rule.stakeholder_id.clone(),
                selection: rule.selection.to_string(),
            });
        }

        let entry = stakeholders.entry(rule.stakeholder_id.clone()).or_default();
        let touched_set = touched.entry(rule.stakeholder_id.clone()).or_default();

        for id in selected {
            let Some(component_total) = totals.get(id) else {
                continue;
            };
            for kind in CostKind::ALL {
                if !rule.cost_kinds.contains(&kind) {
                    continue;
                }
                let attributed = component_total.by_kind.get(kind) * rule.percentage / 100.0;
                entry.total_cost += attributed;
                entry.by_kind.add(kind, attributed);
            }
            // A set, not a counter: repeated rules touching the same
            // component must not inflate the count.
            touched_set.insert(id.clone());
        }

        entry.attribution_count += 1;
    }

    let grand_total: f64 = stakeholders.values().map(|s| s.total_cost).sum();
    for (id, total) in stakeholders.iter_mut() {
        total.component_count = touched.get(id).map_or(0, |set| set.len());
        total.responsibility_percent = if grand_total > 0.0 {
            total.total_cost / grand_total * 100.0
        } else {
            0.0
        };
    }

    log::debug!(
        "attributed {:.2} across {} stakeholder(s) from {} rule(s)",
        grand_total,
        stakeholders.len(),
        rules.len()
    );

    Ok(stakeholders)
}

/// Resolve a selection to the concrete components it covers.
fn resolve_selection<'a>(
    selection: &'a Selection,
    components: &'a BTreeMap<ComponentId, Component>,
) -> Vec<&'a ComponentId> {
    match selection {
        Selection::All => components.keys().collect(),
        Selection::Components { ids } => ids
            .iter()
            .filter(|id| {
                let known = components.contains_key(*id);
                if !known {
                    log::warn!("selection references unknown component '{}', skipping", id);
                }
                known
            })
            .collect(),
        Selection::Classification { filter } => {
            let needle = filter.trim().to_lowercase();
            if needle.is_empty() {
                return Vec::new();
            }
            components
                .values()
                .filter(|c| {
                    c.classification
                        .as_deref()
                        .is_some_and(|cls| cls.to_lowercase().contains(&needle))
                })
                .map(|c| &c.id)
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "attribution_test.rs"]
mod tests;
