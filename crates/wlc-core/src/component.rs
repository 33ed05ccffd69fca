//! Component and cost-fact types read from the external building model.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Strongly-typed wrapper for component identifiers.
///
/// Prevents accidental mixing of component ids with stakeholder ids,
/// classification codes, or other string types. The id is whatever stable
/// identifier the source model assigns (an IFC GlobalId, typically).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a new `ComponentId`, panicking in debug builds if the id is empty.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(id: impl Into<String>) -> Self {
        let s = id.into();
        debug_assert!(!s.is_empty(), "ComponentId must not be empty");
        Self(s)
    }

    /// Try to create a new `ComponentId`, returning `None` if the id is empty.
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let s = id.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Return the underlying id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ComponentId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Life-cycle phase of a cost.
///
/// The phase determines how a nominal value is spread over the project
/// horizon: construction is a one-time year-0 amount, operation recurs
/// annually, maintenance is incurred per replacement event, and end-of-life
/// is a one-time amount in the final year.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    Construction,
    Operation,
    Maintenance,
    EndOfLife,
}

impl CostKind {
    /// All cost kinds in canonical order.
    pub const ALL: [CostKind; 4] = [
        CostKind::Construction,
        CostKind::Operation,
        CostKind::Maintenance,
        CostKind::EndOfLife,
    ];

    /// Human-readable phase label for rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            CostKind::Construction => "Construction",
            CostKind::Operation => "Operation",
            CostKind::Maintenance => "Maintenance",
            CostKind::EndOfLife => "End of life",
        }
    }
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A building component read from the external model.
///
/// Immutable inside the engines; metadata extraction from the source model
/// file is a collaborator's job, not ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Stable identifier from the source model
    pub id: ComponentId,

    /// Free-form classification code/description (e.g. "B2010 Exterior Walls")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    /// Primary material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Expected service life in years.
    ///
    /// When absent, [`Config::default_component_lifespan`](crate::Config)
    /// applies. A recorded value of zero is rejected by the engines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan_years: Option<u32>,
}

impl Component {
    /// Create a component with only an id; metadata defaults to absent.
    pub fn new(id: impl Into<ComponentId>) -> Self {
        Self {
            id: id.into(),
            classification: None,
            material: None,
            lifespan_years: None,
        }
    }
}

/// One observed nominal cost for a component.
///
/// At most one fact may exist per (component, kind) pair; duplicates are a
/// data-quality error and rejected by the distribution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostFact {
    /// Component the cost belongs to
    pub component_id: ComponentId,

    /// Life-cycle phase of the cost
    pub kind: CostKind,

    /// Nominal amount in currency units.
    ///
    /// Construction and end-of-life are one-time amounts; operation is an
    /// annual amount; maintenance is a per-replacement-event amount.
    pub nominal_value: f64,
}

impl CostFact {
    /// Create a new cost fact.
    pub fn new(component_id: impl Into<ComponentId>, kind: CostKind, nominal_value: f64) -> Self {
        Self {
            component_id: component_id.into(),
            kind,
            nominal_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id_rejects_empty() {
        assert!(ComponentId::try_new("").is_none());
        assert!(ComponentId::try_new("2O2Fr$t4X7Zf8NOew3FNr2").is_some());
    }

    #[test]
    fn test_cost_kind_serde_names() {
        let json = serde_json::to_string(&CostKind::EndOfLife).unwrap();
        assert_eq!(json, "\"end_of_life\"");
        let kind: CostKind = serde_json::from_str("\"maintenance\"").unwrap();
        assert_eq!(kind, CostKind::Maintenance);
    }

    #[test]
    fn test_component_optional_metadata_roundtrip() {
        let component = Component {
            id: ComponentId::new("wall-1"),
            classification: Some("B2010 Exterior Walls".to_string()),
            material: None,
            lifespan_years: Some(25),
        };
        let json = serde_json::to_string(&component).unwrap();
        assert!(!json.contains("material"));
        let back: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(back, component);
    }
}
