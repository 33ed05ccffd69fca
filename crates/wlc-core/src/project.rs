//! Project horizon and discount-rate schedule.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The analysis horizon and discounting parameters for one project.
///
/// The cash-flow series produced for a project spans years `0..=lifespan_years`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Analysis horizon N in years
    pub lifespan_years: u32,

    /// Per-year discount rates.
    ///
    /// Years absent from the schedule use the configured default rate.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub discount_schedule: BTreeMap<u32, f64>,
}

impl Project {
    /// Create a project with an empty discount schedule.
    pub fn new(lifespan_years: u32) -> Self {
        Self {
            lifespan_years,
            discount_schedule: BTreeMap::new(),
        }
    }

    /// The discount rate applied to a given year.
    pub fn rate_for_year(&self, year: u32, default_rate: f64) -> f64 {
        self.discount_schedule
            .get(&year)
            .copied()
            .unwrap_or(default_rate)
    }

    /// Validate the discount schedule.
    ///
    /// Rates must be finite and greater than -1.0 so that `(1 + rate)^year`
    /// never divides by zero.
    pub fn validate(&self) -> CoreResult<()> {
        for (&year, &rate) in &self.discount_schedule {
            if !rate.is_finite() {
                return Err(CoreError::InvalidDiscountRate {
                    year,
                    rate,
                    reason: "rate must be a finite number".to_string(),
                });
            }
            if rate <= -1.0 {
                return Err(CoreError::InvalidDiscountRate {
                    year,
                    rate,
                    reason: "rate must be greater than -1.0".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_falls_back_to_default() {
        let mut project = Project::new(10);
        project.discount_schedule.insert(3, 0.05);

        assert_eq!(project.rate_for_year(3, 0.03), 0.05);
        assert_eq!(project.rate_for_year(4, 0.03), 0.03);
    }

    #[test]
    fn test_validate_rejects_non_finite_rate() {
        let mut project = Project::new(10);
        project.discount_schedule.insert(1, f64::NAN);
        assert!(matches!(
            project.validate(),
            Err(CoreError::InvalidDiscountRate { year: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_rate_at_minus_one() {
        let mut project = Project::new(10);
        project.discount_schedule.insert(2, -1.0);
        assert!(project.validate().is_err());
    }
}
