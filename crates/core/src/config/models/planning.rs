use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{PlannerError, PlannerResult};

/// Budgets handed to the selection solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    pub hours_budget: f64,
    /// `None`, or a missing key, leaves cost unconstrained.
    #[serde(default)]
    pub cost_budget: Option<f64>,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            hours_budget: 300.0,
            cost_budget: None,
        }
    }
}

impl PlanningConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if !self.hours_budget.is_finite() || self.hours_budget < 0.0 {
            return Err(PlannerError::config_error(format!(
                "planning.hours_budget must be finite and >= 0, got {}",
                self.hours_budget
            )));
        }
        if let Some(cost) = self.cost_budget {
            if !cost.is_finite() || cost < 0.0 {
                return Err(PlannerError::config_error(format!(
                    "planning.cost_budget must be finite and >= 0, got {cost}"
                )));
            }
        }
        Ok(())
    }
}

/// Timeline parameters for the dependency scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub weekly_hours: f64,
    pub start_date: NaiveDate,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekly_hours: 10.0,
            start_date: default_start_date(),
        }
    }
}

pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default()
}

impl ScheduleConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if !self.weekly_hours.is_finite() || self.weekly_hours <= 0.0 {
            return Err(PlannerError::config_error(format!(
                "schedule.weekly_hours must be finite and > 0, got {}",
                self.weekly_hours
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planning_defaults_are_valid() {
        let config = PlanningConfig::default();
        assert_eq!(config.hours_budget, 300.0);
        assert_eq!(config.cost_budget, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_planning_rejects_negative_budgets() {
        let config = PlanningConfig {
            hours_budget: -1.0,
            cost_budget: None,
        };
        assert!(config.validate().is_err());

        let config = PlanningConfig {
            hours_budget: 10.0,
            cost_budget: Some(f64::INFINITY),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_schedule_rejects_zero_rate() {
        let config = ScheduleConfig {
            weekly_hours: 0.0,
            ..ScheduleConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(
            ScheduleConfig::default().start_date,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }
}
