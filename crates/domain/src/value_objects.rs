use serde::{Deserialize, Serialize};

use portfolio_core::{PlannerError, PlannerResult};

/// Day-count tolerance so that exact multiples of a week do not round up
/// because of floating point noise.
const DAY_EPSILON: f64 = 1e-9;

/// Time budget for the selection solver, finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct HoursBudget(f64);

impl HoursBudget {
    pub fn new(hours: f64) -> PlannerResult<Self> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(PlannerError::InvalidBudget {
                name: "hours",
                value: hours,
            });
        }
        Ok(Self(hours))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Cost budget: either a finite non-negative limit or no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CostBudget {
    #[default]
    Unconstrained,
    Limit(f64),
}

impl CostBudget {
    pub fn new(limit: Option<f64>) -> PlannerResult<Self> {
        match limit {
            None => Ok(CostBudget::Unconstrained),
            Some(cost) if cost.is_finite() && cost >= 0.0 => Ok(CostBudget::Limit(cost)),
            Some(cost) => Err(PlannerError::InvalidBudget {
                name: "cost",
                value: cost,
            }),
        }
    }

    pub fn limit(&self) -> Option<f64> {
        match self {
            CostBudget::Unconstrained => None,
            CostBudget::Limit(cost) => Some(*cost),
        }
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, CostBudget::Limit(_))
    }
}

/// Hours worked per week by the single executor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRate(f64);

impl WeeklyRate {
    pub fn new(hours_per_week: f64) -> PlannerResult<Self> {
        if !hours_per_week.is_finite() || hours_per_week <= 0.0 {
            return Err(PlannerError::InvalidWeeklyRate(hours_per_week));
        }
        Ok(Self(hours_per_week))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Calendar days needed for `hours` of work: `ceil(hours / rate * 7)`,
    /// never less than one day.
    pub fn duration_days(&self, hours: f64) -> i64 {
        let days = (hours * 7.0 / self.0 - DAY_EPSILON).ceil();
        if days.is_finite() && days >= 1.0 {
            days as i64
        } else {
            1
        }
    }
}

/// Closed band `[low, high]` of duration multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierBand {
    low: f64,
    high: f64,
}

impl MultiplierBand {
    pub fn new(low: f64, high: f64) -> PlannerResult<Self> {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(PlannerError::invalid_input(format!(
                "multiplier band must satisfy 0 <= low <= high, got [{low}, {high}]"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, multiplier: f64) -> bool {
        (self.low..=self.high).contains(&multiplier)
    }
}

impl Default for MultiplierBand {
    fn default() -> Self {
        Self {
            low: 0.9,
            high: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_budget_validation() {
        assert_eq!(HoursBudget::new(0.0).unwrap().value(), 0.0);
        assert!(HoursBudget::new(-0.5).is_err());
        assert!(HoursBudget::new(f64::NAN).is_err());
        assert!(HoursBudget::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_cost_budget() {
        assert_eq!(CostBudget::new(None).unwrap(), CostBudget::Unconstrained);
        assert_eq!(CostBudget::new(Some(650.0)).unwrap().limit(), Some(650.0));
        assert!(CostBudget::new(Some(-1.0)).is_err());
        assert!(!CostBudget::default().is_constrained());
    }

    #[test]
    fn test_weekly_rate_rejects_non_positive() {
        assert!(matches!(
            WeeklyRate::new(0.0),
            Err(PlannerError::InvalidWeeklyRate(_))
        ));
        assert!(WeeklyRate::new(-3.0).is_err());
    }

    #[test]
    fn test_duration_days() {
        let rate = WeeklyRate::new(7.0).unwrap();
        assert_eq!(rate.duration_days(10.0), 10);
        assert_eq!(rate.duration_days(0.0), 1);
        assert_eq!(rate.duration_days(0.2), 1);

        let rate = WeeklyRate::new(10.0).unwrap();
        // 15h at 10h/week = 10.5 days
        assert_eq!(rate.duration_days(15.0), 11);
        assert_eq!(rate.duration_days(20.0), 14);
    }

    #[test]
    fn test_multiplier_band() {
        let band = MultiplierBand::default();
        assert!(band.contains(0.9));
        assert!(band.contains(1.5));
        assert!(!band.contains(1.51));
        assert!(MultiplierBand::new(2.0, 1.0).is_err());
    }
}
