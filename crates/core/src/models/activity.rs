use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{PlannerError, PlannerResult};

/// Identifier of an activity; also its node in the dependency graph.
pub type ActivityId = u64;

/// Candidate unit of work
///
/// Activities arrive fully computed from the catalog ETL: `value` is already
/// risk adjusted and `success_probability` is the activity's own chance of
/// finishing on time. The engine never mutates them.
///
/// # Fields
///
/// - `id`: unique positive identifier
/// - `label` / `category`: display metadata, passed through to schedules
/// - `cost`: monetary consumption
/// - `hours`: time consumption
/// - `value`: risk-adjusted value gained when the activity is selected
/// - `success_probability`: chance of success in (0, 1], used by the simulator
/// - `parent_id`: prerequisite that must be selected and finished first;
///   `0` in input rows means no prerequisite
///
/// # Example
///
/// ```rust
/// use portfolio_core::models::Activity;
///
/// let course = Activity::new(2, 40.0, 120.0, 7.5)
///     .with_label("Advanced course")
///     .with_parent(1)
///     .with_probability(0.8);
/// assert_eq!(course.parent_id, Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub category: Option<String>,
    pub cost: f64,
    pub hours: f64,
    pub value: f64,
    #[serde(default = "default_probability")]
    pub success_probability: f64,
    #[serde(default, deserialize_with = "deserialize_parent")]
    pub parent_id: Option<ActivityId>,
}

fn default_probability() -> f64 {
    1.0
}

fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<ActivityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<ActivityId>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id != 0))
}

impl Activity {
    pub fn new(id: ActivityId, hours: f64, cost: f64, value: f64) -> Self {
        Self {
            id,
            label: format!("activity-{id}"),
            category: None,
            cost,
            hours,
            value,
            success_probability: 1.0,
            parent_id: None,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_parent(mut self, parent_id: ActivityId) -> Self {
        self.parent_id = (parent_id != 0).then_some(parent_id);
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.success_probability = probability;
        self
    }

    /// Check field ranges. Parent references are resolved by the catalog.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.id == 0 {
            return Err(PlannerError::invalid_activity(
                self.id,
                "id must be a positive integer",
            ));
        }
        for (name, field) in [
            ("cost", self.cost),
            ("hours", self.hours),
            ("value", self.value),
        ] {
            if !field.is_finite() || field < 0.0 {
                return Err(PlannerError::invalid_activity(
                    self.id,
                    format!("{name} must be finite and non-negative, got {field}"),
                ));
            }
        }
        let p = self.success_probability;
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            return Err(PlannerError::invalid_activity(
                self.id,
                format!("success_probability must be in (0, 1], got {p}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parent_zero_means_none() {
        let activity: Activity = serde_json::from_value(json!({
            "id": 4,
            "label": "Rust workshop",
            "cost": 0.0,
            "hours": 12.0,
            "value": 3.5,
            "success_probability": 0.9,
            "parent_id": 0
        }))
        .unwrap();
        assert_eq!(activity.parent_id, None);
        assert_eq!(activity.category, None);
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let activity: Activity = serde_json::from_value(json!({
            "id": 9,
            "cost": 10.0,
            "hours": 2.0,
            "value": 1.0
        }))
        .unwrap();
        assert_eq!(activity.success_probability, 1.0);
        assert_eq!(activity.parent_id, None);
        assert!(activity.label.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        assert!(Activity::new(1, 10.0, 0.0, 1.0).validate().is_ok());
        assert!(Activity::new(0, 10.0, 0.0, 1.0).validate().is_err());
        assert!(Activity::new(1, -1.0, 0.0, 1.0).validate().is_err());
        assert!(Activity::new(1, 1.0, f64::NAN, 1.0).validate().is_err());
        assert!(Activity::new(1, 1.0, 0.0, 1.0)
            .with_probability(0.0)
            .validate()
            .is_err());
        assert!(Activity::new(1, 1.0, 0.0, 1.0)
            .with_probability(1.2)
            .validate()
            .is_err());
    }

    #[test]
    fn test_with_parent_zero_clears_parent() {
        let activity = Activity::new(2, 1.0, 1.0, 1.0).with_parent(1).with_parent(0);
        assert_eq!(activity.parent_id, None);
    }
}
