use serde::{Deserialize, Serialize};

use super::activity::{Activity, ActivityId};

/// Subset of the catalog chosen by the selection solver
///
/// Activities keep catalog order. Totals are computed once at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub activities: Vec<Activity>,
    pub total_value: f64,
    pub total_hours: f64,
    pub total_cost: f64,
}

impl Selection {
    pub fn from_activities(activities: Vec<Activity>) -> Self {
        let total_value = activities.iter().map(|a| a.value).sum();
        let total_hours = activities.iter().map(|a| a.hours).sum();
        let total_cost = activities.iter().map(|a| a.cost).sum();
        Self {
            activities,
            total_value,
            total_hours,
            total_cost,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.activities.iter().any(|a| a.id == id)
    }

    pub fn ids(&self) -> Vec<ActivityId> {
        self.activities.iter().map(|a| a.id).collect()
    }

    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }
}
