use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::activity::ActivityId;

/// One activity placed on the serial timeline
///
/// The interval is half-open: the activity occupies `[start, end)` and the
/// resource is free again on `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub activity_id: ActivityId,
    pub label: String,
    pub category: Option<String>,
    pub parent_id: Option<ActivityId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub effective_priority: f64,
}

impl Placement {
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }
}

/// Ordered placements produced by one scheduling call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub placements: Vec<Placement>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn find(&self, id: ActivityId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.activity_id == id)
    }

    /// Date the last activity releases the resource.
    pub fn finish_date(&self) -> Option<NaiveDate> {
        self.placements.iter().map(|p| p.end_date).max()
    }

    pub fn total_days(&self) -> i64 {
        match (self.placements.first(), self.finish_date()) {
            (Some(first), Some(finish)) => (finish - first.start_date).num_days(),
            _ => 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }
}
