use std::collections::HashMap;

use portfolio_core::{Activity, ActivityId, PlannerError, PlannerResult};
use tracing::debug;

/// Validated, read-only set of candidate activities
///
/// Construction checks field ranges and id uniqueness. Parent references to
/// ids that are not in the catalog are kept on the activity but resolve to
/// "no dependency" through [`Catalog::parent_of`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    activities: Vec<Activity>,
    index: HashMap<ActivityId, usize>,
}

impl Catalog {
    pub fn new(activities: Vec<Activity>) -> PlannerResult<Self> {
        let mut index = HashMap::with_capacity(activities.len());
        for (position, activity) in activities.iter().enumerate() {
            activity.validate()?;
            if index.insert(activity.id, position).is_some() {
                return Err(PlannerError::DuplicateActivity { id: activity.id });
            }
        }
        debug!("Catalog built with {} activities", activities.len());
        Ok(Self { activities, index })
    }

    /// Parse a JSON array of activity rows as produced by the catalog ETL.
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        let activities: Vec<Activity> = serde_json::from_str(json)?;
        Self::new(activities)
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.index_of(id).map(|position| &self.activities[position])
    }

    /// Position of `id` in catalog order.
    pub fn index_of(&self, id: ActivityId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Resolved prerequisite; `None` when unset or pointing outside the catalog.
    pub fn parent_of(&self, activity: &Activity) -> Option<&Activity> {
        activity.parent_id.and_then(|parent| self.get(parent))
    }

    /// `(activity, missing parent)` pairs whose parent is not in the catalog.
    pub fn dangling_references(&self) -> Vec<(ActivityId, ActivityId)> {
        self.activities
            .iter()
            .filter_map(|a| match a.parent_id {
                Some(parent) if !self.contains(parent) => Some((a.id, parent)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Activity> {
        vec![
            Activity::new(1, 10.0, 0.0, 5.0),
            Activity::new(2, 10.0, 0.0, 9.0).with_parent(1),
            Activity::new(3, 4.0, 50.0, 2.0).with_parent(42),
        ]
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::new(sample()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.index_of(2), Some(1));
        assert_eq!(catalog.get(3).map(|a| a.hours), Some(4.0));
        assert!(!catalog.contains(42));
    }

    #[test]
    fn test_parent_resolution() {
        let catalog = Catalog::new(sample()).unwrap();
        let child = catalog.get(2).unwrap();
        assert_eq!(catalog.parent_of(child).map(|p| p.id), Some(1));

        let orphan = catalog.get(3).unwrap();
        assert!(catalog.parent_of(orphan).is_none());
        assert_eq!(catalog.dangling_references(), vec![(3, 42)]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut activities = sample();
        activities.push(Activity::new(2, 1.0, 1.0, 1.0));
        assert_eq!(
            Catalog::new(activities).unwrap_err(),
            PlannerError::DuplicateActivity { id: 2 }
        );
    }

    #[test]
    fn test_invalid_activity_rejected() {
        let activities = vec![Activity::new(1, -10.0, 0.0, 5.0)];
        assert!(matches!(
            Catalog::new(activities),
            Err(PlannerError::InvalidActivity { id: 1, .. })
        ));
    }

    #[test]
    fn test_from_json_rows() {
        let json = r#"[
            {"id": 1, "label": "Fundamentals", "cost": 0, "hours": 20, "value": 4.2,
             "success_probability": 0.9, "parent_id": 0},
            {"id": 2, "label": "Certification", "category": "Cloud", "cost": 300,
             "hours": 60, "value": 7.1, "success_probability": 0.7, "parent_id": 1}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().parent_id, None);
        assert_eq!(catalog.get(2).unwrap().category.as_deref(), Some("Cloud"));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(PlannerError::Serialization(_))
        ));
    }
}
