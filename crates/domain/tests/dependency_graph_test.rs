use proptest::prelude::*;

use portfolio_core::{Activity, PlannerError};
use portfolio_domain::{Catalog, DependencyGraph};

/// Acyclic forests: every parent id is smaller than its child id.
fn arb_forest() -> impl Strategy<Value = Vec<Activity>> {
    prop::collection::vec((0.0f64..100.0, 0usize..=30), 1..=30).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (value, parent))| {
                let id = i as u64 + 1;
                let activity = Activity::new(id, 1.0, 0.0, value);
                if parent > 0 && (parent as u64) < id {
                    activity.with_parent(parent as u64)
                } else {
                    activity
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn priority_dominates_own_value_and_dependents(activities in arb_forest()) {
        let graph = DependencyGraph::build(&activities).unwrap();
        let priorities = graph.effective_priorities().unwrap();
        prop_assert_eq!(priorities.len(), activities.len());

        for activity in &activities {
            let own = priorities[&activity.id];
            prop_assert!(own >= activity.value);
            if let Some(parent) = graph.parent(activity.id) {
                prop_assert!(priorities[&parent] >= own);
            }
        }
    }

    #[test]
    fn forests_have_no_cycle(activities in arb_forest()) {
        let graph = DependencyGraph::build(&activities).unwrap();
        prop_assert_eq!(graph.detect_cycle(), None);
    }

    #[test]
    fn closing_a_chain_creates_a_cycle(len in 2u64..=40) {
        // 1 <- 2 <- ... <- len, then 1 points back at len
        let activities: Vec<Activity> = (1..=len)
            .map(|id| {
                let parent = if id == 1 { len } else { id - 1 };
                Activity::new(id, 1.0, 0.0, 1.0).with_parent(parent)
            })
            .collect();
        let graph = DependencyGraph::build(&activities).unwrap();
        let member = graph.detect_cycle();
        prop_assert!(member.is_some_and(|id| (1..=len).contains(&id)));
    }
}

#[test]
fn test_catalog_from_json_rows() {
    let json = r#"[
        {"id": 1, "label": "Intro", "cost": 0, "hours": 5, "value": 2.5, "parent_id": 0},
        {"id": 2, "cost": 120.5, "hours": 12, "value": 6, "success_probability": 0.7, "parent_id": 1},
        {"id": 3, "cost": 10, "hours": 3, "value": 1, "category": "Reading"}
    ]"#;
    let catalog = Catalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get(1).unwrap().parent_id, None);
    assert_eq!(catalog.parent_of(catalog.get(2).unwrap()).unwrap().id, 1);
    assert_eq!(catalog.get(2).unwrap().success_probability, 0.7);
    assert_eq!(catalog.get(3).unwrap().success_probability, 1.0);
    assert_eq!(catalog.get(3).unwrap().category.as_deref(), Some("Reading"));
}

#[test]
fn test_catalog_rejects_bad_rows() {
    let duplicate = r#"[{"id": 1, "cost": 0, "hours": 1, "value": 1},
                        {"id": 1, "cost": 0, "hours": 2, "value": 1}]"#;
    assert!(matches!(
        Catalog::from_json(duplicate),
        Err(PlannerError::DuplicateActivity { id: 1 })
    ));

    let bad_probability =
        r#"[{"id": 4, "cost": 0, "hours": 1, "value": 1, "success_probability": 1.5}]"#;
    assert!(matches!(
        Catalog::from_json(bad_probability),
        Err(PlannerError::InvalidActivity { id: 4, .. })
    ));

    assert!(matches!(
        Catalog::from_json("{not json"),
        Err(PlannerError::Serialization(_))
    ));
}
