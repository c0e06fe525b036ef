use proptest::prelude::*;

use portfolio_core::Activity;
use portfolio_domain::{Catalog, CostBudget, HoursBudget};
use portfolio_engine::scheduler::schedule;
use portfolio_engine::solver::{ExhaustiveStrategy, MilpStrategy, SelectionProblem, SelectionStrategy};

/// Forest of up to 8 activities with integral figures; parents always point
/// at an earlier id so the graph stays acyclic.
fn arb_activities() -> impl Strategy<Value = Vec<Activity>> {
    prop::collection::vec((0u32..=10, 0u32..=20, 0u32..=10, 0usize..=8), 1..=8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (hours, cost, value, parent))| {
                let id = i as u64 + 1;
                let activity = Activity::new(id, hours as f64, cost as f64, value as f64);
                if parent > 0 && (parent as u64) < id {
                    activity.with_parent(parent as u64)
                } else {
                    activity
                }
            })
            .collect()
    })
}

fn problem(activities: &[Activity], hours: u32, cost: Option<u32>) -> SelectionProblem {
    let catalog = Catalog::new(activities.to_vec()).unwrap();
    SelectionProblem::from_catalog(
        &catalog,
        HoursBudget::new(hours as f64).unwrap(),
        CostBudget::new(cost.map(f64::from)).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn milp_is_feasible_and_optimal(
        activities in arb_activities(),
        hours in 0u32..=40,
        cost in prop::option::of(0u32..=60),
    ) {
        let p = problem(&activities, hours, cost);
        let milp = MilpStrategy.solve(&p).unwrap();
        let exact = ExhaustiveStrategy.solve(&p).unwrap();
        prop_assert!(p.is_feasible(&milp));
        prop_assert!((p.objective(&milp) - p.objective(&exact)).abs() < 1e-6);
    }

    #[test]
    fn more_hours_never_lose_value(
        activities in arb_activities(),
        hours in 0u32..=30,
        extra in 0u32..=10,
    ) {
        let tight = problem(&activities, hours, None);
        let loose = problem(&activities, hours + extra, None);
        let tight_value = tight.objective(&MilpStrategy.solve(&tight).unwrap());
        let loose_value = loose.objective(&MilpStrategy.solve(&loose).unwrap());
        prop_assert!(loose_value + 1e-6 >= tight_value);
    }

    #[test]
    fn schedule_respects_order_and_resource(
        activities in arb_activities(),
        weekly_hours in 1u32..=40,
    ) {
        let schedule = schedule(&activities, weekly_hours as f64).unwrap();
        prop_assert_eq!(schedule.len(), activities.len());

        for pair in schedule.placements.windows(2) {
            prop_assert!(pair[1].start_date >= pair[0].end_date);
        }
        for placement in schedule.iter() {
            prop_assert!(placement.duration_days >= 1);
            if let Some(parent) = placement.parent_id {
                let parent_end = schedule.find(parent).unwrap().end_date;
                prop_assert!(placement.start_date > parent_end);
            }
        }
    }
}
