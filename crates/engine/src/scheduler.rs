use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use portfolio_core::config::default_start_date;
use portfolio_core::{Activity, ActivityId, Placement, PlannerError, PlannerResult, Schedule};
use portfolio_domain::{DependencyGraph, WeeklyRate};

/// Entry of the ready set: higher priority first, then smaller id.
#[derive(Debug, Clone, Copy)]
struct ReadyActivity {
    priority: f64,
    id: ActivityId,
}

impl PartialEq for ReadyActivity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReadyActivity {}

impl PartialOrd for ReadyActivity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReadyActivity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.id.cmp(&self.id))
    }
}

fn add_days(date: NaiveDate, days: i64) -> PlannerResult<NaiveDate> {
    u64::try_from(days)
        .ok()
        .and_then(|days| date.checked_add_days(Days::new(days)))
        .ok_or_else(|| {
            PlannerError::invalid_input(format!("timeline overflow adding {days} days to {date}"))
        })
}

/// Serial, dependency-aware timeline builder
///
/// Activities are released once their prerequisite is placed and picked by
/// descending effective priority, so prerequisites of valuable work move to
/// the front. One activity runs at a time.
#[derive(Debug, Clone)]
pub struct DependencyScheduler {
    start_date: NaiveDate,
}

impl Default for DependencyScheduler {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
        }
    }
}

impl DependencyScheduler {
    pub fn with_start_date(start_date: NaiveDate) -> Self {
        Self { start_date }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn schedule(&self, selected: &[Activity], weekly_hours: f64) -> PlannerResult<Schedule> {
        let rate = WeeklyRate::new(weekly_hours)?;
        for activity in selected {
            activity.validate()?;
        }
        let graph = DependencyGraph::build(selected)?;
        let priorities = graph.effective_priorities()?;
        let by_id: HashMap<ActivityId, &Activity> = selected.iter().map(|a| (a.id, a)).collect();

        let mut in_degree = graph.in_degrees();
        let mut ready: BinaryHeap<ReadyActivity> = graph
            .roots()
            .into_iter()
            .map(|id| ReadyActivity {
                priority: priorities.get(&id).copied().unwrap_or(0.0),
                id,
            })
            .collect();

        let mut end_dates: HashMap<ActivityId, NaiveDate> = HashMap::with_capacity(selected.len());
        let mut resource_free = self.start_date;
        let mut placements = Vec::with_capacity(selected.len());

        while let Some(ReadyActivity { priority, id }) = ready.pop() {
            let Some(activity) = by_id.get(&id).copied() else {
                continue;
            };
            let parent = graph.parent(id);

            let earliest_by_dependency = match parent.and_then(|p| end_dates.get(&p)) {
                Some(&parent_end) => add_days(parent_end, 1)?,
                None => self.start_date,
            };
            let start_date = earliest_by_dependency.max(resource_free);
            let duration_days = rate.duration_days(activity.hours);
            let end_date = add_days(start_date, duration_days)?;

            debug!(
                "Placed activity {} [{} -> {}] ({} days, priority {:.2})",
                id, start_date, end_date, duration_days, priority
            );
            end_dates.insert(id, end_date);
            resource_free = end_date;
            placements.push(Placement {
                activity_id: id,
                label: activity.label.clone(),
                category: activity.category.clone(),
                parent_id: parent,
                start_date,
                end_date,
                duration_days,
                effective_priority: priority,
            });

            for &dependent in graph.dependents(id) {
                if let Some(degree) = in_degree.get_mut(&dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(ReadyActivity {
                            priority: priorities.get(&dependent).copied().unwrap_or(0.0),
                            id: dependent,
                        });
                    }
                }
            }
        }

        if placements.len() != graph.len() {
            let missing = graph
                .nodes()
                .find(|id| !end_dates.contains_key(id))
                .unwrap_or_default();
            return Err(PlannerError::CircularDependency { id: missing });
        }

        let schedule = Schedule { placements };
        info!(
            "Scheduled {} activities at {:.1}h/week, finishing {}",
            schedule.len(),
            rate.value(),
            schedule
                .finish_date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        Ok(schedule)
    }
}

/// `schedule(selected_subset, weekly_hours)` starting on the default date.
pub fn schedule(selected: &[Activity], weekly_hours: f64) -> PlannerResult<Schedule> {
    DependencyScheduler::default().schedule(selected, weekly_hours)
}
