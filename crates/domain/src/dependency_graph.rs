use std::collections::{BTreeMap, HashMap};

use portfolio_core::{Activity, ActivityId, PlannerError, PlannerResult};
use tracing::debug;

/// Prerequisite graph induced by a set of activities
///
/// Only edges whose parent is itself a member of the set are kept; a parent
/// reference pointing elsewhere is treated as "no dependency". Nodes are
/// stored in ascending id order so every traversal is deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    values: BTreeMap<ActivityId, f64>,
    parents: HashMap<ActivityId, ActivityId>,
    dependents: HashMap<ActivityId, Vec<ActivityId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

impl DependencyGraph {
    pub fn build(activities: &[Activity]) -> PlannerResult<Self> {
        let mut values = BTreeMap::new();
        for activity in activities {
            if values.insert(activity.id, activity.value).is_some() {
                return Err(PlannerError::DuplicateActivity { id: activity.id });
            }
        }

        let mut parents = HashMap::new();
        let mut dependents: HashMap<ActivityId, Vec<ActivityId>> = HashMap::new();
        for activity in activities {
            match activity.parent_id {
                Some(parent) if values.contains_key(&parent) => {
                    parents.insert(activity.id, parent);
                    dependents.entry(parent).or_default().push(activity.id);
                }
                Some(parent) => {
                    debug!(
                        "Parent {} of activity {} is not in the set, treating as independent",
                        parent, activity.id
                    );
                }
                None => {}
            }
        }
        for children in dependents.values_mut() {
            children.sort_unstable();
        }

        Ok(Self {
            values,
            parents,
            dependents,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, id: ActivityId) -> bool {
        self.values.contains_key(&id)
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = ActivityId> + '_ {
        self.values.keys().copied()
    }

    pub fn parent(&self, id: ActivityId) -> Option<ActivityId> {
        self.parents.get(&id).copied()
    }

    /// Activities that list `id` as their prerequisite, ascending.
    pub fn dependents(&self, id: ActivityId) -> &[ActivityId] {
        self.dependents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of unfinished prerequisites per node (0 or 1 with single parents).
    pub fn in_degrees(&self) -> HashMap<ActivityId, usize> {
        self.nodes()
            .map(|id| (id, usize::from(self.parents.contains_key(&id))))
            .collect()
    }

    pub fn roots(&self) -> Vec<ActivityId> {
        self.nodes()
            .filter(|id| !self.parents.contains_key(id))
            .collect()
    }

    /// Effective priority of every node
    ///
    /// `priority(n) = max(value(n), max(priority(d) for d in dependents(n)))`,
    /// so an ancestor inherits the priority of the most valuable activity it
    /// unlocks. Evaluated bottom-up with an explicit stack and memo table; a
    /// node met again while still in progress closes a cycle and fails with
    /// [`PlannerError::CircularDependency`].
    pub fn effective_priorities(&self) -> PlannerResult<HashMap<ActivityId, f64>> {
        let mut memo: HashMap<ActivityId, f64> = HashMap::with_capacity(self.len());
        let mut state: HashMap<ActivityId, VisitState> = HashMap::with_capacity(self.len());

        for root in self.nodes() {
            if state.contains_key(&root) {
                continue;
            }
            // (node, index of the next dependent to visit)
            let mut stack: Vec<(ActivityId, usize)> = vec![(root, 0)];
            state.insert(root, VisitState::InProgress);

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let children = self.dependents(node);
                if let Some(&child) = children.get(top.1) {
                    top.1 += 1;
                    match state.get(&child) {
                        Some(VisitState::InProgress) => {
                            return Err(PlannerError::CircularDependency { id: child });
                        }
                        Some(VisitState::Done) => {}
                        None => {
                            state.insert(child, VisitState::InProgress);
                            stack.push((child, 0));
                        }
                    }
                    continue;
                }

                let own = self.values.get(&node).copied().unwrap_or(0.0);
                let priority = children
                    .iter()
                    .filter_map(|child| memo.get(child))
                    .fold(own, |acc, &p| acc.max(p));
                memo.insert(node, priority);
                state.insert(node, VisitState::Done);
                stack.pop();
            }
        }

        Ok(memo)
    }

    /// First node found on a cycle, if any.
    pub fn detect_cycle(&self) -> Option<ActivityId> {
        match self.effective_priorities() {
            Err(PlannerError::CircularDependency { id }) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(id: ActivityId, value: f64, parent: ActivityId) -> Activity {
        Activity::new(id, 1.0, 0.0, value).with_parent(parent)
    }

    #[test]
    fn test_priority_inherited_from_dependent() {
        let graph =
            DependencyGraph::build(&[activity(1, 2.0, 0), activity(2, 9.0, 1)]).unwrap();
        let priorities = graph.effective_priorities().unwrap();
        assert_eq!(priorities[&1], 9.0);
        assert_eq!(priorities[&2], 9.0);
    }

    #[test]
    fn test_no_inheritance_without_dependency() {
        let graph =
            DependencyGraph::build(&[activity(1, 2.0, 0), activity(2, 9.0, 0)]).unwrap();
        let priorities = graph.effective_priorities().unwrap();
        assert_eq!(priorities[&1], 2.0);
        assert_eq!(priorities[&2], 9.0);
    }

    #[test]
    fn test_priority_propagates_through_chain() {
        // 1 -> 2 -> 3, grandchild carries the value
        let graph = DependencyGraph::build(&[
            activity(1, 1.0, 0),
            activity(2, 3.0, 1),
            activity(3, 8.0, 2),
            activity(4, 5.0, 1),
        ])
        .unwrap();
        let priorities = graph.effective_priorities().unwrap();
        assert_eq!(priorities[&1], 8.0);
        assert_eq!(priorities[&2], 8.0);
        assert_eq!(priorities[&4], 5.0);
    }

    #[test]
    fn test_own_value_kept_when_higher() {
        let graph =
            DependencyGraph::build(&[activity(1, 10.0, 0), activity(2, 4.0, 1)]).unwrap();
        assert_eq!(graph.effective_priorities().unwrap()[&1], 10.0);
    }

    #[test]
    fn test_cycle_detected() {
        let graph = DependencyGraph::build(&[
            activity(1, 1.0, 3),
            activity(2, 1.0, 1),
            activity(3, 1.0, 2),
            activity(4, 1.0, 0),
        ])
        .unwrap();
        assert!(matches!(
            graph.effective_priorities(),
            Err(PlannerError::CircularDependency { .. })
        ));
        assert!(graph.detect_cycle().is_some());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let graph = DependencyGraph::build(&[activity(5, 1.0, 5)]).unwrap();
        assert_eq!(graph.detect_cycle(), Some(5));
    }

    #[test]
    fn test_missing_parent_treated_as_root() {
        let graph = DependencyGraph::build(&[activity(2, 1.0, 99)]).unwrap();
        assert_eq!(graph.parent(2), None);
        assert_eq!(graph.roots(), vec![2]);
        assert_eq!(graph.in_degrees()[&2], 0);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let activities: Vec<Activity> = (1..=20_000)
            .map(|id| activity(id, id as f64, id - 1))
            .collect();
        let graph = DependencyGraph::build(&activities).unwrap();
        let priorities = graph.effective_priorities().unwrap();
        assert_eq!(priorities[&1], 20_000.0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        assert!(DependencyGraph::build(&[activity(1, 1.0, 0), activity(1, 2.0, 0)]).is_err());
    }
}
