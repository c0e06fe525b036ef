use serde::{Deserialize, Serialize};

/// Realized totals of one simulated execution of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub total_time: f64,
    pub total_value: f64,
}

/// All trials of one simulation together with the master seed that
/// reproduces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub seed: u64,
    pub outcomes: Vec<TrialOutcome>,
}

impl SimulationRun {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.total_time).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.total_value).collect()
    }
}
