//! Post-processing of simulation samples.
//!
//! Percentiles use linear interpolation between the closest order
//! statistics, so `percentile(xs, 50.0)` is the usual median.

use serde::{Deserialize, Serialize};

use portfolio_core::{SimulationRun, TrialOutcome};

/// Percentile `pct` (0..=100) of `samples`; `None` for empty input.
pub fn percentile(samples: &[f64], pct: f64) -> Option<f64> {
    if samples.is_empty() || !pct.is_finite() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = pct.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

/// Share of trials whose realized time stays within `hours_budget`.
pub fn probability_within(outcomes: &[TrialOutcome], hours_budget: f64) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let hits = outcomes
        .iter()
        .filter(|o| o.total_time <= hours_budget)
        .count();
    hits as f64 / outcomes.len() as f64
}

/// Risk figures reported for a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub trials: usize,
    pub time_mean: f64,
    pub time_p50: f64,
    pub time_p90: f64,
    pub value_mean: f64,
    pub value_p50: f64,
    /// Value reached in 90% of trials.
    pub value_p10: f64,
}

impl SimulationSummary {
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Option<Self> {
        let times: Vec<f64> = outcomes.iter().map(|o| o.total_time).collect();
        let values: Vec<f64> = outcomes.iter().map(|o| o.total_value).collect();
        Some(Self {
            trials: outcomes.len(),
            time_mean: mean(&times)?,
            time_p50: percentile(&times, 50.0)?,
            time_p90: percentile(&times, 90.0)?,
            value_mean: mean(&values)?,
            value_p50: percentile(&values, 50.0)?,
            value_p10: percentile(&values, 10.0)?,
        })
    }

    pub fn from_run(run: &SimulationRun) -> Option<Self> {
        Self::from_outcomes(&run.outcomes)
    }
}
