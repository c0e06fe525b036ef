use serde::{Deserialize, Serialize};

use crate::errors::{PlannerError, PlannerResult};

/// Risk simulator tuning.
///
/// `multiplier_low..=multiplier_high` is the slippage band applied to each
/// activity's hours. `failure_mitigation` scales every activity's failure
/// probability (`1 - p`); 1.0 leaves probabilities untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub trials: usize,
    pub multiplier_low: f64,
    pub multiplier_high: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    pub failure_mitigation: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 500,
            multiplier_low: 0.9,
            multiplier_high: 1.5,
            seed: None,
            failure_mitigation: 1.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.trials == 0 {
            return Err(PlannerError::config_error(
                "simulation.trials must be greater than 0",
            ));
        }
        let (low, high) = (self.multiplier_low, self.multiplier_high);
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(PlannerError::config_error(format!(
                "simulation multiplier band must satisfy 0 <= low <= high, got [{low}, {high}]"
            )));
        }
        let m = self.failure_mitigation;
        if !m.is_finite() || m <= 0.0 || m > 1.0 {
            return Err(PlannerError::config_error(format!(
                "simulation.failure_mitigation must be in (0, 1], got {m}"
            )));
        }
        Ok(())
    }
}
