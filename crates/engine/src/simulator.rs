use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use portfolio_core::{
    Activity, PlannerError, PlannerResult, SimulationConfig, SimulationRun, TrialOutcome,
};
use portfolio_domain::MultiplierBand;

pub const DEFAULT_TRIALS: usize = 500;

/// Monte Carlo model of executing a fixed selection
///
/// Each trial draws a slippage multiplier per activity from the band and a
/// Bernoulli success per activity. Trials are independent and run in
/// parallel; each one gets its own RNG seeded from the master seed so the
/// output only depends on the seed.
#[derive(Debug, Clone, Copy)]
pub struct RiskSimulator {
    band: MultiplierBand,
    failure_mitigation: f64,
}

impl Default for RiskSimulator {
    fn default() -> Self {
        Self {
            band: MultiplierBand::default(),
            failure_mitigation: 1.0,
        }
    }
}

impl RiskSimulator {
    pub fn new(band: MultiplierBand, failure_mitigation: f64) -> PlannerResult<Self> {
        if !failure_mitigation.is_finite() || failure_mitigation <= 0.0 || failure_mitigation > 1.0
        {
            return Err(PlannerError::invalid_input(format!(
                "failure mitigation must be in (0, 1], got {failure_mitigation}"
            )));
        }
        Ok(Self {
            band,
            failure_mitigation,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> PlannerResult<Self> {
        let band = MultiplierBand::new(config.multiplier_low, config.multiplier_high)?;
        Self::new(band, config.failure_mitigation)
    }

    pub fn band(&self) -> MultiplierBand {
        self.band
    }

    /// Success probability after mitigation: the failure share `1 - p` is
    /// scaled by the mitigation factor.
    pub fn effective_probability(&self, success_probability: f64) -> f64 {
        (1.0 - (1.0 - success_probability) * self.failure_mitigation).clamp(0.0, 1.0)
    }

    pub fn run(
        &self,
        selected: &[Activity],
        trials: usize,
        seed: Option<u64>,
    ) -> PlannerResult<SimulationRun> {
        if trials == 0 {
            return Err(PlannerError::invalid_input("trial count must be greater than 0"));
        }
        for activity in selected {
            activity.validate()?;
        }

        let seed = seed.unwrap_or_else(rand::random);
        let mut master = StdRng::seed_from_u64(seed);
        let trial_seeds: Vec<u64> = (0..trials).map(|_| master.random()).collect();
        debug!(
            "Simulating {} trials over {} activities (seed {})",
            trials,
            selected.len(),
            seed
        );

        let outcomes: Vec<TrialOutcome> = trial_seeds
            .par_iter()
            .map(|&trial_seed| {
                let mut rng = StdRng::seed_from_u64(trial_seed);
                self.run_trial(selected, &mut rng)
            })
            .collect();

        info!("Completed {} simulation trials (seed {})", outcomes.len(), seed);
        Ok(SimulationRun { seed, outcomes })
    }

    fn run_trial<R: Rng + ?Sized>(&self, selected: &[Activity], rng: &mut R) -> TrialOutcome {
        let mut total_time = 0.0;
        let mut total_value = 0.0;
        for activity in selected {
            let multiplier = rng.random_range(self.band.low()..=self.band.high());
            total_time += activity.hours * multiplier;
            if rng.random_bool(self.effective_probability(activity.success_probability)) {
                total_value += activity.value;
            }
        }
        TrialOutcome {
            total_time,
            total_value,
        }
    }
}

/// `simulate(selected_subset, trial_count, rng_seed_or_none)` with the
/// default band and no mitigation.
pub fn simulate(
    selected: &[Activity],
    trial_count: usize,
    seed: Option<u64>,
) -> PlannerResult<SimulationRun> {
    RiskSimulator::default().run(selected, trial_count, seed)
}
