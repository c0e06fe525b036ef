#[cfg(test)]
mod simulator_tests {
    use portfolio_core::{Activity, PlannerError};
    use portfolio_domain::MultiplierBand;
    use portfolio_engine::simulator::*;
    use portfolio_engine::statistics::SimulationSummary;

    fn selection() -> Vec<Activity> {
        vec![
            Activity::new(1, 10.0, 0.0, 5.0).with_probability(0.8),
            Activity::new(2, 20.0, 0.0, 3.0),
        ]
    }

    #[test]
    fn test_times_stay_within_band() {
        let run = simulate(&selection(), 2_000, Some(11)).unwrap();
        assert_eq!(run.len(), 2_000);
        for outcome in &run.outcomes {
            assert!(outcome.total_time >= 27.0 - 1e-9);
            assert!(outcome.total_time <= 45.0 + 1e-9);
        }
    }

    #[test]
    fn test_success_rate_matches_probability() {
        let selected = vec![Activity::new(1, 10.0, 0.0, 5.0).with_probability(0.8)];
        let run = simulate(&selected, 10_000, Some(2024)).unwrap();
        let successes = run.outcomes.iter().filter(|o| o.total_value > 0.0).count();
        let rate = successes as f64 / run.len() as f64;
        assert!((rate - 0.8).abs() < 0.02, "success rate {rate}");
    }

    #[test]
    fn test_values_are_partial_sums() {
        let run = simulate(&selection(), 500, Some(3)).unwrap();
        for outcome in &run.outcomes {
            assert!(outcome.total_value == 3.0 || outcome.total_value == 8.0);
        }
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let first = simulate(&selection(), 300, Some(42)).unwrap();
        let second = simulate(&selection(), 300, Some(42)).unwrap();
        assert_eq!(first, second);

        let other = simulate(&selection(), 300, Some(43)).unwrap();
        assert_ne!(first.outcomes, other.outcomes);
    }

    #[test]
    fn test_unseeded_run_reports_its_seed() {
        let run = simulate(&selection(), 50, None).unwrap();
        let replay = simulate(&selection(), 50, Some(run.seed)).unwrap();
        assert_eq!(run.outcomes, replay.outcomes);
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(
            simulate(&selection(), 0, Some(1)),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_selection_yields_zero_outcomes() {
        let run = simulate(&[], 10, Some(1)).unwrap();
        assert!(run
            .outcomes
            .iter()
            .all(|o| o.total_time == 0.0 && o.total_value == 0.0));
    }

    #[test]
    fn test_mitigation_reduces_failures() {
        let selected = vec![Activity::new(1, 10.0, 0.0, 1.0).with_probability(0.6)];
        let simulator = RiskSimulator::new(MultiplierBand::default(), 0.5).unwrap();
        let run = simulator.run(&selected, 10_000, Some(9)).unwrap();
        let rate = run.values().iter().sum::<f64>() / run.len() as f64;
        assert!((rate - 0.8).abs() < 0.02, "mitigated success rate {rate}");
    }

    #[test]
    fn test_fixed_band_is_deterministic_in_time() {
        let band = MultiplierBand::new(1.0, 1.0).unwrap();
        let simulator = RiskSimulator::new(band, 1.0).unwrap();
        let run = simulator.run(&selection(), 20, Some(5)).unwrap();
        assert!(run.times().iter().all(|&t| (t - 30.0).abs() < 1e-9));
    }

    #[test]
    fn test_summary_of_run() {
        let run = simulate(&selection(), 1_000, Some(77)).unwrap();
        let summary = SimulationSummary::from_run(&run).unwrap();
        assert_eq!(summary.trials, 1_000);
        assert!(summary.time_p50 <= summary.time_p90);
        assert!(summary.value_p10 <= summary.value_p50);
        assert!((27.0..=45.0).contains(&summary.time_mean));
    }
}
