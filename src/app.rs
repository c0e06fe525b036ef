use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use portfolio_core::{AppConfig, PlannerError, PlannerResult, Schedule, Selection};
use portfolio_domain::{Catalog, CostBudget, DependencyGraph, HoursBudget};
use portfolio_engine::{
    probability_within, select, sweep_cost, sweep_hours, DependencyScheduler, PlanSummary,
    RiskSimulator, SimulationSummary, SweepPoint,
};

/// Read an activity catalog from a JSON file.
///
/// Parent references that point outside the catalog are kept and reported
/// as warnings; the engine treats them as independent activities. A
/// prerequisite cycle is reported too, since scheduling a selection that
/// contains it will fail.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&text)
        .with_context(|| format!("invalid catalog {}", path.display()))?;

    for (activity, parent) in catalog.dangling_references() {
        warn!(
            "Activity {} references unknown prerequisite {}, ignoring the dependency",
            activity, parent
        );
    }
    if let Some(id) = DependencyGraph::build(catalog.activities())?.detect_cycle() {
        warn!(
            "Activity {} is part of a prerequisite cycle, schedules containing it will fail",
            id
        );
    }
    info!("Loaded {} activities from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Classify a failed run for the final log line: `input` for bad catalogs,
/// budgets or settings the user can fix, `fatal` for solver and configuration
/// breakdowns, `runtime` for the rest. `None` when no planner error is
/// underneath the context chain.
pub fn failure_kind(err: &anyhow::Error) -> Option<&'static str> {
    let err = err.downcast_ref::<PlannerError>()?;
    Some(if err.is_input_error() {
        "input"
    } else if err.is_fatal() {
        "fatal"
    } else {
        "runtime"
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub summary: PlanSummary,
    pub selection: Selection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub summary: PlanSummary,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub summary: PlanSummary,
    pub seed: u64,
    pub statistics: Option<SimulationSummary>,
    /// Share of trials whose realized hours fit the hours budget.
    pub within_hours_budget: f64,
}

/// Runs the select, schedule and simulate pipeline with one configuration
///
/// Every call starts from the catalog again; nothing is cached between
/// calls.
#[derive(Debug, Clone)]
pub struct Planner {
    config: AppConfig,
}

impl Planner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn budgets(&self) -> PlannerResult<(HoursBudget, CostBudget)> {
        Ok((
            HoursBudget::new(self.config.planning.hours_budget)?,
            CostBudget::new(self.config.planning.cost_budget)?,
        ))
    }

    pub fn plan(&self, catalog: &Catalog) -> PlannerResult<PlanReport> {
        let (hours, cost) = self.budgets()?;
        let selection = select(catalog, hours.value(), cost.limit())?;
        Ok(PlanReport {
            summary: PlanSummary::new(&selection, hours, cost),
            selection,
        })
    }

    pub fn schedule(&self, catalog: &Catalog) -> PlannerResult<ScheduleReport> {
        let plan = self.plan(catalog)?;
        let scheduler = DependencyScheduler::with_start_date(self.config.schedule.start_date);
        let schedule =
            scheduler.schedule(&plan.selection.activities, self.config.schedule.weekly_hours)?;
        Ok(ScheduleReport {
            summary: plan.summary,
            schedule,
        })
    }

    pub fn simulate(&self, catalog: &Catalog) -> PlannerResult<SimulationReport> {
        let plan = self.plan(catalog)?;
        let settings = &self.config.simulation;
        let simulator = RiskSimulator::from_config(settings)?;
        let run = simulator.run(&plan.selection.activities, settings.trials, settings.seed)?;
        Ok(SimulationReport {
            within_hours_budget: probability_within(&run.outcomes, plan.summary.hours_budget),
            statistics: SimulationSummary::from_run(&run),
            seed: run.seed,
            summary: plan.summary,
        })
    }

    /// Optimal value for each hours budget, keeping the configured cost budget.
    pub fn sweep_hours(&self, catalog: &Catalog, budgets: &[f64]) -> PlannerResult<Vec<SweepPoint>> {
        sweep_hours(catalog, budgets, self.config.planning.cost_budget)
    }

    /// Optimal value for each cost budget, keeping the configured hours budget.
    pub fn sweep_cost(&self, catalog: &Catalog, budgets: &[f64]) -> PlannerResult<Vec<SweepPoint>> {
        sweep_cost(catalog, self.config.planning.hours_budget, budgets)
    }
}
