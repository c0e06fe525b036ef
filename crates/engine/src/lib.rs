//! Decision engine of the portfolio planner
//!
//! Three pure, synchronous components consume the catalog:
//!
//! - [`solver`]: exact budgeted selection with prerequisite implication
//! - [`scheduler`]: serial timeline ordered by inherited priority
//! - [`simulator`]: Monte Carlo outcomes of a fixed selection
//!
//! [`statistics`], [`summary`] and [`sweep`] post-process their results.

pub mod scheduler;
pub mod simulator;
pub mod solver;
pub mod statistics;
pub mod summary;
pub mod sweep;

pub use scheduler::{schedule, DependencyScheduler};
pub use simulator::{simulate, RiskSimulator, DEFAULT_TRIALS};
pub use solver::{
    select, ExhaustiveStrategy, MilpStrategy, SelectionProblem, SelectionSolver,
    SelectionStrategy,
};
pub use statistics::{percentile, probability_within, SimulationSummary};
pub use summary::PlanSummary;
pub use sweep::{budget_range, sweep_cost, sweep_hours, SweepPoint};
