//! Portfolio planner orchestration
//!
//! Ties the engine to the outside world: catalog files, configuration,
//! reports and scenario comparison.

pub mod app;
pub mod history;
pub mod report;
pub mod scenario;

pub use app::{failure_kind, load_catalog, PlanReport, Planner, ScheduleReport, SimulationReport};
pub use history::{HistoryLog, HistoryRecord};
pub use scenario::{Scenario, ScenarioBook, ScenarioResult};
