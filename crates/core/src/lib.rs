pub mod config;
pub mod errors;
pub mod logging;
pub mod models;

pub use config::{AppConfig, PlanningConfig, ScheduleConfig, SimulationConfig};
pub use errors::*;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{
    Activity, ActivityId, Placement, Schedule, Selection, SimulationRun, TrialOutcome,
};
