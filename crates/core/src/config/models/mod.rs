pub mod app_config;
pub mod planning;
pub mod simulation;

pub use app_config::AppConfig;
pub use planning::{default_start_date, PlanningConfig, ScheduleConfig};
pub use simulation::SimulationConfig;
