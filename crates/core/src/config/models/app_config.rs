use std::path::Path;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    planning::{PlanningConfig, ScheduleConfig},
    simulation::SimulationConfig,
};
use crate::errors::{PlannerError, PlannerResult};
use crate::logging::LogConfig;

/// Planner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

impl AppConfig {
    /// Load configuration from a config file and environment variables
    ///
    /// Load order:
    /// 1. Built-in defaults
    /// 2. Config file (TOML format)
    /// 3. Environment variable overrides (`PORTFOLIO_<SECTION>__<KEY>`)
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file path; if None the default paths are searched
    pub fn load(config_path: Option<&str>) -> PlannerResult<Self> {
        let defaults = AppConfig::default();
        let mut builder = ConfigBuilder::builder()
            .set_default("planning.hours_budget", defaults.planning.hours_budget)?
            .set_default("schedule.weekly_hours", defaults.schedule.weekly_hours)?
            .set_default(
                "schedule.start_date",
                defaults.schedule.start_date.to_string(),
            )?
            .set_default("simulation.trials", defaults.simulation.trials as u64)?
            .set_default(
                "simulation.multiplier_low",
                defaults.simulation.multiplier_low,
            )?
            .set_default(
                "simulation.multiplier_high",
                defaults.simulation.multiplier_high,
            )?
            .set_default(
                "simulation.failure_mitigation",
                defaults.simulation.failure_mitigation,
            )?
            .set_default("logging.level", defaults.logging.level.as_str())?
            .set_default("logging.format", defaults.logging.format.as_str())?;

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(PlannerError::config_error(format!(
                    "config file not found: {path}"
                )));
            }
            debug!("Loading configuration from {}", path);
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        } else {
            let default_paths = ["config/portfolio.toml", "portfolio.toml"];
            if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
                debug!("Loading configuration from {}", path);
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> PlannerResult<Self> {
        let config: AppConfig = toml::from_str(toml_str)
            .map_err(|e| PlannerError::config_error(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> PlannerResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PlannerError::Serialization(format!("TOML serialize error: {e}")))
    }

    pub fn validate(&self) -> PlannerResult<()> {
        self.planning.validate()?;
        self.schedule.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}
