use thiserror::Error;

use crate::models::ActivityId;

/// Planner error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid activity {id}: {reason}")]
    InvalidActivity { id: ActivityId, reason: String },

    #[error("duplicate activity id: {id}")]
    DuplicateActivity { id: ActivityId },

    #[error("invalid {name} budget: {value}")]
    InvalidBudget { name: &'static str, value: f64 },

    #[error("invalid weekly work rate: {0} (must be finite and > 0)")]
    InvalidWeeklyRate(f64),

    #[error("circular dependency detected at activity {id}")]
    CircularDependency { id: ActivityId },

    #[error("solver failure: {0}")]
    Solver(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

impl PlannerError {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
    pub fn invalid_activity<S: Into<String>>(id: ActivityId, reason: S) -> Self {
        Self::InvalidActivity {
            id,
            reason: reason.into(),
        }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn solver_error<S: Into<String>>(msg: S) -> Self {
        Self::Solver(msg.into())
    }

    /// Errors caused by the caller's data rather than by the engine.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PlannerError::InvalidInput(_)
                | PlannerError::InvalidActivity { .. }
                | PlannerError::DuplicateActivity { .. }
                | PlannerError::InvalidBudget { .. }
                | PlannerError::InvalidWeeklyRate(_)
                | PlannerError::CircularDependency { .. }
        )
    }

    /// Nothing in the planner is retried; fatal errors abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PlannerError::CircularDependency { .. }
                | PlannerError::Solver(_)
                | PlannerError::Configuration(_)
        )
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for PlannerError {
    fn from(err: config::ConfigError) -> Self {
        PlannerError::Configuration(err.to_string())
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::Io(err.to_string())
    }
}

/// Unified result type
pub type PlannerResult<T> = std::result::Result<T, PlannerError>;
