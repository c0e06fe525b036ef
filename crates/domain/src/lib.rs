//! Domain layer of the portfolio planner
//!
//! Holds the validated activity [`Catalog`], the budget and rate value
//! objects, and the [`DependencyGraph`] service that the scheduler uses for
//! priority propagation and cycle detection.

pub mod catalog;
pub mod dependency_graph;
pub mod value_objects;

pub use catalog::Catalog;
pub use dependency_graph::DependencyGraph;
pub use value_objects::{CostBudget, HoursBudget, MultiplierBand, WeeklyRate};
