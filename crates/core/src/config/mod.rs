//! Planner configuration
//!
//! Configuration is assembled from built-in defaults, an optional TOML file
//! and `PORTFOLIO_`-prefixed environment variables, then validated section by
//! section. The engine itself never reads configuration: callers turn the
//! loaded sections into explicit arguments.

pub mod models;

pub use models::*;
