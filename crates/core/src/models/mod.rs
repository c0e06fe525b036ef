//! # Data model
//!
//! Core structures shared by the planner crates.
//!
//! - [`Activity`]: immutable candidate unit of work from the catalog
//! - [`Selection`]: the subset chosen by the selection solver
//! - [`Placement`] / [`Schedule`]: the serial timeline built from a selection
//! - [`TrialOutcome`] / [`SimulationRun`]: samples drawn by the risk simulator
//!
//! All models derive `Serialize`/`Deserialize` so the orchestration layer can
//! read catalogs and emit reports as JSON.

pub mod activity;
pub mod outcome;
pub mod placement;
pub mod selection;

pub use activity::{Activity, ActivityId};
pub use outcome::{SimulationRun, TrialOutcome};
pub use placement::{Placement, Schedule};
pub use selection::Selection;
