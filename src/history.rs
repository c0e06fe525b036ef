//! Append-only decision history
//!
//! Each planning decision is written as one JSON line so the file can be
//! tailed, grepped, or loaded back with [`HistoryLog::read_all`].

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use portfolio_core::{PlannerError, PlannerResult};

use crate::scenario::ScenarioResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub scenario: String,
    pub hours_budget: f64,
    pub cost_budget: Option<f64>,
    pub total_value: f64,
    pub total_cost: f64,
    /// Planned hours of the selection, before any simulated overrun.
    pub total_hours: f64,
    pub selected: usize,
}

impl HistoryRecord {
    pub fn new(result: &ScenarioResult) -> Self {
        Self::at(Utc::now(), result)
    }

    pub fn at(timestamp: DateTime<Utc>, result: &ScenarioResult) -> Self {
        Self {
            timestamp,
            scenario: result.name.clone(),
            hours_budget: result.hours_budget,
            cost_budget: result.cost_budget,
            total_value: result.total_value,
            total_cost: result.total_cost,
            total_hours: result.total_hours,
            selected: result.selected,
        }
    }
}

/// JSONL file of [`HistoryRecord`]s. Existing lines are never rewritten.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &HistoryRecord) -> PlannerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        debug!(
            "Appended history record '{}' to {}",
            record.scenario,
            self.path.display()
        );
        Ok(())
    }

    /// All records in file order. A missing file is an empty history.
    pub fn read_all(&self) -> PlannerResult<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|e| {
                PlannerError::Serialization(format!(
                    "{} line {}: {}",
                    self.path.display(),
                    index + 1,
                    e
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
