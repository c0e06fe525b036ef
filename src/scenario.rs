//! Named budget scenarios compared side by side
//!
//! A [`ScenarioBook`] is plain caller-owned state: the `compare` command
//! builds one per invocation and nothing in the engine keeps track of it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use portfolio_core::{PlannerError, PlannerResult, Selection};
use portfolio_domain::Catalog;
use portfolio_engine::select;

/// Budgets of one scenario, parsed from `name:hours[:cost]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub hours_budget: f64,
    pub cost_budget: Option<f64>,
}

impl Scenario {
    pub fn new<S: Into<String>>(name: S, hours_budget: f64, cost_budget: Option<f64>) -> Self {
        Self {
            name: name.into(),
            hours_budget,
            cost_budget,
        }
    }
}

impl FromStr for Scenario {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let number = |raw: &str, what: &str| -> PlannerResult<f64> {
            raw.parse::<f64>().map_err(|_| {
                PlannerError::invalid_input(format!("scenario '{s}': invalid {what} '{raw}'"))
            })
        };

        match parts.as_slice() {
            [name, hours] if !name.is_empty() => {
                Ok(Self::new(*name, number(*hours, "hours")?, None))
            }
            [name, hours, cost] if !name.is_empty() => Ok(Self::new(
                *name,
                number(*hours, "hours")?,
                Some(number(*cost, "cost")?),
            )),
            _ => Err(PlannerError::invalid_input(format!(
                "scenario '{s}' must look like name:hours[:cost]"
            ))),
        }
    }
}

/// Outcome of solving one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub hours_budget: f64,
    pub cost_budget: Option<f64>,
    pub total_value: f64,
    pub total_cost: f64,
    pub total_hours: f64,
    pub selected: usize,
}

impl ScenarioResult {
    pub fn new(scenario: &Scenario, selection: &Selection) -> Self {
        Self {
            name: scenario.name.clone(),
            hours_budget: scenario.hours_budget,
            cost_budget: scenario.cost_budget,
            total_value: selection.total_value,
            total_cost: selection.total_cost,
            total_hours: selection.total_hours,
            selected: selection.len(),
        }
    }
}

/// Ordered collection of scenario results. Recording a name twice replaces
/// the earlier entry in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBook {
    results: Vec<ScenarioResult>,
}

impl ScenarioBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: ScenarioResult) {
        match self.results.iter_mut().find(|r| r.name == result.name) {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    /// Solve `scenario` against `catalog` and record the result.
    pub fn evaluate(&mut self, catalog: &Catalog, scenario: &Scenario) -> PlannerResult<()> {
        let selection = select(catalog, scenario.hours_budget, scenario.cost_budget)?;
        self.record(ScenarioResult::new(scenario, &selection));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ScenarioResult> {
        let position = self.results.iter().position(|r| r.name == name)?;
        Some(self.results.remove(position))
    }

    /// Highest-value scenario; the earliest recorded wins ties.
    pub fn best(&self) -> Option<&ScenarioResult> {
        self.results.iter().reduce(|best, r| {
            if r.total_value > best.total_value {
                r
            } else {
                best
            }
        })
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter()
    }
}
