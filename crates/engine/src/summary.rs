use serde::{Deserialize, Serialize};

use portfolio_core::Selection;
use portfolio_domain::{CostBudget, HoursBudget};

/// Headline figures of a selection against its budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub activities: usize,
    pub total_value: f64,
    pub total_hours: f64,
    pub total_cost: f64,
    pub hours_budget: f64,
    pub cost_budget: Option<f64>,
    pub remaining_hours: f64,
    pub remaining_cost: Option<f64>,
}

impl PlanSummary {
    pub fn new(selection: &Selection, hours_budget: HoursBudget, cost_budget: CostBudget) -> Self {
        Self {
            activities: selection.len(),
            total_value: selection.total_value,
            total_hours: selection.total_hours,
            total_cost: selection.total_cost,
            hours_budget: hours_budget.value(),
            cost_budget: cost_budget.limit(),
            remaining_hours: hours_budget.value() - selection.total_hours,
            remaining_cost: cost_budget.limit().map(|limit| limit - selection.total_cost),
        }
    }
}
