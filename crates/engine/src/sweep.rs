use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use portfolio_core::{PlannerResult, Selection};
use portfolio_domain::Catalog;

use crate::solver::select;

/// Optimal plan at one budget setting of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub hours_budget: f64,
    pub cost_budget: Option<f64>,
    pub total_value: f64,
    pub total_hours: f64,
    pub total_cost: f64,
    pub selected: usize,
}

impl SweepPoint {
    fn new(hours_budget: f64, cost_budget: Option<f64>, selection: &Selection) -> Self {
        Self {
            hours_budget,
            cost_budget,
            total_value: selection.total_value,
            total_hours: selection.total_hours,
            total_cost: selection.total_cost,
            selected: selection.len(),
        }
    }
}

/// Solve once per hours budget, in parallel. Points keep input order.
pub fn sweep_hours(
    catalog: &Catalog,
    hours_budgets: &[f64],
    cost_budget: Option<f64>,
) -> PlannerResult<Vec<SweepPoint>> {
    let points = hours_budgets
        .par_iter()
        .map(|&hours| {
            select(catalog, hours, cost_budget)
                .map(|selection| SweepPoint::new(hours, cost_budget, &selection))
        })
        .collect::<PlannerResult<Vec<_>>>()?;
    info!("Hours sweep finished with {} points", points.len());
    Ok(points)
}

/// Solve once per cost budget, in parallel. Points keep input order.
pub fn sweep_cost(
    catalog: &Catalog,
    hours_budget: f64,
    cost_budgets: &[f64],
) -> PlannerResult<Vec<SweepPoint>> {
    let points = cost_budgets
        .par_iter()
        .map(|&cost| {
            select(catalog, hours_budget, Some(cost))
                .map(|selection| SweepPoint::new(hours_budget, Some(cost), &selection))
        })
        .collect::<PlannerResult<Vec<_>>>()?;
    info!("Cost sweep finished with {} points", points.len());
    Ok(points)
}

/// `count` evenly spaced budgets from `start` to `end` inclusive.
pub fn budget_range(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
