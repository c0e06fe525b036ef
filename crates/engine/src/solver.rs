use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, Solution, SolverModel, Variable,
};
use tracing::{debug, info};

use portfolio_core::{PlannerError, PlannerResult, Selection};
use portfolio_domain::{Catalog, CostBudget, HoursBudget};

/// Slack allowed when re-checking a solver answer against the budgets.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Largest catalog the exhaustive strategy accepts (2^n subsets).
pub const EXHAUSTIVE_LIMIT: usize = 20;

/// Index-based view of a catalog plus budgets, shared by all strategies.
#[derive(Debug, Clone)]
pub struct SelectionProblem {
    pub hours: Vec<f64>,
    pub costs: Vec<f64>,
    pub values: Vec<f64>,
    /// Catalog position of each item's resolved prerequisite.
    pub parents: Vec<Option<usize>>,
    pub hours_budget: HoursBudget,
    pub cost_budget: CostBudget,
}

impl SelectionProblem {
    pub fn from_catalog(
        catalog: &Catalog,
        hours_budget: HoursBudget,
        cost_budget: CostBudget,
    ) -> Self {
        let activities = catalog.activities();
        Self {
            hours: activities.iter().map(|a| a.hours).collect(),
            costs: activities.iter().map(|a| a.cost).collect(),
            values: activities.iter().map(|a| a.value).collect(),
            parents: activities
                .iter()
                .map(|a| catalog.parent_of(a).and_then(|p| catalog.index_of(p.id)))
                .collect(),
            hours_budget,
            cost_budget,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Budgets and prerequisite closure hold for the chosen positions.
    pub fn is_feasible(&self, chosen: &[bool]) -> bool {
        let total = |column: &[f64]| -> f64 {
            column
                .iter()
                .zip(chosen)
                .filter(|(_, &on)| on)
                .map(|(x, _)| x)
                .sum()
        };
        if total(&self.hours) > self.hours_budget.value() + FEASIBILITY_TOLERANCE {
            return false;
        }
        if let Some(limit) = self.cost_budget.limit() {
            if total(&self.costs) > limit + FEASIBILITY_TOLERANCE {
                return false;
            }
        }
        self.parents
            .iter()
            .enumerate()
            .all(|(i, parent)| match parent {
                Some(p) if chosen[i] => chosen[*p],
                _ => true,
            })
    }

    pub fn objective(&self, chosen: &[bool]) -> f64 {
        self.values
            .iter()
            .zip(chosen)
            .filter(|(_, &on)| on)
            .map(|(v, _)| v)
            .sum()
    }
}

/// Exact 0/1 selection backend
///
/// Implementations return one flag per catalog position. They must be exact
/// and deterministic; any two strategies agree on the optimal objective.
pub trait SelectionStrategy: Send + Sync {
    fn solve(&self, problem: &SelectionProblem) -> PlannerResult<Vec<bool>>;

    fn name(&self) -> &str;
}

/// Binary integer program solved with `good_lp` on the pure-Rust `microlp`
/// backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct MilpStrategy;

impl SelectionStrategy for MilpStrategy {
    fn solve(&self, problem: &SelectionProblem) -> PlannerResult<Vec<bool>> {
        if problem.is_empty() {
            return Ok(Vec::new());
        }

        let mut vars = ProblemVariables::new();
        let x: Vec<Variable> = (0..problem.len())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let weighted = |column: &[f64]| -> Expression {
            column.iter().zip(&x).map(|(&c, &v)| c * v).sum()
        };

        let mut model = vars
            .maximise(weighted(&problem.values))
            .using(microlp)
            .with(constraint!(
                weighted(&problem.hours) <= problem.hours_budget.value()
            ));
        if let Some(limit) = problem.cost_budget.limit() {
            model = model.with(constraint!(weighted(&problem.costs) <= limit));
        }
        let mut edges = 0usize;
        for (child, parent) in problem.parents.iter().enumerate() {
            if let Some(parent) = *parent {
                if parent != child {
                    model = model.with(constraint!(x[child] <= x[parent]));
                    edges += 1;
                }
            }
        }
        debug!(
            "MILP with {} binary variables and {} dependency constraints",
            x.len(),
            edges
        );

        let solution = model
            .solve()
            .map_err(|e| PlannerError::solver_error(e.to_string()))?;
        Ok(x.iter().map(|&v| solution.value(v) > 0.5).collect())
    }

    fn name(&self) -> &str {
        "Milp"
    }
}

/// Enumerates every subset. Only for small catalogs; used as an oracle.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveStrategy;

impl SelectionStrategy for ExhaustiveStrategy {
    fn solve(&self, problem: &SelectionProblem) -> PlannerResult<Vec<bool>> {
        let n = problem.len();
        if n > EXHAUSTIVE_LIMIT {
            return Err(PlannerError::invalid_input(format!(
                "exhaustive selection supports at most {EXHAUSTIVE_LIMIT} activities, got {n}"
            )));
        }

        let mut best = vec![false; n];
        let mut best_value = 0.0;
        let mut chosen = vec![false; n];
        for mask in 0u32..(1u32 << n) {
            for (i, flag) in chosen.iter_mut().enumerate() {
                *flag = mask & (1 << i) != 0;
            }
            if !problem.is_feasible(&chosen) {
                continue;
            }
            let value = problem.objective(&chosen);
            if value > best_value + FEASIBILITY_TOLERANCE {
                best_value = value;
                best.clone_from(&chosen);
            }
        }
        Ok(best)
    }

    fn name(&self) -> &str {
        "Exhaustive"
    }
}

/// Budgeted selection over a catalog
pub struct SelectionSolver {
    strategy: Box<dyn SelectionStrategy>,
}

impl Default for SelectionSolver {
    fn default() -> Self {
        Self::new(Box::new(MilpStrategy))
    }
}

impl SelectionSolver {
    pub fn new(strategy: Box<dyn SelectionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Choose the value-maximizing feasible subset of `catalog`.
    ///
    /// Never reports infeasibility: the empty set always fits, so an empty
    /// [`Selection`] is a valid answer.
    pub fn solve(
        &self,
        catalog: &Catalog,
        hours_budget: HoursBudget,
        cost_budget: CostBudget,
    ) -> PlannerResult<Selection> {
        let problem = SelectionProblem::from_catalog(catalog, hours_budget, cost_budget);
        let chosen = self.strategy.solve(&problem)?;
        if chosen.len() != problem.len() || !problem.is_feasible(&chosen) {
            return Err(PlannerError::solver_error(format!(
                "{} strategy returned an infeasible selection",
                self.strategy.name()
            )));
        }

        let selected = catalog
            .iter()
            .zip(&chosen)
            .filter(|(_, &on)| on)
            .map(|(a, _)| a.clone())
            .collect();
        let selection = Selection::from_activities(selected);
        info!(
            "{} selected {} of {} activities: value {:.2}, hours {:.1}/{:.1}, cost {:.1}",
            self.strategy.name(),
            selection.len(),
            catalog.len(),
            selection.total_value,
            selection.total_hours,
            hours_budget.value(),
            selection.total_cost
        );
        Ok(selection)
    }
}

/// `select(catalog, hours_budget, cost_budget_or_none)` with the MILP backend.
pub fn select(
    catalog: &Catalog,
    hours_budget: f64,
    cost_budget: Option<f64>,
) -> PlannerResult<Selection> {
    let hours = HoursBudget::new(hours_budget)?;
    let cost = CostBudget::new(cost_budget)?;
    SelectionSolver::default().solve(catalog, hours, cost)
}
