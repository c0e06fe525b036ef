use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio::report::{
    render_plan, render_scenarios, render_schedule, render_simulation, render_sweep,
};
use portfolio::{
    failure_kind, load_catalog, HistoryLog, HistoryRecord, Planner, Scenario, ScenarioBook,
    ScenarioResult,
};
use portfolio_core::{AppConfig, LogFormat, LogLevel};
use portfolio_engine::budget_range;

fn main() -> Result<()> {
    let cli = CliApp::parse();
    cli.run().inspect_err(|err| {
        if let Some(kind) = failure_kind(err) {
            error!(kind, "Planner failed: {:#}", err);
        }
    })
}

/// Activity portfolio planner
#[derive(clap::Parser, Debug)]
#[command(name = "portfolio")]
#[command(version)]
#[command(about = "Budgeted activity selection, dependency scheduling and risk simulation")]
struct CliApp {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to config/portfolio.toml or portfolio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level, overrides the config file
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,

    /// Log format: json or pretty
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Select the value-maximizing activities within the budgets
    Plan {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        budgets: BudgetArgs,
        /// Name recorded with this decision in the history file
        #[arg(long, default_value = "plan")]
        name: String,
        /// Append the decision to this JSON-lines history file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Select, then lay the selection out on a serial timeline
    Schedule {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        budgets: BudgetArgs,
        /// Hours worked per week
        #[arg(short, long)]
        weekly_hours: Option<f64>,
        /// First day of the timeline (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// Select, then run a Monte Carlo risk simulation of the selection
    Simulate {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        budgets: BudgetArgs,
        /// Number of trials
        #[arg(short, long)]
        trials: Option<usize>,
        /// RNG seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
        /// Factor applied to every failure probability, in (0, 1]
        #[arg(long)]
        mitigation: Option<f64>,
    },
    /// Solve repeatedly over a range of one budget
    Sweep {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        budgets: BudgetArgs,
        /// Budget to vary
        #[arg(long, value_enum, default_value = "hours")]
        axis: SweepAxis,
        /// First budget of the range
        #[arg(long, default_value = "0")]
        from: f64,
        /// Last budget of the range (defaults to the configured budget)
        #[arg(long)]
        to: Option<f64>,
        /// Number of evenly spaced points
        #[arg(long, default_value = "11")]
        steps: usize,
    },
    /// Compare named scenarios given as name:hours[:cost]
    Compare {
        #[command(flatten)]
        input: InputArgs,
        #[arg(required = true)]
        scenarios: Vec<Scenario>,
        /// Append every scenario result to this JSON-lines history file
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Activity catalog (JSON array of activity rows)
    #[arg(long)]
    catalog: PathBuf,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BudgetArgs {
    /// Hours budget
    #[arg(long)]
    hours: Option<f64>,

    /// Cost budget
    #[arg(long, conflicts_with = "no_cost_limit")]
    cost: Option<f64>,

    /// Leave cost unconstrained
    #[arg(long)]
    no_cost_limit: bool,
}

impl BudgetArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(hours) = self.hours {
            config.planning.hours_budget = hours;
        }
        if self.no_cost_limit {
            config.planning.cost_budget = None;
        } else if let Some(cost) = self.cost {
            config.planning.cost_budget = Some(cost);
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SweepAxis {
    Hours,
    Cost,
}

impl CliApp {
    fn parse() -> Self {
        <Self as clap::Parser>::parse()
    }

    fn run(self) -> Result<()> {
        let mut config = AppConfig::load(self.config.as_deref()).with_context(|| {
            format!(
                "failed to load configuration{}",
                self.config
                    .as_deref()
                    .map(|p| format!(" from {p}"))
                    .unwrap_or_default()
            )
        })?;
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        init_logging(config.logging.level, config.logging.format)?;
        debug!("Effective configuration: {:?}", config);

        match self.command {
            Commands::Plan {
                input,
                budgets,
                name,
                history,
            } => {
                budgets.apply(&mut config);
                let (planner, catalog) = prepare(config, &input)?;
                let report = planner.plan(&catalog)?;
                if let Some(path) = history {
                    let planning = &planner.config().planning;
                    let scenario =
                        Scenario::new(name, planning.hours_budget, planning.cost_budget);
                    let result = ScenarioResult::new(&scenario, &report.selection);
                    record_history(&path, [&result])?;
                }
                emit(&input, &report, render_plan)
            }
            Commands::Schedule {
                input,
                budgets,
                weekly_hours,
                start_date,
            } => {
                budgets.apply(&mut config);
                if let Some(rate) = weekly_hours {
                    config.schedule.weekly_hours = rate;
                }
                if let Some(date) = start_date {
                    config.schedule.start_date = date;
                }
                let (planner, catalog) = prepare(config, &input)?;
                let report = planner.schedule(&catalog)?;
                emit(&input, &report, render_schedule)
            }
            Commands::Simulate {
                input,
                budgets,
                trials,
                seed,
                mitigation,
            } => {
                budgets.apply(&mut config);
                if let Some(trials) = trials {
                    config.simulation.trials = trials;
                }
                if seed.is_some() {
                    config.simulation.seed = seed;
                }
                if let Some(factor) = mitigation {
                    config.simulation.failure_mitigation = factor;
                }
                let (planner, catalog) = prepare(config, &input)?;
                let report = planner.simulate(&catalog)?;
                info!("Simulation seed {}", report.seed);
                emit(&input, &report, render_simulation)
            }
            Commands::Sweep {
                input,
                budgets,
                axis,
                from,
                to,
                steps,
            } => {
                budgets.apply(&mut config);
                let (planner, catalog) = prepare(config, &input)?;
                let planning = &planner.config().planning;
                let points = match axis {
                    SweepAxis::Hours => {
                        let to = to.unwrap_or(planning.hours_budget);
                        planner.sweep_hours(&catalog, &budget_range(from, to, steps))?
                    }
                    SweepAxis::Cost => {
                        let to = to
                            .or(planning.cost_budget)
                            .context("cost sweep needs --to when cost is unconstrained")?;
                        planner.sweep_cost(&catalog, &budget_range(from, to, steps))?
                    }
                };
                emit(&input, &points, |p: &Vec<_>| render_sweep(p))
            }
            Commands::Compare {
                input,
                scenarios,
                history,
            } => {
                let (_, catalog) = prepare(config, &input)?;
                let mut book = ScenarioBook::new();
                for scenario in &scenarios {
                    book.evaluate(&catalog, scenario)
                        .with_context(|| format!("scenario '{}' failed", scenario.name))?;
                }
                if let Some(path) = history {
                    record_history(&path, book.iter())?;
                }
                emit(&input, &book, render_scenarios)
            }
        }
    }
}

fn prepare(config: AppConfig, input: &InputArgs) -> Result<(Planner, portfolio_domain::Catalog)> {
    config.validate().context("invalid planner settings")?;
    let catalog = load_catalog(&input.catalog)?;
    Ok((Planner::new(config), catalog))
}

fn record_history<'a>(
    path: &std::path::Path,
    results: impl IntoIterator<Item = &'a ScenarioResult>,
) -> Result<()> {
    let log = HistoryLog::new(path);
    for result in results {
        log.append(&HistoryRecord::new(result))
            .with_context(|| format!("failed to append history to {}", path.display()))?;
    }
    Ok(())
}

fn emit<T: Serialize>(input: &InputArgs, report: &T, render: impl Fn(&T) -> String) -> Result<()> {
    if input.json {
        let text = serde_json::to_string_pretty(report).context("failed to serialize report")?;
        println!("{text}");
    } else {
        println!("{}", render(report));
    }
    Ok(())
}

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
fn init_logging(log_level: LogLevel, log_format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        LogFormat::Json => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("failed to initialize JSON logging")?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("failed to initialize pretty logging")?;
        }
    }

    Ok(())
}
