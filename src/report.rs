//! Plain-text renderings of planner reports.

use portfolio_engine::{PlanSummary, SweepPoint};

use crate::app::{PlanReport, ScheduleReport, SimulationReport};
use crate::scenario::ScenarioBook;

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "unlimited".to_string(), |v| format!("{v:.2}"))
}

fn summary_lines(summary: &PlanSummary) -> Vec<String> {
    vec![
        format!("Activities selected: {}", summary.activities),
        format!("Total value:         {:.2}", summary.total_value),
        format!(
            "Hours:               {:.1} of {:.1} ({:.1} left)",
            summary.total_hours, summary.hours_budget, summary.remaining_hours
        ),
        format!(
            "Cost:                {:.2} of {} ({} left)",
            summary.total_cost,
            money(summary.cost_budget),
            money(summary.remaining_cost)
        ),
    ]
}

pub fn render_plan(report: &PlanReport) -> String {
    let mut lines = summary_lines(&report.summary);
    lines.push(String::new());
    lines.push(format!(
        "{:>6}  {:<32} {:>8} {:>10} {:>8} {:>6}",
        "id", "activity", "hours", "cost", "value", "p"
    ));
    for a in &report.selection.activities {
        lines.push(format!(
            "{:>6}  {:<32} {:>8.1} {:>10.2} {:>8.2} {:>6.2}",
            a.id, a.label, a.hours, a.cost, a.value, a.success_probability
        ));
    }
    lines.join("\n")
}

pub fn render_schedule(report: &ScheduleReport) -> String {
    let mut lines = summary_lines(&report.summary);
    lines.push(String::new());
    lines.push(format!(
        "{:>6}  {:<32} {:<10}  {:<10} {:>5} {:>8}",
        "id", "activity", "start", "end", "days", "priority"
    ));
    for p in report.schedule.iter() {
        lines.push(format!(
            "{:>6}  {:<32} {:<10}  {:<10} {:>5} {:>8.2}",
            p.activity_id, p.label, p.start_date, p.end_date, p.duration_days, p.effective_priority
        ));
    }
    if let Some(finish) = report.schedule.finish_date() {
        lines.push(format!(
            "Finishes {} after {} days",
            finish,
            report.schedule.total_days()
        ));
    }
    lines.join("\n")
}

pub fn render_simulation(report: &SimulationReport) -> String {
    let mut lines = summary_lines(&report.summary);
    lines.push(String::new());
    match &report.statistics {
        Some(stats) => {
            lines.push(format!("Trials: {} (seed {})", stats.trials, report.seed));
            lines.push(format!(
                "Hours  mean {:.1}  p50 {:.1}  p90 {:.1}",
                stats.time_mean, stats.time_p50, stats.time_p90
            ));
            lines.push(format!(
                "Value  mean {:.2}  p50 {:.2}  p10 {:.2}",
                stats.value_mean, stats.value_p50, stats.value_p10
            ));
            lines.push(format!(
                "Chance of staying within {:.1}h: {:.1}%",
                report.summary.hours_budget,
                report.within_hours_budget * 100.0
            ));
        }
        None => lines.push("No trials were run".to_string()),
    }
    lines.join("\n")
}

pub fn render_sweep(points: &[SweepPoint]) -> String {
    let mut lines = vec![format!(
        "{:>10} {:>10} {:>10} {:>8} {:>10} {:>6}",
        "hours", "cost", "value", "used h", "spent", "count"
    )];
    for p in points {
        lines.push(format!(
            "{:>10.1} {:>10} {:>10.2} {:>8.1} {:>10.2} {:>6}",
            p.hours_budget,
            money(p.cost_budget),
            p.total_value,
            p.total_hours,
            p.total_cost,
            p.selected
        ));
    }
    lines.join("\n")
}

pub fn render_scenarios(book: &ScenarioBook) -> String {
    let mut lines = vec![format!(
        "{:<16} {:>8} {:>10} {:>10} {:>10} {:>6}",
        "scenario", "hours", "budget", "value", "cost", "count"
    )];
    for r in book.iter() {
        lines.push(format!(
            "{:<16} {:>8.1} {:>10} {:>10.2} {:>10.2} {:>6}",
            r.name,
            r.hours_budget,
            money(r.cost_budget),
            r.total_value,
            r.total_cost,
            r.selected
        ));
    }
    if let Some(best) = book.best() {
        lines.push(format!("Best: {} ({:.2})", best.name, best.total_value));
    }
    lines.join("\n")
}
