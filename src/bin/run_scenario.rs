//! Project one or more scenario files and report runway
//!
//! Prints a summary table per scenario and optionally writes each monthly
//! ledger to CSV for spreadsheet comparison.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use runway_planner::projection::export::{
    ledger_file_name, parse_calendar_start, write_ledger_csv_file,
};
use runway_planner::scenario::{load_scenario, SequentialIds};
use runway_planner::{compare_scenarios, Scenario, ScenarioOutcome};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_scenario", about = "Project burn and runway for hiring scenarios")]
struct Args {
    /// Scenario JSON files
    #[arg(required = true)]
    scenarios: Vec<PathBuf>,

    /// Directory to write one `NN_<file-stem>_ledger.csv` per scenario
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Calendar month of month 0 (YYYY-MM), used to label CSV periods
    #[arg(long, value_parser = parse_calendar_start)]
    start: Option<NaiveDate>,

    /// Print full projection and runway results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    // One generator for the whole batch so minted ids never collide across files
    let mut ids = SequentialIds::new();
    let scenarios = args
        .scenarios
        .iter()
        .map(|path| {
            load_scenario(path, &mut ids).with_context(|| format!("loading {}", path.display()))
        })
        .collect::<Result<Vec<Scenario>>>()?;
    println!("Loaded {} scenario(s) in {:?}", scenarios.len(), start.elapsed());

    let outcomes = compare_scenarios(&scenarios);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for (scenario, outcome) in scenarios.iter().zip(&outcomes) {
            print_outcome(scenario, outcome);
        }
        if outcomes.len() > 1 {
            print_comparison(&scenarios, &outcomes);
        }
    }

    if let Some(dir) = &args.csv_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for (index, (source, outcome)) in args.scenarios.iter().zip(&outcomes).enumerate() {
            let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let path = dir.join(ledger_file_name(index, stem));
            write_ledger_csv_file(&outcome.projection, &path, args.start)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Ledger written to {}", path.display());
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

fn print_outcome(scenario: &Scenario, outcome: &ScenarioOutcome) {
    let summary = &outcome.projection.summary;
    let runway = &outcome.runway;
    let ccy = &scenario.currency;

    println!("\n=== {} ({}) ===", scenario.name, scenario.id);
    println!("  Hires: {}, Costs: {}, Multiplier: {:.2}",
             scenario.hires.len(), scenario.non_headcount_costs.len(),
             scenario.employee_cost_multiplier);
    println!("  Starting cash:  {:>14.0} {}", summary.starting_cash, ccy);
    println!("  Ending cash:    {:>14.0} {}", summary.ending_cash, ccy);
    println!("  Total payroll:  {:>14.0} {}", summary.total_payroll_cost, ccy);
    println!("  Total other:    {:>14.0} {}", summary.total_non_headcount_cost, ccy);
    println!("  Current burn:   {:>14.0} {}/mo", runway.current_monthly_burn, ccy);
    println!("  Average burn:   {:>14.0} {}/mo", runway.average_monthly_burn, ccy);
    if let Some(static_runway) = runway.static_runway_months {
        println!("  Static runway:  {:>14.1} months", static_runway);
    }
    println!("  {}", runway.headline(outcome.projection.horizon()));

    println!("  Month | Hires |      Payroll |        Other |   Closing cash");
    for row in &outcome.projection.monthly {
        println!("  {:5} | {:5} | {:12.0} | {:12.0} | {:14.0}",
                 row.month_index + 1, row.active_hires_count,
                 row.payroll_cost, row.non_headcount_cost, row.closing_cash);
    }
}

fn print_comparison(scenarios: &[Scenario], outcomes: &[ScenarioOutcome]) {
    println!("\nComparison:");
    println!("  {:<28} | {:>10} | {:>14} | {:>14}", "Scenario", "Runway", "Avg burn", "Ending cash");
    for (scenario, outcome) in scenarios.iter().zip(outcomes) {
        let runway = outcome
            .runway
            .runway_months
            .map_or_else(|| format!(">{}", scenario.horizon()), |m| m.to_string());
        println!("  {:<28} | {:>10} | {:>14.0} | {:>14.0}",
                 scenario.name, runway,
                 outcome.runway.average_monthly_burn,
                 outcome.projection.summary.ending_cash);
    }
}
