//! CSV export of the monthly ledger

use super::{MonthlyLedgerRow, ProjectionResult};
use crate::error::ScenarioError;
use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct LedgerRecord {
    month: u32,
    period: String,
    active_hires: usize,
    payroll_cost: f64,
    non_headcount_cost: f64,
    total_cost: f64,
    closing_cash: f64,
}

impl LedgerRecord {
    fn from_row(row: &MonthlyLedgerRow, calendar_start: Option<NaiveDate>) -> Self {
        Self {
            month: row.month_index,
            period: calendar_start
                .map(|start| period_label(start, row.month_index))
                .unwrap_or_default(),
            active_hires: row.active_hires_count,
            payroll_cost: cents(row.payroll_cost),
            non_headcount_cost: cents(row.non_headcount_cost),
            total_cost: cents(row.total_cost),
            closing_cash: cents(row.closing_cash),
        }
    }
}

/// Write one CSV record per ledger row.
///
/// `calendar_start` labels month 0; when absent the `period` column is blank.
pub fn write_ledger_csv<W: Write>(
    result: &ProjectionResult,
    writer: W,
    calendar_start: Option<NaiveDate>,
) -> Result<(), ScenarioError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in &result.monthly {
        csv.serialize(LedgerRecord::from_row(row, calendar_start))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_ledger_csv_file<P: AsRef<Path>>(
    result: &ProjectionResult,
    path: P,
    calendar_start: Option<NaiveDate>,
) -> Result<(), ScenarioError> {
    let file = File::create(path)?;
    write_ledger_csv(result, file, calendar_start)
}

/// File name for the `index`-th ledger in a batch: `NN_<label>_ledger.csv`.
///
/// `label` is reduced to ASCII alphanumerics, `-` and `_`, so the name never
/// leaves the output directory. The index keeps names unique within a batch.
pub fn ledger_file_name(index: usize, label: &str) -> String {
    let safe: String = label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if safe.is_empty() {
        format!("{:02}_ledger.csv", index + 1)
    } else {
        format!("{:02}_{}_ledger.csv", index + 1, safe)
    }
}

/// Parse a `YYYY-MM` calendar month into its first day
pub fn parse_calendar_start(month: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
}

/// `YYYY-MM` label for a month offset from the calendar start
pub fn period_label(start: NaiveDate, month_index: u32) -> String {
    start
        .checked_add_months(Months::new(month_index))
        .map(|date| date.format("%Y-%m").to_string())
        .unwrap_or_default()
}

// Rounding happens on output only; the ledger keeps full precision
fn cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
