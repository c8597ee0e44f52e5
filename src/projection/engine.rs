//! Month-by-month burn projection

use super::{MonthlyLedgerRow, ProjectionResult, Summary};
use crate::scenario::Scenario;
use log::debug;

/// Project a scenario over its full horizon.
///
/// Months run strictly in order since each closing balance feeds the next.
/// The scenario is only read; identical input always yields an identical
/// ledger.
pub fn project(scenario: &Scenario) -> ProjectionResult {
    let horizon = scenario.horizon();
    let mut monthly = Vec::with_capacity(horizon as usize);

    let mut closing_cash = scenario.starting_cash;
    let mut first_negative_month = None;

    // Running totals for the summary
    let mut total_payroll_cost = 0.0;
    let mut total_non_headcount_cost = 0.0;
    let mut total_burn = 0.0;

    for month in scenario.months() {
        let row = project_month(scenario, month, closing_cash);

        // Zero cash is not a cash-out; only strictly negative balances count
        if first_negative_month.is_none() && row.closing_cash < 0.0 {
            first_negative_month = Some(month);
        }

        total_payroll_cost += row.payroll_cost;
        total_non_headcount_cost += row.non_headcount_cost;
        total_burn += row.total_cost;
        closing_cash = row.closing_cash;

        monthly.push(row);
    }

    let summary = Summary {
        starting_cash: scenario.starting_cash,
        ending_cash: closing_cash,
        total_payroll_cost,
        total_non_headcount_cost,
        average_monthly_burn: total_burn / horizon as f64,
        first_negative_month,
    };

    debug!(
        "Projected '{}' over {} months: ending cash {:.2}, first negative month {:?}",
        scenario.name, horizon, summary.ending_cash, summary.first_negative_month
    );

    ProjectionResult { monthly, summary }
}

/// Compute a single ledger row from the previous month's closing cash
fn project_month(scenario: &Scenario, month: u32, opening_cash: f64) -> MonthlyLedgerRow {
    let mut active_hires_count = 0;
    let mut payroll_cost = 0.0;
    for hire in scenario.active_hires(month) {
        active_hires_count += 1;
        payroll_cost += hire.loaded_monthly_cost(scenario.employee_cost_multiplier);
    }

    let non_headcount_cost: f64 = scenario
        .active_costs(month)
        .map(|cost| cost.monthly_amount)
        .sum();

    let total_cost = payroll_cost + non_headcount_cost;

    MonthlyLedgerRow {
        month_index: month,
        active_hires_count,
        payroll_cost,
        non_headcount_cost,
        total_cost,
        closing_cash: opening_cash - total_cost,
    }
}
