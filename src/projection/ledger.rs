//! Monthly ledger rows and projection summary

use crate::runway::{estimate_runway, RunwayVerdict};
use serde::{Deserialize, Serialize};

/// One projected month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLedgerRow {
    /// 0-based month index
    pub month_index: u32,
    pub active_hires_count: usize,
    /// Loaded payroll for the month (salary / 12 × multiplier, summed)
    pub payroll_cost: f64,
    pub non_headcount_cost: f64,
    /// Burn for the month: payroll + non-headcount
    pub total_cost: f64,
    /// Cash at month end: previous closing cash - total_cost
    pub closing_cash: f64,
}

/// Horizon-wide totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub starting_cash: f64,
    pub ending_cash: f64,
    pub total_payroll_cost: f64,
    pub total_non_headcount_cost: f64,
    /// Total burn / projection months
    pub average_monthly_burn: f64,
    /// First month with strictly negative closing cash
    pub first_negative_month: Option<u32>,
}

/// Complete projector output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub monthly: Vec<MonthlyLedgerRow>,
    pub summary: Summary,
}

impl ProjectionResult {
    /// Number of projected months
    pub fn horizon(&self) -> usize {
        self.monthly.len()
    }

    pub fn row(&self, month: u32) -> Option<&MonthlyLedgerRow> {
        self.monthly.get(month as usize)
    }

    /// Total burn across the horizon
    pub fn total_burn(&self) -> f64 {
        self.monthly.iter().map(|r| r.total_cost).sum()
    }

    /// Month with the highest burn (earliest on ties)
    pub fn peak_monthly_burn(&self) -> Option<&MonthlyLedgerRow> {
        self.monthly.iter().fold(None, |peak: Option<&MonthlyLedgerRow>, row| match peak {
            Some(p) if p.total_cost >= row.total_cost => Some(p),
            _ => Some(row),
        })
    }

    /// Runway verdict derived from this ledger
    pub fn runway(&self) -> RunwayVerdict {
        estimate_runway(self)
    }
}
