//! Runway estimation from a projected ledger
//!
//! Derives the "when does cash run out" verdict. Works purely on the
//! projector's output; the ledger is never recomputed.

use crate::projection::ProjectionResult;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Runway Thresholds
// ============================================================================
// Fixed UX thresholds, applied only when cash runs out within the horizon.

/// Runway shorter than this many months is flagged as very short
pub const VERY_SHORT_RUNWAY_MONTHS: u32 = 6;

/// Runway of at least this many months is considered safe
pub const SAFE_RUNWAY_MONTHS: u32 = 18;

/// Derived runway figures for one projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayVerdict {
    /// Cash turns negative somewhere inside the projection horizon
    pub has_runway_end: bool,

    /// 1-based count of months until cash turns negative
    /// (cash goes negative during month N, month 1 being the first)
    pub runway_months: Option<u32>,

    /// 0-based ledger index of the cash-out month
    pub cash_out_month: Option<u32>,

    pub average_monthly_burn: f64,

    /// Burn of month 0, the "today" snapshot
    pub current_monthly_burn: f64,

    /// starting_cash / current_monthly_burn, ignoring any future ramp-up
    pub static_runway_months: Option<f64>,

    pub very_short_runway: bool,
    pub safe_runway: bool,
}

/// Coarse runway classification for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunwayStatus {
    /// Cash stays non-negative for the whole horizon
    NoCashOut,
    /// Runs out in under 6 months
    Critical,
    /// Runs out between 6 and 17 months
    Caution,
    /// Runs out at 18 months or later
    Safe,
}

/// Estimate runway from a projection result
pub fn estimate_runway(projection: &ProjectionResult) -> RunwayVerdict {
    let summary = &projection.summary;

    let cash_out_month = summary.first_negative_month;
    let has_runway_end = cash_out_month.is_some();
    let runway_months = cash_out_month.map(|month| month + 1);

    let current_monthly_burn = projection
        .monthly
        .first()
        .map(|row| row.total_cost)
        .unwrap_or(0.0);

    let static_runway_months = if current_monthly_burn > 0.0 {
        Some(summary.starting_cash / current_monthly_burn)
    } else {
        None
    };

    RunwayVerdict {
        has_runway_end,
        runway_months,
        cash_out_month,
        average_monthly_burn: summary.average_monthly_burn,
        current_monthly_burn,
        static_runway_months,
        very_short_runway: runway_months.is_some_and(|m| m < VERY_SHORT_RUNWAY_MONTHS),
        safe_runway: runway_months.is_some_and(|m| m >= SAFE_RUNWAY_MONTHS),
    }
}

impl RunwayVerdict {
    pub fn status(&self) -> RunwayStatus {
        match self.runway_months {
            None => RunwayStatus::NoCashOut,
            Some(_) if self.very_short_runway => RunwayStatus::Critical,
            Some(_) if self.safe_runway => RunwayStatus::Safe,
            Some(_) => RunwayStatus::Caution,
        }
    }

    /// One-line description; `horizon` is the projected month count
    pub fn headline(&self, horizon: usize) -> String {
        match self.runway_months {
            Some(months) => format!("Cash runs out in month {} ({})", months, self.status()),
            None => format!("No cash-out within the {}-month projection", horizon),
        }
    }
}

impl fmt::Display for RunwayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunwayStatus::NoCashOut => "no cash-out",
            RunwayStatus::Critical => "critical",
            RunwayStatus::Caution => "caution",
            RunwayStatus::Safe => "safe",
        };
        f.write_str(label)
    }
}
