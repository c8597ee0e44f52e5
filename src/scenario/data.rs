//! Scenario data structures

use super::builder::horizon_from_i64;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::num::NonZeroU32;
use std::ops::Range;

/// Fixed 12-month year used to convert annual salaries to monthly cost
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Last month an entry is active, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum EndMonth {
    /// Active through the end of the projection horizon
    #[default]
    Indefinite,
    /// Active up to and including this month index
    EndsAt(u32),
}

impl EndMonth {
    /// Whether `month` falls on or before the end bound
    pub fn covers(self, month: u32) -> bool {
        match self {
            EndMonth::Indefinite => true,
            EndMonth::EndsAt(end) => month <= end,
        }
    }

    pub fn month(self) -> Option<u32> {
        match self {
            EndMonth::Indefinite => None,
            EndMonth::EndsAt(end) => Some(end),
        }
    }
}

impl From<Option<u32>> for EndMonth {
    fn from(end: Option<u32>) -> Self {
        end.map_or(EndMonth::Indefinite, EndMonth::EndsAt)
    }
}

impl From<EndMonth> for Option<u32> {
    fn from(end: EndMonth) -> Self {
        end.month()
    }
}

/// A headcount line: one role with its salary and active window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hire {
    pub id: String,
    pub title: String,
    /// Base annual salary, before the employee cost multiplier
    pub annual_salary: f64,
    /// First month (0-based) the hire is on payroll
    pub start_month: u32,
    #[serde(default)]
    pub end_month: EndMonth,
}

impl Hire {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        annual_salary: f64,
        start_month: u32,
        end_month: EndMonth,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            annual_salary,
            start_month,
            end_month,
        }
    }

    /// Active iff start_month <= month <= end_month (end inclusive)
    pub fn is_active(&self, month: u32) -> bool {
        self.start_month <= month && self.end_month.covers(month)
    }

    /// Monthly base salary (annual / 12, no day-count adjustment)
    pub fn monthly_base_salary(&self) -> f64 {
        self.annual_salary / MONTHS_PER_YEAR
    }

    /// Monthly loaded cost: base salary scaled by the employee cost multiplier
    pub fn loaded_monthly_cost(&self, employee_cost_multiplier: f64) -> f64 {
        self.monthly_base_salary() * employee_cost_multiplier
    }
}

/// A non-headcount expense (rent, software, legal, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonHeadcountCost {
    pub id: String,
    pub label: String,
    pub monthly_amount: f64,
    pub start_month: u32,
    /// Ignored for one-time costs
    #[serde(default)]
    pub end_month: EndMonth,
    /// Applied exactly once, in `start_month`
    #[serde(default)]
    pub is_one_time: bool,
}

impl NonHeadcountCost {
    /// Recurring cost active over [start_month, end_month]
    pub fn recurring(
        id: impl Into<String>,
        label: impl Into<String>,
        monthly_amount: f64,
        start_month: u32,
        end_month: EndMonth,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            monthly_amount,
            start_month,
            end_month,
            is_one_time: false,
        }
    }

    /// One-time cost charged in `month` only
    pub fn one_time(
        id: impl Into<String>,
        label: impl Into<String>,
        amount: f64,
        month: u32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            monthly_amount: amount,
            start_month: month,
            end_month: EndMonth::Indefinite,
            is_one_time: true,
        }
    }

    pub fn is_active(&self, month: u32) -> bool {
        if self.is_one_time {
            // End month has no effect on one-time costs
            self.start_month == month
        } else {
            self.start_month <= month && self.end_month.covers(month)
        }
    }
}

fn deserialize_horizon<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NonZeroU32, D::Error> {
    let months = i64::deserialize(deserializer)?;
    horizon_from_i64(months).map_err(de::Error::custom)
}

fn default_currency() -> String { "USD".to_string() }
fn default_multiplier() -> f64 { 1.0 }

/// A complete, named planning configuration fed to the projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,

    /// Cash on hand at the start of month 0
    pub starting_cash: f64,

    /// Display label only; no conversion is performed
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Number of projected months (months are indexed 0..projection_months)
    #[serde(deserialize_with = "deserialize_horizon")]
    pub projection_months: NonZeroU32,

    /// Loaded-cost factor applied uniformly to every hire (1.0 = salary only)
    #[serde(default = "default_multiplier")]
    pub employee_cost_multiplier: f64,

    #[serde(default)]
    pub hires: Vec<Hire>,

    #[serde(default)]
    pub non_headcount_costs: Vec<NonHeadcountCost>,

    /// Commentary attached by an external insight generator; never read here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<serde_json::Value>,
}

impl Scenario {
    /// Projection horizon in months
    pub fn horizon(&self) -> u32 {
        self.projection_months.get()
    }

    /// Month indices covered by the projection
    pub fn months(&self) -> Range<u32> {
        0..self.horizon()
    }

    pub fn active_hires(&self, month: u32) -> impl Iterator<Item = &Hire> + '_ {
        self.hires.iter().filter(move |h| h.is_active(month))
    }

    pub fn active_costs(&self, month: u32) -> impl Iterator<Item = &NonHeadcountCost> + '_ {
        self.non_headcount_costs.iter().filter(move |c| c.is_active(month))
    }

    /// Copy of this scenario with one more hire
    pub fn with_hire(&self, hire: Hire) -> Self {
        let mut next = self.clone();
        next.hires.push(hire);
        next
    }

    /// Copy of this scenario with one more non-headcount cost
    pub fn with_cost(&self, cost: NonHeadcountCost) -> Self {
        let mut next = self.clone();
        next.non_headcount_costs.push(cost);
        next
    }

    /// Copy of this scenario without any hire carrying `id`
    pub fn without_hire(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.hires.retain(|h| h.id != id);
        next
    }

    /// Copy of this scenario without any cost carrying `id`
    pub fn without_cost(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.non_headcount_costs.retain(|c| c.id != id);
        next
    }

    /// Serialize to the shared camelCase JSON shape
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
