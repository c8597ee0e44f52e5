//! Fluent scenario construction with injected id generation

use super::{EndMonth, Hire, IdGenerator, NonHeadcountCost, Scenario};
use crate::error::ScenarioError;
use std::num::NonZeroU32;

/// Default projection horizon for new scenarios (months)
pub const DEFAULT_PROJECTION_MONTHS: i64 = 24;

/// Shortest accepted projection horizon (months)
pub const MIN_PROJECTION_MONTHS: u32 = 1;

/// Longest accepted projection horizon (months).
///
/// Runway planning looks at most five years out. The ledger is allocated up
/// front, so anything beyond this is rejected rather than projected.
pub const MAX_PROJECTION_MONTHS: u32 = 60;

/// Builds a validated [`Scenario`], minting every id from the supplied generator
pub struct ScenarioBuilder<'a> {
    ids: &'a mut dyn IdGenerator,
    name: String,
    currency: String,
    starting_cash: f64,
    projection_months: i64,
    employee_cost_multiplier: f64,
    hires: Vec<Hire>,
    non_headcount_costs: Vec<NonHeadcountCost>,
}

impl<'a> ScenarioBuilder<'a> {
    pub fn new(ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            ids,
            name: "Untitled scenario".to_string(),
            currency: "USD".to_string(),
            starting_cash: 0.0,
            projection_months: DEFAULT_PROJECTION_MONTHS,
            employee_cost_multiplier: 1.0,
            hires: Vec::new(),
            non_headcount_costs: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn starting_cash(mut self, cash: f64) -> Self {
        self.starting_cash = cash;
        self
    }

    /// Horizon is checked in [`build`](Self::build), not here
    pub fn projection_months(mut self, months: i64) -> Self {
        self.projection_months = months;
        self
    }

    pub fn employee_cost_multiplier(mut self, multiplier: f64) -> Self {
        self.employee_cost_multiplier = multiplier;
        self
    }

    pub fn hire(
        mut self,
        title: impl Into<String>,
        annual_salary: f64,
        start_month: u32,
        end_month: EndMonth,
    ) -> Self {
        let id = self.ids.next_id("hire");
        self.hires.push(Hire::new(id, title, annual_salary, start_month, end_month));
        self
    }

    pub fn recurring_cost(
        mut self,
        label: impl Into<String>,
        monthly_amount: f64,
        start_month: u32,
        end_month: EndMonth,
    ) -> Self {
        let id = self.ids.next_id("cost");
        self.non_headcount_costs.push(NonHeadcountCost::recurring(
            id,
            label,
            monthly_amount,
            start_month,
            end_month,
        ));
        self
    }

    pub fn one_time_cost(mut self, label: impl Into<String>, amount: f64, month: u32) -> Self {
        let id = self.ids.next_id("cost");
        self.non_headcount_costs.push(NonHeadcountCost::one_time(id, label, amount, month));
        self
    }

    /// Validate the horizon and produce the scenario
    pub fn build(self) -> Result<Scenario, ScenarioError> {
        let projection_months = horizon_from_i64(self.projection_months)?;
        Ok(Scenario {
            id: self.ids.next_id("scenario"),
            name: self.name,
            starting_cash: self.starting_cash,
            currency: self.currency,
            projection_months,
            employee_cost_multiplier: self.employee_cost_multiplier,
            hires: self.hires,
            non_headcount_costs: self.non_headcount_costs,
            ai_insights: None,
        })
    }
}

/// Projection horizon from a raw month count; must lie in
/// `MIN_PROJECTION_MONTHS..=MAX_PROJECTION_MONTHS`
pub fn horizon_from_i64(months: i64) -> Result<NonZeroU32, ScenarioError> {
    u32::try_from(months)
        .ok()
        .filter(|m| (MIN_PROJECTION_MONTHS..=MAX_PROJECTION_MONTHS).contains(m))
        .and_then(NonZeroU32::new)
        .ok_or_else(|| ScenarioError::InvalidHorizon(months.to_string()))
}
