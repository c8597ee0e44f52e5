//! Runway Planner - deterministic burn-rate engine for startup hiring scenarios
//!
//! This library provides:
//! - Scenario model (hires, recurring and one-time costs) with fail-soft loading
//! - Month-by-month burn projection into a cash ledger
//! - Runway estimation from the projected ledger
//! - Side-by-side comparison of independent scenarios

pub mod error;
pub mod scenario;
pub mod projection;
pub mod runway;
pub mod comparison;

// Re-export commonly used types
pub use error::ScenarioError;
pub use scenario::{Scenario, Hire, NonHeadcountCost, EndMonth, ScenarioBuilder};
pub use projection::{project, ProjectionResult, MonthlyLedgerRow, Summary};
pub use runway::{estimate_runway, RunwayVerdict, RunwayStatus};
pub use comparison::{compare_scenarios, ScenarioOutcome};
