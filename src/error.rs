//! Error types for scenario construction and ledger export

use thiserror::Error;

/// Errors raised at the scenario boundary.
///
/// The projector and runway estimator never fail; everything that can go
/// wrong happens while a scenario is being built, loaded, or exported.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Horizon was zero, negative, missing, or not a number
    #[error("projectionMonths must be a positive integer (got {0})")]
    InvalidHorizon(String),

    /// Scenario JSON root was not an object
    #[error("scenario payload must be a JSON object")]
    NotAnObject,

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write ledger CSV: {0}")]
    Csv(#[from] csv::Error),
}
