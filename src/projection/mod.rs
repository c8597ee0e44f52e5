//! Burn-rate projection engine

mod engine;
mod ledger;
pub mod export;

pub use engine::project;
pub use ledger::{MonthlyLedgerRow, ProjectionResult, Summary};
pub use export::{write_ledger_csv, write_ledger_csv_file};
