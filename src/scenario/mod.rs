//! Scenario data structures and scenario construction

mod data;
pub mod coerce;
pub mod ids;
pub mod builder;
pub mod loader;

pub use data::{Scenario, Hire, NonHeadcountCost, EndMonth, MONTHS_PER_YEAR};
pub use ids::{IdGenerator, SequentialIds};
pub use builder::{ScenarioBuilder, MAX_PROJECTION_MONTHS};
pub use loader::{
    load_scenario, load_scenario_from_reader, scenario_from_json_slice, scenario_from_json_str,
    scenario_from_value,
};
