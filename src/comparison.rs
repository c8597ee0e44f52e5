//! Side-by-side comparison of independent scenarios

use crate::projection::{project, ProjectionResult};
use crate::runway::{estimate_runway, RunwayVerdict};
use crate::scenario::Scenario;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Projection and runway for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub scenario_id: String,
    pub scenario_name: String,
    pub projection: ProjectionResult,
    pub runway: RunwayVerdict,
}

impl ScenarioOutcome {
    /// Project and estimate a single scenario
    pub fn evaluate(scenario: &Scenario) -> Self {
        let projection = project(scenario);
        let runway = estimate_runway(&projection);
        Self {
            scenario_id: scenario.id.clone(),
            scenario_name: scenario.name.clone(),
            projection,
            runway,
        }
    }
}

/// Evaluate every scenario; output order matches input order.
///
/// Scenarios share nothing, so they are projected in parallel.
pub fn compare_scenarios(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    scenarios.par_iter().map(ScenarioOutcome::evaluate).collect()
}
