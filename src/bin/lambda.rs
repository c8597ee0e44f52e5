//! AWS Lambda HTTP handler
//!
//! POST a scenario JSON body; the response carries the projection and the
//! runway verdict. Bad input is reported as HTTP 400 so callers can surface
//! it as a recoverable error.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use runway_planner::scenario::{scenario_from_json_slice, SequentialIds};
use runway_planner::ScenarioOutcome;
use serde_json::json;

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Raw bytes go straight to the JSON parser so encoding errors are reported as such
    match scenario_from_json_slice(event.body(), &mut SequentialIds::new()) {
        Ok(scenario) => {
            let outcome = ScenarioOutcome::evaluate(&scenario);
            info!(
                "Projected '{}' over {} months: {}",
                scenario.name,
                scenario.horizon(),
                outcome.runway.headline(outcome.projection.horizon())
            );
            let payload = json!({
                "projection": outcome.projection,
                "runway": outcome.runway,
            });
            respond(200, payload)
        }
        Err(e) => {
            warn!("Rejected scenario payload: {}", e);
            respond(400, json!({ "error": e.to_string() }))
        }
    }
}

fn respond(status: u16, payload: serde_json::Value) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
