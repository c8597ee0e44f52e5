//! Load scenarios from loosely typed JSON
//!
//! This is the one place where raw collaborator input (form state, URL
//! payloads, persisted scenarios) becomes a [`Scenario`]. Numeric fields are
//! coerced with [`super::coerce`]; only an unusable projection horizon or an
//! unreadable payload is an error.

use super::coerce::{parse_end_month, parse_exact_month, parse_number, parse_or_default, parse_start_month};
use super::builder::{MAX_PROJECTION_MONTHS, MIN_PROJECTION_MONTHS};
use super::{EndMonth, Hire, IdGenerator, NonHeadcountCost, Scenario};
use crate::error::ScenarioError;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::num::NonZeroU32;
use std::path::Path;

/// Load a scenario from a JSON file, minting missing ids from `ids`.
///
/// Share one generator across every file of a run so scenarios without an
/// id still get distinct ids.
pub fn load_scenario<P: AsRef<Path>>(
    path: P,
    ids: &mut dyn IdGenerator,
) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let scenario = load_scenario_from_reader(BufReader::new(file), ids)?;
    info!("Loaded scenario '{}' from {}", scenario.name, path.display());
    Ok(scenario)
}

/// Load a scenario from any JSON reader
pub fn load_scenario_from_reader<R: Read>(
    reader: R,
    ids: &mut dyn IdGenerator,
) -> Result<Scenario, ScenarioError> {
    let value: Value = serde_json::from_reader(reader)?;
    scenario_from_value(&value, ids)
}

/// Load a scenario from JSON text, e.g. a decoded share-link payload
pub fn scenario_from_json_str(
    json: &str,
    ids: &mut dyn IdGenerator,
) -> Result<Scenario, ScenarioError> {
    let value: Value = serde_json::from_str(json)?;
    scenario_from_value(&value, ids)
}

/// Load a scenario from raw request bytes; invalid UTF-8 is reported as a JSON error
pub fn scenario_from_json_slice(
    bytes: &[u8],
    ids: &mut dyn IdGenerator,
) -> Result<Scenario, ScenarioError> {
    let value: Value = serde_json::from_slice(bytes)?;
    scenario_from_value(&value, ids)
}

/// Build a scenario from a parsed JSON value, minting missing ids from `ids`
pub fn scenario_from_value(
    value: &Value,
    ids: &mut dyn IdGenerator,
) -> Result<Scenario, ScenarioError> {
    let obj = value.as_object().ok_or(ScenarioError::NotAnObject)?;

    let projection_months = parse_horizon(obj.get("projectionMonths"))?;

    let hires: Vec<Hire> = entries(obj, "hires")
        .filter_map(|entry| hire_from_object(entry, ids))
        .collect();

    let non_headcount_costs: Vec<NonHeadcountCost> = entries(obj, "nonHeadcountCosts")
        .filter_map(|entry| cost_from_object(entry, ids))
        .collect();

    let scenario = Scenario {
        id: id_field(obj).unwrap_or_else(|| ids.next_id("scenario")),
        name: text_field(obj, "name").unwrap_or_else(|| "Untitled scenario".to_string()),
        starting_cash: parse_or_default(obj.get("startingCash"), 0.0),
        currency: text_field(obj, "currency")
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "USD".to_string()),
        projection_months,
        employee_cost_multiplier: parse_or_default(obj.get("employeeCostMultiplier"), 1.0),
        hires,
        non_headcount_costs,
        ai_insights: obj.get("aiInsights").filter(|v| !v.is_null()).cloned(),
    };

    debug!(
        "Scenario '{}': {} hires, {} costs, {} months",
        scenario.name,
        scenario.hires.len(),
        scenario.non_headcount_costs.len(),
        scenario.horizon()
    );

    Ok(scenario)
}

/// Horizon must be a whole number of months in 1..=MAX_PROJECTION_MONTHS
fn parse_horizon(value: Option<&Value>) -> Result<NonZeroU32, ScenarioError> {
    let invalid = || ScenarioError::InvalidHorizon(
        value.map_or_else(|| "missing".to_string(), Value::to_string),
    );

    let months = value.and_then(parse_number).ok_or_else(invalid)?;
    if months.fract() != 0.0
        || months < MIN_PROJECTION_MONTHS as f64
        || months > MAX_PROJECTION_MONTHS as f64
    {
        return Err(invalid());
    }
    NonZeroU32::new(months as u32).ok_or_else(invalid)
}

/// Object entries of an array field; other entries are skipped
fn entries<'v>(obj: &'v Map<String, Value>, key: &'v str) -> impl Iterator<Item = &'v Map<String, Value>> {
    obj.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(move |entry| {
            let map = entry.as_object();
            if map.is_none() {
                warn!("Skipping non-object entry in '{}': {}", key, entry);
            }
            map
        })
}

fn hire_from_object(obj: &Map<String, Value>, ids: &mut dyn IdGenerator) -> Option<Hire> {
    let title = text_field(obj, "title").unwrap_or_default();

    let Some(end_month) = parse_end_month(obj.get("endMonth")) else {
        warn!("Hire '{}' ends before month 0; it is never on payroll", title);
        return None;
    };
    let start_month = parse_start_month(obj.get("startMonth"));
    warn_if_inverted(&title, start_month, end_month);

    let annual_salary = coerced_amount(obj, "annualSalary", &title);

    Some(Hire {
        id: id_field(obj).unwrap_or_else(|| ids.next_id("hire")),
        title,
        annual_salary,
        start_month,
        end_month,
    })
}

fn cost_from_object(
    obj: &Map<String, Value>,
    ids: &mut dyn IdGenerator,
) -> Option<NonHeadcountCost> {
    let label = text_field(obj, "label").unwrap_or_default();
    let is_one_time = obj.get("isOneTime").and_then(Value::as_bool).unwrap_or(false);

    let (start_month, end_month) = if is_one_time {
        let Some(month) = parse_exact_month(obj.get("startMonth")) else {
            warn!("One-time cost '{}' has no whole month >= 0; it never applies", label);
            return None;
        };
        // Keep whatever end month was supplied; it is ignored for one-time costs
        (month, parse_end_month(obj.get("endMonth")).unwrap_or(EndMonth::Indefinite))
    } else {
        let Some(end_month) = parse_end_month(obj.get("endMonth")) else {
            warn!("Cost '{}' ends before month 0; it never applies", label);
            return None;
        };
        let start_month = parse_start_month(obj.get("startMonth"));
        warn_if_inverted(&label, start_month, end_month);
        (start_month, end_month)
    };

    let monthly_amount = coerced_amount(obj, "monthlyAmount", &label);

    Some(NonHeadcountCost {
        id: id_field(obj).unwrap_or_else(|| ids.next_id("cost")),
        label,
        monthly_amount,
        start_month,
        end_month,
        is_one_time,
    })
}

/// Amount field coerced to 0 when malformed
fn coerced_amount(obj: &Map<String, Value>, key: &str, owner: &str) -> f64 {
    let raw = obj.get(key);
    if let Some(v) = raw {
        if parse_number(v).is_none() {
            debug!("'{}': {} = {} is not numeric, using 0", owner, key, v);
        }
    }
    parse_or_default(raw, 0.0)
}

fn warn_if_inverted(name: &str, start_month: u32, end_month: EndMonth) {
    if let EndMonth::EndsAt(end) = end_month {
        if end < start_month {
            warn!("'{}' ends (month {}) before it starts (month {})", name, end, start_month);
        }
    }
}

/// Ids may arrive as strings or numbers
fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::SequentialIds;
    use serde_json::json;

    #[test]
    fn test_load_form_payload() {
        let payload = json!({
            "id": "abc",
            "name": "Series A plan",
            "startingCash": "2000000",
            "currency": "EUR",
            "projectionMonths": 24,
            "employeeCostMultiplier": 1.3,
            "hires": [
                {"id": "h1", "title": "CTO", "annualSalary": 180000, "startMonth": 0},
                {"id": "h2", "title": "Engineer", "annualSalary": "120000", "startMonth": "3", "endMonth": 12}
            ],
            "nonHeadcountCosts": [
                {"id": "c1", "label": "Office", "monthlyAmount": 5000, "startMonth": 0, "endMonth": null},
                {"id": "c2", "label": "Offsite", "monthlyAmount": 20000, "startMonth": 6, "isOneTime": true}
            ],
            "aiInsights": {"summary": "Hire slower"}
        });

        let scenario = scenario_from_value(&payload, &mut SequentialIds::new()).unwrap();
        assert_eq!(scenario.id, "abc");
        assert_eq!(scenario.currency, "EUR");
        assert_eq!(scenario.starting_cash, 2_000_000.0);
        assert_eq!(scenario.horizon(), 24);
        assert_eq!(scenario.hires.len(), 2);
        assert_eq!(scenario.hires[1].annual_salary, 120_000.0);
        assert_eq!(scenario.hires[1].start_month, 3);
        assert_eq!(scenario.hires[1].end_month, EndMonth::EndsAt(12));
        assert_eq!(scenario.non_headcount_costs[0].end_month, EndMonth::Indefinite);
        assert!(scenario.non_headcount_costs[1].is_one_time);
        assert_eq!(scenario.ai_insights, Some(json!({"summary": "Hire slower"})));
    }

    #[test]
    fn test_malformed_amounts_become_zero() {
        let payload = json!({
            "projectionMonths": 6,
            "startingCash": "lots",
            "hires": [{"title": "Mystery", "annualSalary": "TBD", "startMonth": 0}],
            "nonHeadcountCosts": [{"label": "Misc", "monthlyAmount": null, "startMonth": 0}]
        });

        let scenario = scenario_from_value(&payload, &mut SequentialIds::new()).unwrap();
        assert_eq!(scenario.starting_cash, 0.0);
        assert_eq!(scenario.hires[0].annual_salary, 0.0);
        assert_eq!(scenario.non_headcount_costs[0].monthly_amount, 0.0);
        assert_eq!(scenario.name, "Untitled scenario");
        assert_eq!(scenario.currency, "USD");
        assert_eq!(scenario.employee_cost_multiplier, 1.0);
    }

    #[test]
    fn test_missing_ids_are_minted() {
        let payload = json!({
            "projectionMonths": 3,
            "hires": [{"title": "A", "annualSalary": 1}, {"title": "B", "annualSalary": 2}],
            "nonHeadcountCosts": [{"label": "C", "monthlyAmount": 3}]
        });

        let mut ids = SequentialIds::new();
        let scenario = scenario_from_value(&payload, &mut ids).unwrap();
        assert_eq!(scenario.hires[0].id, "hire-1");
        assert_eq!(scenario.hires[1].id, "hire-2");
        assert_eq!(scenario.non_headcount_costs[0].id, "cost-3");
        assert_eq!(scenario.id, "scenario-4");
    }

    #[test]
    fn test_invalid_horizons() {
        for horizon in [json!(0), json!(-12), json!(12.5), json!("soon"), Value::Null] {
            let payload = json!({ "projectionMonths": horizon.clone() });
            let err = scenario_from_value(&payload, &mut SequentialIds::new()).unwrap_err();
            assert!(matches!(err, ScenarioError::InvalidHorizon(_)), "{:?}", horizon);
        }

        let err = scenario_from_value(&json!({}), &mut SequentialIds::new()).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidHorizon(_)));

        // Numeric strings are accepted like any other numeric field
        let scenario = scenario_from_value(&json!({"projectionMonths": "12"}), &mut SequentialIds::new()).unwrap();
        assert_eq!(scenario.horizon(), 12);
    }

    #[test]
    fn test_non_object_root() {
        let err = scenario_from_json_str("[1, 2, 3]", &mut SequentialIds::new()).unwrap_err();
        assert!(matches!(err, ScenarioError::NotAnObject));

        let err = scenario_from_json_str("{not json", &mut SequentialIds::new()).unwrap_err();
        assert!(matches!(err, ScenarioError::Json(_)));
    }

    #[test]
    fn test_entries_that_can_never_apply_are_dropped() {
        let payload = json!({
            "projectionMonths": 6,
            "hires": [
                {"id": "gone", "title": "Left", "annualSalary": 100000, "startMonth": 0, "endMonth": -1},
                "not an object"
            ],
            "nonHeadcountCosts": [
                {"id": "c1", "label": "Past", "monthlyAmount": 100, "startMonth": -2, "isOneTime": true},
                {"id": "c2", "label": "Half", "monthlyAmount": 100, "startMonth": 1.5, "isOneTime": true},
                {"id": "c3", "label": "Early", "monthlyAmount": 100, "startMonth": -2}
            ]
        });

        let scenario = scenario_from_value(&payload, &mut SequentialIds::new()).unwrap();
        assert!(scenario.hires.is_empty());
        assert_eq!(scenario.non_headcount_costs.len(), 1);
        // Negative recurring start behaves like month 0
        assert_eq!(scenario.non_headcount_costs[0].id, "c3");
        assert_eq!(scenario.non_headcount_costs[0].start_month, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let payload = json!({
            "id": "s1",
            "name": "Bootstrap",
            "startingCash": 250000.5,
            "currency": "GBP",
            "projectionMonths": 36,
            "employeeCostMultiplier": 1.2,
            "hires": [{"id": "h1", "title": "Dev", "annualSalary": 95000, "startMonth": 2, "endMonth": 30}],
            "nonHeadcountCosts": [
                {"id": "c1", "label": "SaaS", "monthlyAmount": 899.99, "startMonth": 0},
                {"id": "c2", "label": "Audit", "monthlyAmount": 15000, "startMonth": 11, "isOneTime": true}
            ]
        });

        let scenario = scenario_from_value(&payload, &mut SequentialIds::new()).unwrap();
        let json = scenario.to_json().unwrap();

        // Both the fail-soft loader and strict serde read it back identically
        assert_eq!(scenario_from_json_str(&json, &mut SequentialIds::new()).unwrap(), scenario);
        let strict: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(strict, scenario);
    }

    #[test]
    fn test_load_from_reader() {
        let text = r#"{"name": "Reader", "projectionMonths": 12, "startingCash": 1000}"#;
        let scenario = load_scenario_from_reader(text.as_bytes(), &mut SequentialIds::new()).unwrap();
        assert_eq!(scenario.name, "Reader");
        assert_eq!(scenario.horizon(), 12);
    }

    #[test]
    fn test_shared_generator_keeps_ids_distinct() {
        let text = r#"{"name": "No id", "projectionMonths": 12, "hires": [{"title": "Dev", "annualSalary": 100000}]}"#;

        let mut ids = SequentialIds::new();
        let first = scenario_from_json_str(text, &mut ids).unwrap();
        let second = scenario_from_json_str(text, &mut ids).unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.hires[0].id, second.hires[0].id);
        assert_eq!(first.id, "scenario-2");
        assert_eq!(second.id, "scenario-4");
    }

    #[test]
    fn test_horizon_cap() {
        let at_cap = json!({ "projectionMonths": MAX_PROJECTION_MONTHS });
        let scenario = scenario_from_value(&at_cap, &mut SequentialIds::new()).unwrap();
        assert_eq!(scenario.horizon(), MAX_PROJECTION_MONTHS);

        for horizon in [json!(MAX_PROJECTION_MONTHS + 1), json!(4_000_000_000u64), json!("4000000000")] {
            let payload = json!({ "projectionMonths": horizon.clone() });
            let err = scenario_from_value(&payload, &mut SequentialIds::new()).unwrap_err();
            assert!(matches!(err, ScenarioError::InvalidHorizon(_)), "{:?}", horizon);
        }

        let err = scenario_from_json_str(r#"{"projectionMonths":4000000000}"#, &mut SequentialIds::new())
            .unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidHorizon(_)));
    }

    #[test]
    fn test_invalid_utf8_reports_encoding() {
        let bytes = b"{\"name\": \"Caf\xe9\", \"projectionMonths\": 12}";
        let err = scenario_from_json_slice(bytes, &mut SequentialIds::new()).unwrap_err();
        assert!(matches!(err, ScenarioError::Json(_)));
        assert!(!err.to_string().contains("EOF"), "{}", err);

        let ok = scenario_from_json_slice(br#"{"name": "Bytes", "projectionMonths": 6}"#, &mut SequentialIds::new())
            .unwrap();
        assert_eq!(ok.name, "Bytes");
    }
}
