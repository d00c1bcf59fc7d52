#![allow(dead_code)]

use maps_bridge_contract::*;
use serde_json::{json, Value};
use std::time::Duration;

/// Route library logs through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Provider links that embed the given coordinates the way the service formats them
pub fn links_for(lat: f64, lon: f64) -> Value {
    json!({
        "apple": format!("https://maps.apple.com/?ll={},{}", lat, lon),
        "komoot": format!("https://www.komoot.com/plan/@{},{},15z", lat, lon),
        "bing": format!("https://www.bing.com/maps?cp={}~{}&lvl=15", lat, lon),
        "osm": format!("https://www.openstreetmap.org/?mlat={}&mlon={}#map=15/{}/{}", lat, lon, lat, lon),
        "waze": format!("https://waze.com/ul?ll={},{}&navigate=yes", lat, lon),
        "google": format!("https://www.google.com/maps/search/?api=1&query={},{}", lat, lon),
    })
}

/// A response body satisfying the whole contract
pub fn conforming_body(lat: f64, lon: f64, name: Option<&str>, address: &str) -> Value {
    json!({
        "coordinates": {"lat": lat, "lon": lon, "valid": true},
        "name": name,
        "address": address,
        "links": links_for(lat, lon),
    })
}

pub fn googleplex_body() -> Value {
    conforming_body(
        37.4224,
        -122.0841,
        Some("Googleplex"),
        "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
    )
}

pub fn googleplex_record() -> IterationRecord {
    IterationRecord::new("1600 Amphitheatre Parkway")
        .with_description("Googleplex by street address")
        .with_expected_coordinates(37.4224, -122.0841)
        .with_expected_name("Googleplex")
}

pub fn paris_body(name: Option<&str>) -> Value {
    conforming_body(48.8566, 2.3522, name, "Paris, France")
}

/// 200 response with a typical round-trip time
pub fn ok_response(body: &Value) -> ServiceResponse {
    ServiceResponse::from_json(200, Duration::from_millis(240), body)
}

/// Context as Arrange leaves it for `record`
pub fn arranged_context(record: &IterationRecord) -> SharedContext {
    let mut context = SharedContext::new();
    RequestBuilder::arrange(record, &mut context).unwrap();
    context
}

/// Evaluate `body` against `record` with default thresholds
pub fn evaluate(record: &IterationRecord, response: &ServiceResponse) -> Vec<CheckResult> {
    let context = arranged_context(record);
    ResponseValidator::default().evaluate(response, &context)
}

pub fn find<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckResult {
    results
        .iter()
        .find(|result| result.name == name)
        .unwrap_or_else(|| panic!("no result for check '{}'", name))
}

/// Names of every failed check
pub fn failed_names(results: &[CheckResult]) -> Vec<&str> {
    results
        .iter()
        .filter(|result| !result.passed())
        .map(|result| result.name.as_str())
        .collect()
}
