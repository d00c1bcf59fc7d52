//! The response check battery.
//!
//! Every check is a plain function over the parsed response, the shared
//! expectations and the thresholds. Checks never look at each other's
//! results, so any subset can fail without affecting the rest.

use log::{debug, warn};
use regex::Regex;
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::context::SharedContext;
use crate::contract::Provider;
use crate::validation::response_view::{type_name, ResponseView};
use crate::validation::CheckResult;

pub type CheckFn = fn(&ResponseView, &SharedContext, &ValidatorConfig) -> CheckResult;

pub const STATUS_CHECK: &str = "Status code is 200";
pub const LATENCY_CHECK: &str = "Response time is acceptable";
pub const SHAPE_CHECK: &str = "Response has valid JSON structure";
pub const COORDINATES_SHAPE_CHECK: &str = "Coordinates object validation";
pub const COORDINATES_MATCH_CHECK: &str = "Expected coordinate values match";
pub const NAME_CHECK: &str = "Name field validation";
pub const ADDRESS_CHECK: &str = "Address field validation";
pub const LINKS_PRESENCE_CHECK: &str = "Links object validation";
pub const LINKS_COORDINATES_CHECK: &str = "Links contain correct coordinates";
pub const INTEGRITY_CHECK: &str = "Response data integrity";
pub const LOG_RESULTS_CHECK: &str = "Log test results";

/// Top-level keys of a conforming response
pub const TOP_LEVEL_KEYS: [&str; 4] = ["coordinates", "name", "address", "links"];

const LINK_URL_PATTERN: &str = r"^https?://.+";

/// The battery, in reporting order
pub const CHECKS: [CheckFn; 11] = [
    status_code,
    response_time,
    json_structure,
    coordinates_shape,
    coordinates_match,
    name_field,
    address_field,
    links_presence,
    links_embed_coordinates,
    data_integrity,
    log_test_results,
];

const NOT_AN_OBJECT: &str = "response body is not a JSON object";

pub fn status_code(view: &ResponseView, _: &SharedContext, config: &ValidatorConfig) -> CheckResult {
    if view.status == config.expected_status {
        CheckResult::pass(STATUS_CHECK)
    } else {
        CheckResult::fail(
            STATUS_CHECK,
            format!("expected status {}, got {}", config.expected_status, view.status),
        )
    }
}

pub fn response_time(view: &ResponseView, _: &SharedContext, config: &ValidatorConfig) -> CheckResult {
    if view.latency < config.latency_ceiling {
        CheckResult::pass(LATENCY_CHECK)
    } else {
        CheckResult::fail(
            LATENCY_CHECK,
            format!(
                "response took {} ms, expected below {} ms",
                view.latency.as_millis(),
                config.latency_ceiling.as_millis()
            ),
        )
    }
}

pub fn json_structure(view: &ResponseView, _: &SharedContext, _: &ValidatorConfig) -> CheckResult {
    let json = match &view.json {
        Some(json) => json,
        None => {
            return CheckResult::fail(
                SHAPE_CHECK,
                format!(
                    "response body is not valid JSON: {}",
                    view.parse_error.as_deref().unwrap_or("empty body")
                ),
            )
        }
    };
    let root = match json.as_object() {
        Some(root) => root,
        None => {
            return CheckResult::fail(
                SHAPE_CHECK,
                format!("response body is a JSON {}, expected object", type_name(json)),
            )
        }
    };

    let mut violations: Vec<String> = TOP_LEVEL_KEYS
        .iter()
        .filter(|key| !root.contains_key(**key))
        .map(|key| format!("missing property '{}'", key))
        .collect();
    violations.extend(
        root.keys()
            .filter(|key| !TOP_LEVEL_KEYS.contains(&key.as_str()))
            .map(|key| format!("unexpected property '{}'", key)),
    );
    CheckResult::from_violations(SHAPE_CHECK, violations)
}

pub fn coordinates_shape(view: &ResponseView, _: &SharedContext, _: &ValidatorConfig) -> CheckResult {
    if view.root().is_none() {
        return CheckResult::fail(COORDINATES_SHAPE_CHECK, NOT_AN_OBJECT);
    }
    let coordinates = match view.coordinates() {
        Some(coordinates) => coordinates,
        None => {
            return CheckResult::fail(
                COORDINATES_SHAPE_CHECK,
                "response has no 'coordinates' object",
            )
        }
    };

    let mut violations = Vec::new();
    for (axis, limit) in [("lat", 90.0), ("lon", 180.0)] {
        match coordinates.get(axis) {
            None => violations.push(format!("coordinates.{} is missing", axis)),
            Some(value) => match value.as_f64() {
                None => violations.push(format!(
                    "coordinates.{} must be a number, got {}",
                    axis,
                    type_name(value)
                )),
                Some(number) if !(-limit..=limit).contains(&number) => violations.push(format!(
                    "coordinates.{} {} is outside [-{}, {}]",
                    axis, number, limit, limit
                )),
                Some(_) => {}
            },
        }
    }
    match coordinates.get("valid") {
        Some(Value::Bool(_)) => {}
        Some(other) => violations.push(format!(
            "coordinates.valid must be a boolean, got {}",
            type_name(other)
        )),
        None => violations.push("coordinates.valid is missing".to_string()),
    }
    CheckResult::from_violations(COORDINATES_SHAPE_CHECK, violations)
}

pub fn coordinates_match(view: &ResponseView, context: &SharedContext, config: &ValidatorConfig) -> CheckResult {
    let (expected_lat, expected_lon) = match (context.expected_lat(), context.expected_lon()) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return CheckResult::skip(COORDINATES_MATCH_CHECK, "no expected coordinates supplied"),
    };
    if view.root().is_none() {
        return CheckResult::fail(COORDINATES_MATCH_CHECK, NOT_AN_OBJECT);
    }

    let mut violations = Vec::new();
    if !view.is_valid() {
        let actual = view
            .coordinates()
            .and_then(|c| c.get("valid"))
            .map_or_else(|| "nothing".to_string(), Value::to_string);
        violations.push(format!("expected coordinates.valid to be true, got {}", actual));
    }
    for (axis, expected, actual) in [
        ("lat", expected_lat, view.lat()),
        ("lon", expected_lon, view.lon()),
    ] {
        match actual {
            Some(actual) if (actual - expected).abs() < config.coordinate_tolerance => {}
            Some(actual) => violations.push(format!("Expected {} {}, got {}", axis, expected, actual)),
            None => violations.push(format!("Expected {} {}, got no number", axis, expected)),
        }
    }

    if violations.is_empty() {
        debug!(
            "Coordinates match: {}, {}",
            view.lat().unwrap_or_default(),
            view.lon().unwrap_or_default()
        );
    }
    CheckResult::from_violations(COORDINATES_MATCH_CHECK, violations)
}

pub fn name_field(view: &ResponseView, context: &SharedContext, _: &ValidatorConfig) -> CheckResult {
    let name = view.field("name");
    let expected = match context.expected_name() {
        Some(expected) if !context.skip_name_validation() => expected,
        _ => {
            // Type still holds when the content check is off
            return match name {
                Some(value) if !value.is_null() && !value.is_string() => CheckResult::fail(
                    NAME_CHECK,
                    format!("name must be a string or null, got {}", type_name(value)),
                ),
                _ => CheckResult::skip(NAME_CHECK, "name validation skipped or no expected name"),
            };
        }
    };
    if view.root().is_none() {
        return CheckResult::fail(NAME_CHECK, NOT_AN_OBJECT);
    }

    match name {
        None => CheckResult::fail(NAME_CHECK, "response has no 'name' field"),
        Some(Value::Null) => {
            warn!("Expected name \"{}\" but got null", expected);
            CheckResult::warn(NAME_CHECK, format!("Expected name \"{}\" but got null", expected))
        }
        Some(Value::String(actual)) if contains_ignore_case(actual, expected) => {
            CheckResult::pass(NAME_CHECK)
        }
        Some(Value::String(actual)) => CheckResult::fail(
            NAME_CHECK,
            format!("Expected name to contain \"{}\", got \"{}\"", expected, actual),
        ),
        Some(other) => CheckResult::fail(
            NAME_CHECK,
            format!("name must be a string or null, got {}", type_name(other)),
        ),
    }
}

pub fn address_field(view: &ResponseView, context: &SharedContext, _: &ValidatorConfig) -> CheckResult {
    if view.root().is_none() {
        return CheckResult::fail(ADDRESS_CHECK, NOT_AN_OBJECT);
    }
    let address = match view.field("address") {
        Some(Value::String(address)) if !address.trim().is_empty() => address,
        Some(Value::String(_)) => return CheckResult::fail(ADDRESS_CHECK, "address must not be empty"),
        Some(other) => {
            return CheckResult::fail(
                ADDRESS_CHECK,
                format!("address must be a string, got {}", type_name(other)),
            )
        }
        None => return CheckResult::fail(ADDRESS_CHECK, "response has no 'address' field"),
    };

    match context.expected_address() {
        Some(expected)
            if !context.skip_address_validation() && !contains_ignore_case(address, expected) =>
        {
            CheckResult::fail(
                ADDRESS_CHECK,
                format!("Address \"{}\" should contain \"{}\"", address, expected),
            )
        }
        _ => CheckResult::pass(ADDRESS_CHECK),
    }
}

pub fn links_presence(view: &ResponseView, _: &SharedContext, _: &ValidatorConfig) -> CheckResult {
    if !view.is_valid() {
        return CheckResult::skip(LINKS_PRESENCE_CHECK, "coordinates are not valid");
    }
    let links = match view.field("links") {
        Some(Value::Object(links)) => links,
        Some(other) => {
            return CheckResult::fail(
                LINKS_PRESENCE_CHECK,
                format!("links must be an object, got {}", type_name(other)),
            )
        }
        None => return CheckResult::fail(LINKS_PRESENCE_CHECK, "response has no 'links' object"),
    };
    let url_pattern = match Regex::new(LINK_URL_PATTERN) {
        Ok(regex) => regex,
        Err(e) => {
            return CheckResult::fail(LINKS_PRESENCE_CHECK, format!("invalid link URL pattern: {}", e))
        }
    };

    let mut violations = Vec::new();
    for provider in Provider::ALL {
        match links.get(provider.as_str()) {
            None => violations.push(format!("missing {} link", provider)),
            Some(Value::String(url)) if url_pattern.is_match(url) => {}
            Some(Value::String(url)) => {
                violations.push(format!("{} link should be a valid URL: {}", provider, url))
            }
            Some(other) => violations.push(format!(
                "{} link must be a string, got {}",
                provider,
                type_name(other)
            )),
        }
    }
    violations.extend(
        links
            .keys()
            .filter(|key| !Provider::ALL.iter().any(|p| p.as_str() == key.as_str()))
            .map(|key| format!("unexpected link provider '{}'", key)),
    );

    if violations.is_empty() {
        debug!("All {} link providers present", Provider::ALL.len());
    }
    CheckResult::from_violations(LINKS_PRESENCE_CHECK, violations)
}

pub fn links_embed_coordinates(view: &ResponseView, _: &SharedContext, config: &ValidatorConfig) -> CheckResult {
    if !view.is_valid() {
        return CheckResult::skip(LINKS_COORDINATES_CHECK, "coordinates are not valid");
    }
    let (lat, lon) = match (view.lat(), view.lon()) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return CheckResult::fail(LINKS_COORDINATES_CHECK, "coordinates are not numeric"),
    };
    let links = match view.links() {
        Some(links) => links,
        None => return CheckResult::fail(LINKS_COORDINATES_CHECK, "response has no 'links' object"),
    };

    let lat_prefix = coordinate_prefix(lat, config.link_coordinate_prefix);
    let lon_prefix = coordinate_prefix(lon, config.link_coordinate_prefix);
    let violations = config
        .coordinate_link_providers
        .iter()
        .filter_map(|provider| {
            let url = links.get(provider.as_str())?.as_str()?;
            if url.contains(&lat_prefix) && url.contains(&lon_prefix) {
                None
            } else {
                Some(format!(
                    "{} link should contain coordinates {},{}: {}",
                    provider, lat_prefix, lon_prefix, url
                ))
            }
        })
        .collect();
    CheckResult::from_violations(LINKS_COORDINATES_CHECK, violations)
}

pub fn data_integrity(view: &ResponseView, _: &SharedContext, _: &ValidatorConfig) -> CheckResult {
    let root = match view.root() {
        Some(root) => root,
        None => return CheckResult::fail(INTEGRITY_CHECK, NOT_AN_OBJECT),
    };

    let mut violations = Vec::new();
    if root.len() != TOP_LEVEL_KEYS.len() {
        violations.push(format!(
            "expected {} top-level properties, got {}",
            TOP_LEVEL_KEYS.len(),
            root.len()
        ));
    }
    if view.is_valid() {
        let address_present = view
            .field("address")
            .and_then(Value::as_str)
            .is_some_and(|address| !address.is_empty());
        if !address_present {
            violations.push("address must not be empty when coordinates are valid".to_string());
        }
        let link_count = view.links().map_or(0, |links| links.len());
        if link_count != Provider::ALL.len() {
            violations.push(format!(
                "expected {} link providers, got {}",
                Provider::ALL.len(),
                link_count
            ));
        }
    }
    CheckResult::from_violations(INTEGRITY_CHECK, violations)
}

/// Always passes; the summary it stands for is emitted by the reporter
pub fn log_test_results(_: &ResponseView, _: &SharedContext, _: &ValidatorConfig) -> CheckResult {
    CheckResult::pass(LOG_RESULTS_CHECK)
}

/// Case-insensitive substring test used for name and address expectations
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Leading characters of the shortest decimal form of a coordinate
pub fn coordinate_prefix(value: f64, len: usize) -> String {
    value.to_string().chars().take(len).collect()
}
