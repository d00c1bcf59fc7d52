use serde_json::{Map, Value};
use std::time::Duration;

use crate::contract::ServiceResponse;

/// Parsed, read-only view of a service response shared by every check.
/// Parsing is best-effort: an unparseable body leaves `json` empty and the
/// parse error is kept for the shape check to report.
#[derive(Debug, Clone)]
pub struct ResponseView {
    pub status: u16,
    pub latency: Duration,
    pub json: Option<Value>,
    pub parse_error: Option<String>,
}

impl ResponseView {
    pub fn parse(response: &ServiceResponse) -> Self {
        let (json, parse_error) = match serde_json::from_str::<Value>(&response.body) {
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            status: response.status,
            latency: response.latency,
            json,
            parse_error,
        }
    }

    /// Top-level object, if the body is one
    pub fn root(&self) -> Option<&Map<String, Value>> {
        self.json.as_ref()?.as_object()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.root()?.get(key)
    }

    pub fn coordinates(&self) -> Option<&Map<String, Value>> {
        self.field("coordinates")?.as_object()
    }

    pub fn lat(&self) -> Option<f64> {
        self.coordinates()?.get("lat")?.as_f64()
    }

    pub fn lon(&self) -> Option<f64> {
        self.coordinates()?.get("lon")?.as_f64()
    }

    /// True only when `coordinates.valid` is the boolean `true`
    pub fn is_valid(&self) -> bool {
        self.coordinates()
            .and_then(|c| c.get("valid"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn links(&self) -> Option<&Map<String, Value>> {
        self.field("links")?.as_object()
    }
}

/// JSON type name used in failure messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
