use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::ResponseView;

/// What the "Log test results" check prints about a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub description: String,
    pub valid: Option<bool>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub link_count: usize,
}

impl ResponseSummary {
    pub fn from_view(description: &str, view: &ResponseView) -> Self {
        let text = |key: &str| view.field(key).and_then(Value::as_str).map(str::to_string);
        Self {
            description: description.to_string(),
            valid: view
                .coordinates()
                .and_then(|c| c.get("valid"))
                .and_then(Value::as_bool),
            lat: view.lat(),
            lon: view.lon(),
            name: text("name"),
            address: text("address"),
            link_count: view.links().map_or(0, |links| links.len()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        fn show<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map_or_else(|| "null".to_string(), ToString::to_string)
        }
        vec![
            format!("Test Results for: {}", self.description),
            format!("  Valid: {}", show(&self.valid)),
            format!("  Coordinates: {}, {}", show(&self.lat), show(&self.lon)),
            format!("  Name: {}", show(&self.name)),
            format!("  Address: {}", show(&self.address)),
            format!("  Links count: {}", self.link_count),
        ]
    }
}
