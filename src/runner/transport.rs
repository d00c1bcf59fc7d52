use log::{debug, error, info};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::fs;

use crate::contract::{RequestDescriptor, ServiceResponse};
use crate::error::ContractError;

/// Executes a request against the conversion service. The validator only
/// sees the returned status, latency and raw body.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<ServiceResponse, ContractError>;
}

/// One captured exchange in a recordings file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Recording {
    input: String,
    #[serde(default = "default_status")]
    status: u16,
    #[serde(default)]
    latency_ms: u64,
    /// JSON payload, or a string holding the raw body verbatim
    body: Value,
}

fn default_status() -> u16 {
    200
}

/// Replays previously captured responses keyed by request input
#[derive(Debug, Clone, Default)]
pub struct RecordedTransport {
    responses: HashMap<String, ServiceResponse>,
}

impl RecordedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, input: impl Into<String>, response: ServiceResponse) -> Self {
        self.insert(input, response);
        self
    }

    pub fn insert(&mut self, input: impl Into<String>, response: ServiceResponse) {
        self.responses.insert(input.into(), response);
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Parse a recordings file: `[{input, status, latencyMs, body}]`
    pub fn from_json(json_str: &str) -> Result<Self, ContractError> {
        let recordings: Vec<Recording> = serde_json::from_str(json_str)?;
        let mut transport = Self::new();
        for recording in recordings {
            let body = match recording.body {
                Value::String(raw) => raw,
                other => other.to_string(),
            };
            transport.insert(
                recording.input,
                ServiceResponse::new(
                    recording.status,
                    Duration::from_millis(recording.latency_ms),
                    body,
                ),
            );
        }
        debug!("Loaded {} recorded responses", transport.len());
        Ok(transport)
    }

    pub async fn from_file(path: &str) -> Result<Self, ContractError> {
        info!("Loading recorded responses from file: {}", path);
        let content = fs::read_to_string(path).await.map_err(|e| {
            error!("Failed to read recordings file '{}': {}", path, e);
            ContractError::ResourceNotFound(format!("Failed to read file {}: {}", path, e))
        })?;
        Self::from_json(&content)
    }
}

impl Transport for RecordedTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<ServiceResponse, ContractError> {
        let input = request.input().ok_or_else(|| {
            ContractError::Transport(String::new(), "request body carries no input".to_string())
        })?;
        self.responses
            .get(&input)
            .cloned()
            .ok_or_else(|| ContractError::Transport(input, "no recorded response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recordings_keep_raw_string_bodies() {
        let transport = RecordedTransport::from_json(
            r#"[
                {"input": "a", "status": 502, "latencyMs": 12, "body": "<html>Bad Gateway</html>"},
                {"input": "b", "body": {"coordinates": null}}
            ]"#,
        )
        .unwrap();

        assert_eq!(transport.len(), 2);
        let a = &transport.responses["a"];
        assert_eq!(a.status, 502);
        assert_eq!(a.latency, Duration::from_millis(12));
        assert_eq!(a.body, "<html>Bad Gateway</html>");
        let b = &transport.responses["b"];
        assert_eq!(b.status, 200);
        assert_eq!(b.body, r#"{"coordinates":null}"#);
    }
}
