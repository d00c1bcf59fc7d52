use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// One test case from the iteration data file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// Map URL or "lat,lon" text sent to the service. Kept optional so that
    /// a record without it still loads and is rejected at Arrange time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[serde(default)]
    pub expected: Expected,

    #[serde(default)]
    pub test_config: TestConfig,
}

impl IterationRecord {
    /// Create a record with only an input
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.test_config.description = Some(description.into());
        self
    }

    pub fn with_expected_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.expected.coordinates = Some(ExpectedCoordinates::new(lat, lon));
        self
    }

    pub fn with_expected_name(mut self, name: impl Into<String>) -> Self {
        self.expected.name = Some(name.into());
        self
    }

    pub fn with_expected_address(mut self, address: impl Into<String>) -> Self {
        self.expected.address = Some(address.into());
        self
    }

    pub fn skip_name_validation(mut self) -> Self {
        self.test_config.skip_name_validation = Some(true);
        self
    }

    pub fn skip_address_validation(mut self) -> Self {
        self.test_config.skip_address_validation = Some(true);
        self
    }
}

/// Expected values; every field may be omitted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Expected {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<ExpectedCoordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Either axis may be omitted; a record with only one axis carries no
/// coordinate expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExpectedCoordinates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<CoordinateValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<CoordinateValue>,
}

impl ExpectedCoordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(CoordinateValue::Number(lat)),
            lon: Some(CoordinateValue::Number(lon)),
        }
    }
}

/// A coordinate as written in the data file: a JSON number or numeric text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    /// Numeric value, `None` for text that does not parse
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoordinateValue::Number(value) => Some(*value),
            CoordinateValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
        .filter(|value| value.is_finite())
    }
}

impl From<f64> for CoordinateValue {
    fn from(value: f64) -> Self {
        CoordinateValue::Number(value)
    }
}

impl fmt::Display for CoordinateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateValue::Number(value) => write!(f, "{}", value),
            CoordinateValue::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_address_validation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_name_validation: Option<bool>,
}

/// Outgoing request handed to the transport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method; the conversion endpoint only accepts POST
    pub method: String,

    /// Raw JSON body, `{"input": "..."}`
    pub body: String,

    pub headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    pub const CONTENT_TYPE: &'static str = "application/json";

    /// The `input` value carried in the body
    pub fn input(&self) -> Option<String> {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()?
            .get("input")?
            .as_str()
            .map(str::to_string)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Reply as captured by the transport. The body stays raw so that a
/// malformed payload can still be reported on check by check.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    pub latency: Duration,
    pub body: String,
}

impl ServiceResponse {
    pub fn new(status: u16, latency: Duration, body: impl Into<String>) -> Self {
        Self {
            status,
            latency,
            body: body.into(),
        }
    }

    /// Build a response from an already-decoded JSON payload
    pub fn from_json(status: u16, latency: Duration, body: &serde_json::Value) -> Self {
        Self::new(status, latency, body.to_string())
    }
}

/// Map-link providers the service must return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Apple,
    Komoot,
    Bing,
    Osm,
    Waze,
    Google,
}

impl Provider {
    pub const ALL: [Provider; 6] = [
        Provider::Apple,
        Provider::Komoot,
        Provider::Bing,
        Provider::Osm,
        Provider::Waze,
        Provider::Google,
    ];

    /// Key of the provider in the `links` object
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Apple => "apple",
            Provider::Komoot => "komoot",
            Provider::Bing => "bing",
            Provider::Osm => "osm",
            Provider::Waze => "waze",
            Provider::Google => "google",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|provider| provider.as_str().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_camel_case() {
        let record: IterationRecord = serde_json::from_str(
            r#"{
                "input": "https://maps.app.goo.gl/abc",
                "expected": {"coordinates": {"lat": 48.8566, "lon": 2.3522}, "name": "Paris"},
                "testConfig": {"description": "Paris short link", "skipAddressValidation": true}
            }"#,
        )
        .unwrap();

        assert_eq!(record.input.as_deref(), Some("https://maps.app.goo.gl/abc"));
        assert_eq!(
            record.expected.coordinates,
            Some(ExpectedCoordinates::new(48.8566, 2.3522))
        );
        assert_eq!(record.test_config.skip_address_validation, Some(true));
        assert_eq!(record.test_config.skip_name_validation, None);
    }

    #[test]
    fn test_coordinates_accept_text_and_missing_axis() {
        let record: IterationRecord = serde_json::from_str(
            r#"{"input": "x", "expected": {"coordinates": {"lat": "48.8566", "lon": null}}}"#,
        )
        .unwrap();
        let coords = record.expected.coordinates.unwrap();

        assert_eq!(coords.lat, Some(CoordinateValue::Text("48.8566".to_string())));
        assert_eq!(coords.lat.unwrap().as_f64(), Some(48.8566));
        assert_eq!(coords.lon, None);
        assert_eq!(CoordinateValue::Text("north".to_string()).as_f64(), None);
    }

    #[test]
    fn test_record_without_input_still_loads() {
        let record: IterationRecord =
            serde_json::from_str(r#"{"testConfig": {"description": "no input"}}"#).unwrap();
        assert!(record.input.is_none());
        assert_eq!(record.expected, Expected::default());
    }

    #[test]
    fn test_provider_keys() {
        assert_eq!(Provider::Osm.as_str(), "osm");
        assert_eq!(Provider::from_key("WAZE"), Some(Provider::Waze));
        assert_eq!(Provider::from_key("yandex"), None);
        assert_eq!(serde_json::to_string(&Provider::Komoot).unwrap(), "\"komoot\"");
    }
}
