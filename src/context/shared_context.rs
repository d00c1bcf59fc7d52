//! Phase-scoped expectation store bridging Arrange and Assert.
//!
//! Arrange writes all seven keys, Assert only reads them and Cleanup removes
//! them again. The store is owned by the iteration runner and passed by
//! reference, so the phase ordering is what serializes access.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Description used when a record does not name itself
pub const UNKNOWN_TEST_DESCRIPTION: &str = "Unknown Test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContextKey {
    #[serde(rename = "expectedLat")]
    ExpectedLat,
    #[serde(rename = "expectedLon")]
    ExpectedLon,
    #[serde(rename = "expectedAddress")]
    ExpectedAddress,
    #[serde(rename = "expectedName")]
    ExpectedName,
    #[serde(rename = "testDescription")]
    TestDescription,
    #[serde(rename = "skipAddressValidation")]
    SkipAddressValidation,
    #[serde(rename = "skipNameValidation")]
    SkipNameValidation,
}

impl ContextKey {
    pub const ALL: [ContextKey; 7] = [
        ContextKey::ExpectedLat,
        ContextKey::ExpectedLon,
        ContextKey::ExpectedAddress,
        ContextKey::ExpectedName,
        ContextKey::TestDescription,
        ContextKey::SkipAddressValidation,
        ContextKey::SkipNameValidation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKey::ExpectedLat => "expectedLat",
            ContextKey::ExpectedLon => "expectedLon",
            ContextKey::ExpectedAddress => "expectedAddress",
            ContextKey::ExpectedName => "expectedName",
            ContextKey::TestDescription => "testDescription",
            ContextKey::SkipAddressValidation => "skipAddressValidation",
            ContextKey::SkipNameValidation => "skipNameValidation",
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value stored under a context key. `Null` is a present entry holding
/// "no expectation", which is different from an absent key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Null,
    Number(f64),
    Text(String),
    Flag(bool),
}

impl From<Option<f64>> for ContextValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ContextValue::Null, ContextValue::Number)
    }
}

impl From<Option<String>> for ContextValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(ContextValue::Null, ContextValue::Text)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Flag(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedContext {
    entries: BTreeMap<ContextKey, ContextValue>,
}

impl SharedContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing whatever was there
    pub fn set(&mut self, key: ContextKey, value: impl Into<ContextValue>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: ContextKey) -> Option<&ContextValue> {
        self.entries.get(&key)
    }

    pub fn unset(&mut self, key: ContextKey) -> Option<ContextValue> {
        self.entries.remove(&key)
    }

    pub fn contains(&self, key: ContextKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys currently present, in declaration order
    pub fn keys(&self) -> Vec<ContextKey> {
        self.entries.keys().copied().collect()
    }

    pub fn expected_lat(&self) -> Option<f64> {
        self.number(ContextKey::ExpectedLat)
    }

    pub fn expected_lon(&self) -> Option<f64> {
        self.number(ContextKey::ExpectedLon)
    }

    pub fn expected_address(&self) -> Option<&str> {
        self.text(ContextKey::ExpectedAddress)
    }

    pub fn expected_name(&self) -> Option<&str> {
        self.text(ContextKey::ExpectedName)
    }

    pub fn test_description(&self) -> &str {
        self.text(ContextKey::TestDescription)
            .unwrap_or(UNKNOWN_TEST_DESCRIPTION)
    }

    pub fn skip_address_validation(&self) -> bool {
        self.flag(ContextKey::SkipAddressValidation)
    }

    pub fn skip_name_validation(&self) -> bool {
        self.flag(ContextKey::SkipNameValidation)
    }

    fn number(&self, key: ContextKey) -> Option<f64> {
        match self.entries.get(&key) {
            Some(ContextValue::Number(value)) if value.is_finite() => Some(*value),
            Some(ContextValue::Text(text)) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    fn text(&self, key: ContextKey) -> Option<&str> {
        match self.entries.get(&key) {
            Some(ContextValue::Text(text)) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    fn flag(&self, key: ContextKey) -> bool {
        matches!(self.entries.get(&key), Some(ContextValue::Flag(true)))
    }
}
