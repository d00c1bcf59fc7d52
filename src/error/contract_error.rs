use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable identifiers for the failure classes of a contract run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractErrorCode {
    MissingInput,
    DatasetParse,
    ResourceNotFound,
    Transport,
    Configuration,
    Serialization,
}

impl ContractErrorCode {
    /// Returns the string representation of the error code
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractErrorCode::MissingInput => "MISSING_INPUT",
            ContractErrorCode::DatasetParse => "DATASET_PARSE_ERROR",
            ContractErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ContractErrorCode::Transport => "TRANSPORT_ERROR",
            ContractErrorCode::Configuration => "CONFIGURATION_ERROR",
            ContractErrorCode::Serialization => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the failure aborts the iteration before any check runs
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ContractErrorCode::MissingInput | ContractErrorCode::Transport
        )
    }
}

impl fmt::Display for ContractErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ContractError {
    #[error("Input URL is required in data file (test: '{0}')")]
    MissingInput(String),

    #[error("Dataset parsing error: {0}")]
    DatasetParse(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Transport failed for input '{0}': {1}")]
    Transport(String, String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ContractError {
    pub fn code(&self) -> ContractErrorCode {
        match self {
            ContractError::MissingInput(_) => ContractErrorCode::MissingInput,
            ContractError::DatasetParse(_) => ContractErrorCode::DatasetParse,
            ContractError::ResourceNotFound(_) => ContractErrorCode::ResourceNotFound,
            ContractError::Transport(_, _) => ContractErrorCode::Transport,
            ContractError::Configuration(_) => ContractErrorCode::Configuration,
            ContractError::Serialization(_) => ContractErrorCode::Serialization,
        }
    }
}

impl From<std::io::Error> for ContractError {
    fn from(error: std::io::Error) -> Self {
        ContractError::ResourceNotFound(error.to_string())
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(error: serde_json::Error) -> Self {
        ContractError::DatasetParse(error.to_string())
    }
}

#[cfg(feature = "yaml-support")]
impl From<serde_yaml::Error> for ContractError {
    fn from(error: serde_yaml::Error) -> Self {
        ContractError::DatasetParse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ContractError::MissingInput("Unknown Test".to_string()).code(),
            ContractErrorCode::MissingInput
        );
        assert_eq!(ContractErrorCode::Transport.as_str(), "TRANSPORT_ERROR");
        assert!(ContractErrorCode::MissingInput.is_fatal());
        assert!(!ContractErrorCode::DatasetParse.is_fatal());
    }

    #[test]
    fn test_error_display() {
        let error = ContractError::Transport("geo:1,2".to_string(), "connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Transport failed for input 'geo:1,2': connection refused"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: ContractError = parse_error.into();
        assert_eq!(error.code(), ContractErrorCode::DatasetParse);
    }
}
