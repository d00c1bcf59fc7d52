use log::{debug, error, info, warn};
use tokio::fs;

use crate::contract::IterationRecord;
use crate::error::ContractError;

/// Iteration data file: one record per iteration, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationDataset {
    pub records: Vec<IterationRecord>,
}

impl IterationDataset {
    pub fn new(records: Vec<IterationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IterationRecord> {
        self.records.iter()
    }

    /// Parse a dataset from a JSON array
    pub fn from_json(json_str: &str) -> Result<Self, ContractError> {
        Self::from_json_with_context(json_str, None)
    }

    /// Parse a dataset from a JSON array with file context
    pub fn from_json_with_context(
        json_str: &str,
        file_path: Option<&str>,
    ) -> Result<Self, ContractError> {
        let context = file_path
            .map(|p| format!(" (file: {})", p))
            .unwrap_or_default();
        debug!(
            "Attempting to parse iteration dataset from JSON{} ({} bytes)",
            context,
            json_str.len()
        );

        if json_str.trim().is_empty() {
            error!("Iteration dataset is empty{}", context);
            return Err(ContractError::DatasetParse(format!(
                "JSON parsing error{}: input string is empty",
                context
            )));
        }

        match serde_json::from_str::<Vec<IterationRecord>>(json_str) {
            Ok(records) => {
                info!(
                    "Parsed {} iteration records from JSON{}",
                    records.len(),
                    context
                );
                Ok(Self::new(records))
            }
            Err(e) => {
                let detailed_error = match e.classify() {
                    serde_json::error::Category::Syntax => format!(
                        "JSON parsing error{} - Syntax error at line {}, column {}: {}",
                        context,
                        e.line(),
                        e.column(),
                        e
                    ),
                    serde_json::error::Category::Data => format!(
                        "JSON parsing error{} - Invalid data structure: {}",
                        context, e
                    ),
                    serde_json::error::Category::Eof => format!(
                        "JSON parsing error{} - Unexpected end of file: {}",
                        context, e
                    ),
                    serde_json::error::Category::Io => {
                        format!("JSON parsing error{} - I/O issue: {}", context, e)
                    }
                };
                error!("{}", detailed_error);
                Err(ContractError::DatasetParse(detailed_error))
            }
        }
    }

    /// Parse a dataset from a YAML sequence
    #[cfg(feature = "yaml-support")]
    pub fn from_yaml(yaml_str: &str) -> Result<Self, ContractError> {
        if yaml_str.trim().is_empty() {
            return Err(ContractError::DatasetParse(
                "YAML parsing error: input string is empty".to_string(),
            ));
        }
        let records: Vec<IterationRecord> = serde_yaml::from_str(yaml_str)?;
        info!("Parsed {} iteration records from YAML", records.len());
        Ok(Self::new(records))
    }

    /// Load a dataset from file (format picked by extension, JSON by default)
    pub async fn from_file(path: &str) -> Result<Self, ContractError> {
        info!("Loading iteration dataset from file: {}", path);

        if path.trim().is_empty() {
            return Err(ContractError::Configuration(
                "Dataset file path cannot be empty".to_string(),
            ));
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            error!("Failed to read dataset file '{}': {}", path, e);
            ContractError::ResourceNotFound(format!("Failed to read file {}: {}", path, e))
        })?;
        debug!("Read {} bytes from {}", content.len(), path);

        let dataset = if path.ends_with(".yaml") || path.ends_with(".yml") {
            #[cfg(feature = "yaml-support")]
            {
                Self::from_yaml(&content)?
            }
            #[cfg(not(feature = "yaml-support"))]
            {
                return Err(ContractError::Configuration(format!(
                    "YAML support not enabled (file: {}). Enable 'yaml-support' feature.",
                    path
                )));
            }
        } else {
            Self::from_json_with_context(&content, Some(path))?
        };

        if dataset.is_empty() {
            warn!("Iteration dataset {} contains no records", path);
        }
        Ok(dataset)
    }
}

impl<'a> IntoIterator for &'a IterationDataset {
    type Item = &'a IterationRecord;
    type IntoIter = std::slice::Iter<'a, IterationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset_in_order() {
        let dataset = IterationDataset::from_json(
            r#"[
                {"input": "48.8566,2.3522", "testConfig": {"description": "first"}},
                {"input": "https://maps.apple.com/?ll=1,2", "testConfig": {"description": "second"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        let descriptions: Vec<_> = dataset
            .iter()
            .map(|r| r.test_config.description.clone().unwrap())
            .collect();
        assert_eq!(descriptions, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_string_is_rejected() {
        let error = IterationDataset::from_json("   ").unwrap_err();
        assert!(error.to_string().contains("input string is empty"));
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let error = IterationDataset::from_json("[{\"input\": }]").unwrap_err();
        assert!(error.to_string().contains("Syntax error at line 1"));
    }
}
