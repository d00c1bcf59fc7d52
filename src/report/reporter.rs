use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ContractError;
use crate::report::ResponseSummary;
use crate::validation::CheckResult;

/// One reported line: `{checkName, passed, message}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub check_name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Everything reported for one iteration, in check order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationReport {
    pub iteration_id: Uuid,
    pub description: String,
    pub started_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
    pub log_lines: Vec<String>,
    /// Set when the iteration stopped before any check ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl IterationReport {
    pub fn passed(&self) -> bool {
        self.aborted.is_none() && self.entries.iter().all(|entry| entry.passed)
    }

    pub fn failed_entries(&self) -> Vec<&ReportEntry> {
        self.entries.iter().filter(|entry| !entry.passed).collect()
    }

    pub fn entry(&self, check_name: &str) -> Option<&ReportEntry> {
        let prefixed = format!("[{}] {}", self.description, check_name);
        self.entries
            .iter()
            .find(|entry| entry.check_name == prefixed)
    }

    pub fn to_json(&self) -> Result<String, ContractError> {
        serde_json::to_string_pretty(self).map_err(|e| ContractError::Serialization(e.to_string()))
    }
}

/// Collects the check results of a single iteration
pub struct Reporter {
    iteration_id: Uuid,
    description: String,
    started_at: DateTime<Utc>,
    entries: Vec<ReportEntry>,
    log_lines: Vec<String>,
    aborted: Option<String>,
}

impl Reporter {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            iteration_id: Uuid::new_v4(),
            description: description.into(),
            started_at: Utc::now(),
            entries: Vec::new(),
            log_lines: Vec::new(),
            aborted: None,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The description is only known once Arrange has resolved it
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn record(&mut self, result: CheckResult) {
        let entry = ReportEntry {
            check_name: format!("[{}] {}", self.description, result.name),
            passed: result.passed(),
            skipped: result.is_skipped(),
            message: result.message().map(str::to_string),
        };
        if entry.passed {
            info!("[{}] {}", self.description, result);
        } else {
            warn!("[{}] {}", self.description, result);
        }
        self.entries.push(entry);
    }

    pub fn log_summary(&mut self, summary: &ResponseSummary) {
        for line in summary.lines() {
            info!("{}", line);
            self.log_lines.push(line);
        }
    }

    pub fn abort(&mut self, error: &ContractError) {
        warn!("[{}] iteration aborted: {}", self.description, error);
        self.aborted = Some(error.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> IterationReport {
        IterationReport {
            iteration_id: self.iteration_id,
            description: self.description,
            started_at: self.started_at,
            entries: self.entries,
            log_lines: self.log_lines,
            aborted: self.aborted,
        }
    }
}
