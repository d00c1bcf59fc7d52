use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single named check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum CheckOutcome {
    Passed,
    Failed(String),
    /// Preconditions not met; neither a pass nor a failure of the contract
    Skipped(String),
    /// Soft warning, counted as a pass
    Warned(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self::with_outcome(name, CheckOutcome::Passed)
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_outcome(name, CheckOutcome::Failed(message.into()))
    }

    pub fn skip(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_outcome(name, CheckOutcome::Skipped(reason.into()))
    }

    pub fn warn(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_outcome(name, CheckOutcome::Warned(message.into()))
    }

    /// Fold a list of violations into one result: pass when empty,
    /// otherwise fail with every violation joined.
    pub fn from_violations(name: impl Into<String>, violations: Vec<String>) -> Self {
        if violations.is_empty() {
            Self::pass(name)
        } else {
            Self::fail(name, violations.join("; "))
        }
    }

    fn with_outcome(name: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    pub fn passed(&self) -> bool {
        !matches!(self.outcome, CheckOutcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Skipped(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Warned(_))
    }

    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            CheckOutcome::Passed => None,
            CheckOutcome::Failed(message)
            | CheckOutcome::Skipped(message)
            | CheckOutcome::Warned(message) => Some(message),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.outcome {
            CheckOutcome::Passed => "PASS",
            CheckOutcome::Failed(_) => "FAIL",
            CheckOutcome::Skipped(_) => "SKIP",
            CheckOutcome::Warned(_) => "WARN",
        };
        match self.message() {
            Some(message) => write!(f, "{} {}: {}", label, self.name, message),
            None => write!(f, "{} {}", label, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_failures_count_as_not_passed() {
        assert!(CheckResult::pass("a").passed());
        assert!(CheckResult::skip("b", "no expectation").passed());
        assert!(CheckResult::warn("c", "name missing").passed());
        assert!(!CheckResult::fail("d", "wrong").passed());
    }

    #[test]
    fn test_from_violations() {
        assert_eq!(CheckResult::from_violations("x", vec![]), CheckResult::pass("x"));
        let result = CheckResult::from_violations(
            "x",
            vec!["first".to_string(), "second".to_string()],
        );
        assert_eq!(result.message(), Some("first; second"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CheckResult::fail("Status code is 200", "got 503").to_string(),
            "FAIL Status code is 200: got 503"
        );
        assert_eq!(CheckResult::pass("Cleanup globals").to_string(), "PASS Cleanup globals");
    }
}
