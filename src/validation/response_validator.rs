use log::debug;
use std::time::Instant;

use crate::config::ValidatorConfig;
use crate::context::SharedContext;
use crate::contract::ServiceResponse;
use crate::report::{Reporter, ResponseSummary};
use crate::validation::checks::{CHECKS, LOG_RESULTS_CHECK};
use crate::validation::{CheckResult, ResponseView};

/// Assert phase: runs the whole check battery against one response
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    config: ValidatorConfig,
}

impl ResponseValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run every check in order and return one result per check
    pub fn evaluate(&self, response: &ServiceResponse, context: &SharedContext) -> Vec<CheckResult> {
        let view = ResponseView::parse(response);
        self.evaluate_view(&view, context)
    }

    /// Run every check, recording each result and the response summary
    /// into `reporter`. Returns the number of failed checks.
    pub fn validate(
        &self,
        response: &ServiceResponse,
        context: &SharedContext,
        reporter: &mut Reporter,
    ) -> usize {
        let view = ResponseView::parse(response);
        let mut failures = 0;
        for result in self.evaluate_view(&view, context) {
            if result.name == LOG_RESULTS_CHECK {
                reporter.log_summary(&ResponseSummary::from_view(context.test_description(), &view));
            }
            if !result.passed() {
                failures += 1;
            }
            reporter.record(result);
        }
        failures
    }

    fn evaluate_view(&self, view: &ResponseView, context: &SharedContext) -> Vec<CheckResult> {
        let start_time = Instant::now();
        let results: Vec<CheckResult> = CHECKS
            .iter()
            .map(|check| check(view, context, &self.config))
            .collect();
        debug!(
            "Evaluated {} checks for '{}' in {:.3} ms",
            results.len(),
            context.test_description(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );
        results
    }
}
