use log::{debug, info};

use crate::arrange::RequestBuilder;
use crate::config::ValidatorConfig;
use crate::context::{CleanupManager, SharedContext};
use crate::contract::{IterationDataset, IterationRecord};
use crate::error::ContractError;
use crate::report::{IterationReport, Reporter};
use crate::runner::Transport;
use crate::validation::ResponseValidator;

/// Drives Arrange, transport, Assert, report and Cleanup for each record.
///
/// The runner owns the shared context, and every iteration takes `&mut self`,
/// so one iteration always finishes its cleanup before the next one arranges.
pub struct IterationRunner<T: Transport> {
    transport: T,
    validator: ResponseValidator,
    context: SharedContext,
}

impl<T: Transport> IterationRunner<T> {
    pub fn new(transport: T, config: ValidatorConfig) -> Result<Self, ContractError> {
        config.validate().map_err(ContractError::Configuration)?;
        Ok(Self {
            transport,
            validator: ResponseValidator::new(config),
            context: SharedContext::new(),
        })
    }

    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn run_iteration(&mut self, record: &IterationRecord) -> IterationReport {
        let mut reporter = Reporter::new(RequestBuilder::description_of(record));

        let request = match RequestBuilder::arrange(record, &mut self.context) {
            Ok(request) => request,
            Err(e) => {
                reporter.abort(&e);
                CleanupManager::cleanup(&mut self.context);
                return reporter.finish();
            }
        };

        match self.transport.execute(&request).await {
            Ok(response) => {
                debug!(
                    "Received status {} after {} ms",
                    response.status,
                    response.latency.as_millis()
                );
                self.validator.validate(&response, &self.context, &mut reporter);
                reporter.record(CleanupManager::cleanup(&mut self.context));
            }
            Err(e) => {
                reporter.abort(&e);
                CleanupManager::cleanup(&mut self.context);
            }
        }
        reporter.finish()
    }

    /// Run every record in order
    pub async fn run_dataset(&mut self, dataset: &IterationDataset) -> Vec<IterationReport> {
        let mut reports = Vec::with_capacity(dataset.len());
        for record in dataset {
            reports.push(self.run_iteration(record).await);
        }
        let passed = reports.iter().filter(|report| report.passed()).count();
        info!("{}/{} iterations passed", passed, reports.len());
        reports
    }
}
