//! # Maps Bridge Contract
//!
//! Contract validation for the Maps Bridge map-link conversion API. Each
//! dataset record drives one iteration: the request is arranged from the
//! record, executed by a [`Transport`], and the response is checked against
//! the response contract and the record's expectations.
//!
//! ## Features
//!
//! - **Arrange**: request construction and expectation seeding from dataset records
//! - **Assert**: eleven ordered, independent checks (status, latency, shape,
//!   coordinates, name, address, provider links, integrity)
//! - **Explicit Context**: phase-scoped expectation store, cleared after every iteration
//! - **Reporting**: ordered `{checkName, passed, message}` entries per iteration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use maps_bridge_contract::{IterationDataset, IterationRunner, RecordedTransport, ValidatorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = IterationDataset::from_file("data/locations.json").await?;
//!     let transport = RecordedTransport::from_file("data/recordings.json").await?;
//!
//!     let mut runner = IterationRunner::new(transport, ValidatorConfig::default())?;
//!     for report in runner.run_dataset(&dataset).await {
//!         println!("{}: {}", report.description, if report.passed() { "passed" } else { "failed" });
//!     }
//!     Ok(())
//! }
//! ```

pub mod arrange;
pub mod config;
pub mod context;
pub mod contract;
pub mod error;
pub mod report;
pub mod runner;
pub mod validation;

// Arrange exports
pub use arrange::RequestBuilder;

// Contract exports (dataset and wire types)
pub use contract::{
    CoordinateValue, Expected, ExpectedCoordinates, IterationDataset, IterationRecord, Provider,
    RequestDescriptor, ServiceResponse, TestConfig,
};

// Shared context exports
pub use context::{CleanupManager, ContextKey, ContextValue, SharedContext};

// Assert exports
pub use validation::{CheckOutcome, CheckResult, ResponseValidator, ResponseView};

// Reporting exports
pub use report::{IterationReport, ReportEntry, Reporter, ResponseSummary};

// Runner exports
pub use runner::{IterationRunner, RecordedTransport, Transport};

// Configuration exports
pub use config::ValidatorConfig;

// Error exports
pub use error::{ContractError, ContractErrorCode, Result};

/// Prelude module for convenient importing
pub mod prelude {
    pub use crate::{
        CheckOutcome, CheckResult, CleanupManager, ContextKey, ContractError, IterationDataset,
        IterationRecord, IterationReport, IterationRunner, RecordedTransport, RequestBuilder,
        ResponseValidator, Result, ServiceResponse, SharedContext, Transport, ValidatorConfig,
    };
    pub use serde_json::{json, Value as JsonValue};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
