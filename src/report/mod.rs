pub mod reporter;
pub mod summary;

pub use reporter::{IterationReport, ReportEntry, Reporter};
pub use summary::ResponseSummary;
