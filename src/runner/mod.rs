pub mod iteration_runner;
pub mod transport;

pub use iteration_runner::IterationRunner;
pub use transport::{RecordedTransport, Transport};
