pub mod dataset;
pub mod types;

pub use dataset::IterationDataset;
pub use types::{
    CoordinateValue, Expected, ExpectedCoordinates, IterationRecord, Provider, RequestDescriptor,
    ServiceResponse, TestConfig,
};
