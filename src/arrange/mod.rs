pub mod request_builder;

pub use request_builder::RequestBuilder;
