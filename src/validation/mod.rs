pub mod check_result;
pub mod checks;
pub mod response_validator;
pub mod response_view;

pub use check_result::{CheckOutcome, CheckResult};
pub use response_validator::ResponseValidator;
pub use response_view::ResponseView;
