pub mod contract_error;

pub use contract_error::{ContractError, ContractErrorCode};

pub type Result<T> = std::result::Result<T, ContractError>;
