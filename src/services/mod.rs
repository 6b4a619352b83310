pub mod errors;
pub mod import;
pub mod main;

pub use errors::{ServiceError, ServiceResult};
