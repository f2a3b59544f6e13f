pub mod errors;

pub use errors::{ErrorCode, FdtdError, FdtdErrorCategory, FdtdResult};
