//! Unified error handling for the minutier registry
//!
//! - [`ErrorCode`]: stable u16 codes shared with upstream services
//! - [`AppError`]: structured error carrying code, message and details

pub mod codes;
pub mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
