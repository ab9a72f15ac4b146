//! Shared types for the minutier registry
//!
//! Common types used across the registry crates: domain models,
//! error codes, response structures, and utility functions.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
