//! Shared types for the service desk
//!
//! Wire models, the unified error system and date helpers used by both the
//! HTTP client and the billing/scheduling core.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
