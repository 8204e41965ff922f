//! Unified error handling
//!
//! Structured error codes and the application error type shared across the
//! workspace:
//!
//! - [`ErrorCode`] - stable u16 codes, grouped by numeric range
//! - [`ErrorCategory`] - range classification of a code
//! - [`AppError`] - error type carrying code, message and optional details
//!
//! HTTP status mapping lives in [`http`]; the wire envelope is built in
//! `crate::response`.

pub mod category;
pub mod codes;
pub mod http;
pub mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::AppError;
