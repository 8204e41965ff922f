//! Unified error codes for the marketplace
//!
//! All error codes used across the server and clients, organized by
//! category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// No principal supplied by the identity collaborator
    NotAuthenticated = 1001,
    /// Principal headers present but malformed
    InvalidPrincipal = 1002,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Cart contains no items
    OrderEmpty = 4002,
    /// Cart mixes products from more than one seller
    MultiSellerCart = 4003,
    /// Status value is not recognized
    InvalidOrderStatus = 4004,
    /// Status transition is not allowed
    InvalidStatusTransition = 4005,
    /// Only pending orders can be cancelled
    OrderNotCancellable = 4006,

    // ==================== 5xxx: Payment ====================
    /// Payment status value is not recognized
    InvalidPaymentStatus = 5001,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is not available for ordering
    ProductUnavailable = 6002,
    /// Requested quantity exceeds available stock
    InsufficientStock = 6003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidPrincipal => "Invalid principal",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Required role missing",
            Self::AdminRequired => "Administrator role required",

            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Please add items to your order",
            Self::MultiSellerCart => "All products must be from the same farmer",
            Self::InvalidOrderStatus => "Invalid order status",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::OrderNotCancellable => "Cannot cancel order that is not pending",

            Self::InvalidPaymentStatus => "Invalid payment status",

            Self::ProductNotFound => "Product not found",
            Self::ProductUnavailable => "Product not available",
            Self::InsufficientStock => "Insufficient quantity for product",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// Numeric value of this code
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_u16(), self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidPrincipal,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            2003 => Self::AdminRequired,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderEmpty,
            4003 => Self::MultiSellerCart,
            4004 => Self::InvalidOrderStatus,
            4005 => Self::InvalidStatusTransition,
            4006 => Self::OrderNotCancellable,

            5001 => Self::InvalidPaymentStatus,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductUnavailable,
            6003 => Self::InsufficientStock,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,

            other => return Err(format!("unknown error code: {}", other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_u16() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::OrderEmpty,
            ErrorCode::MultiSellerCart,
            ErrorCode::InsufficientStock,
            ErrorCode::DatabaseError,
        ];
        for code in codes {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(ErrorCode::try_from(777).is_err());
    }
}
