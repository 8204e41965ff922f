//! Application error type

use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type of the workspace:
/// - standardized error codes via [`ErrorCode`]
/// - human-readable messages
/// - optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a not authenticated error
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid principal error
    pub fn invalid_principal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidPrincipal, msg)
    }

    /// Create a permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an admin-only error
    pub fn admin_required(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AdminRequired, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    // ==================== Order errors ====================

    pub fn order_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
            .with_detail("order", id)
    }

    pub fn empty_cart() -> Self {
        Self::new(ErrorCode::OrderEmpty)
    }

    pub fn multi_seller_cart() -> Self {
        Self::new(ErrorCode::MultiSellerCart)
    }

    pub fn invalid_order_status(value: impl Into<String>) -> Self {
        let v = value.into();
        Self::with_message(ErrorCode::InvalidOrderStatus, format!("Invalid order status: {}", v))
            .with_detail("status", v)
    }

    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        let (from, to) = (from.into(), to.into());
        Self::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot transition order from {} to {}", from, to),
        )
        .with_detail("from", from)
        .with_detail("to", to)
    }

    pub fn not_cancellable(status: impl Into<String>) -> Self {
        Self::new(ErrorCode::OrderNotCancellable).with_detail("status", status.into())
    }

    // ==================== Payment errors ====================

    pub fn invalid_payment_status(value: impl Into<String>) -> Self {
        let v = value.into();
        Self::with_message(
            ErrorCode::InvalidPaymentStatus,
            format!("Invalid payment status: {}", v),
        )
        .with_detail("payment_status", v)
    }

    // ==================== Product errors ====================

    pub fn product_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::ProductNotFound, format!("Product not found: {}", id))
            .with_detail("product", id)
    }

    pub fn product_unavailable(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::with_message(
            ErrorCode::ProductUnavailable,
            format!("Product not available: {}", name),
        )
        .with_detail("product", name)
    }

    pub fn insufficient_stock(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::with_message(
            ErrorCode::InsufficientStock,
            format!("Insufficient quantity for product: {}", name),
        )
        .with_detail("product", name)
    }
}
