//! Order Model
//!
//! Orders embed their line items as price/name snapshots taken at
//! reservation time; later catalog edits never change a stored order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use surrealdb::RecordId;
use validator::Validate;

// =============================================================================
// Status enums
// =============================================================================

/// Order status
///
/// `delivered` and `cancelled` are terminal. The transition rules live in
/// `crate::orders::state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Processing,
    ReadyForPickup,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Processing => "processing",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "processing" => Ok(Self::Processing),
            "ready_for_pickup" => Ok(Self::ReadyForPickup),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// Payment status, tracked independently of the order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

// =============================================================================
// Order entity
// =============================================================================

/// Structured delivery address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryAddress {
    #[validate(length(min = 1, max = 500, message = "street is required"))]
    pub street: String,
    #[validate(length(min = 1, max = 200, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 200, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, max = 50, message = "postal code is required"))]
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "Kenya".to_string()
}

/// Order line item: a price/name snapshot of the product at reservation
/// time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product: RecordId,
    pub name: String,
    pub quantity: u32,
    /// Unit price at time of order
    pub price: Decimal,
    /// quantity × price
    pub subtotal: Decimal,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Buyer principal id
    pub customer: String,
    /// Seller principal id; all line items share this seller
    pub seller: String,
    pub items: Vec<OrderLineItem>,
    /// Sum of line item subtotals
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub delivery_address: DeliveryAddress,
    pub delivery_instructions: Option<String>,
    pub expected_delivery_date: Option<String>,
    pub actual_delivery_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// =============================================================================
// Request payloads
// =============================================================================

/// One cart entry in an order-creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemInput {
    /// Product record id ("product:xyz" or bare key)
    #[validate(length(min = 1, message = "product id is required"))]
    pub product: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

/// Order-creation request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(nested)]
    pub items: Vec<OrderItemInput>,
    #[validate(nested)]
    pub delivery_address: DeliveryAddress,
    #[validate(length(min = 1, max = 200, message = "payment method is required"))]
    pub payment_method: String,
    #[validate(length(max = 500, message = "delivery instructions too long"))]
    pub delivery_instructions: Option<String>,
    pub expected_delivery_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Rejected,
            OrderStatus::Processing,
            OrderStatus::ReadyForPickup,
            OrderStatus::InTransit,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serde_matches_as_str() {
        let json = serde_json::to_value(OrderStatus::ReadyForPickup).unwrap();
        assert_eq!(json, "ready_for_pickup");
        let json = serde_json::to_value(PaymentStatus::Completed).unwrap();
        assert_eq!(json, "completed");
    }

    #[test]
    fn test_address_country_default() {
        let address: DeliveryAddress = serde_json::from_value(serde_json::json!({
            "street": "12 Moi Avenue",
            "city": "Nairobi",
            "state": "Nairobi",
            "postal_code": "00100"
        }))
        .unwrap();
        assert_eq!(address.country, "Kenya");
    }
}
