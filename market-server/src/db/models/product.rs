//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Unit of measurement for produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProduceUnit {
    Kg,
    G,
    Piece,
    Bunch,
    Crate,
}

/// Produce category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProduceCategory {
    Vegetables,
    Fruits,
    Herbs,
    Tubers,
    Cereals,
    Other,
}

/// Product model (inventory unit)
///
/// `quantity` is mutated only through the inventory ledger; the catalog
/// update path carries no quantity field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    /// Unit price, snapshotted into order line items at reservation time
    pub price: Decimal,
    /// Available quantity, never negative
    pub quantity: i64,
    pub unit: ProduceUnit,
    pub category: ProduceCategory,
    #[serde(default)]
    pub images: Vec<String>,
    /// Seller-owner principal id
    pub farmer: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub location: String,
    pub harvested_date: Option<String>,
    pub expiry_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn default_true() -> bool {
    true
}

/// Payload for creating a product (farmer-owned fields only; the farmer id
/// comes from the acting principal)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub unit: ProduceUnit,
    pub category: ProduceCategory,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_available: Option<bool>,
    #[validate(length(min = 1, max = 200, message = "location must be 1-200 characters"))]
    pub location: String,
    pub harvested_date: Option<String>,
    pub expiry_date: Option<String>,
}

/// Payload for updating a product
///
/// No `quantity` here: stock changes go through the ledger's adjust
/// endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub unit: Option<ProduceUnit>,
    pub category: Option<ProduceCategory>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
    #[validate(length(min = 1, max = 200, message = "location must be 1-200 characters"))]
    pub location: Option<String>,
    pub harvested_date: Option<String>,
    pub expiry_date: Option<String>,
}
