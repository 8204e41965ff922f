//! Product Repository
//!
//! Catalog CRUD. Stock quantity is only ever written here on create; all
//! later quantity changes go through the inventory ledger.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{ProduceCategory, ProduceUnit, Product, ProductCreate, ProductUpdate};
use crate::utils::time::now_rfc3339;
use serde::Serialize;
use shared::PaginationParams;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

/// Catalog listing filter
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<ProduceCategory>,
    pub available: Option<bool>,
    pub farmer: Option<String>,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List products, newest first, filtered and paginated
    pub async fn find_all(
        &self,
        filter: &ProductFilter,
        page: &PaginationParams,
    ) -> RepoResult<Vec<Product>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.available.is_some() {
            conditions.push("is_available = $available");
        }
        if filter.farmer.is_some() {
            conditions.push("farmer = $farmer");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT * FROM product{} ORDER BY created_at DESC LIMIT $limit START $start",
            where_clause
        );

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("limit", page.limit() as i64))
            .bind(("start", page.offset() as i64));
        if let Some(category) = filter.category {
            query = query.bind(("category", category));
        }
        if let Some(available) = filter.available {
            query = query.bind(("available", available));
        }
        if let Some(farmer) = filter.farmer.clone() {
            query = query.bind(("farmer", farmer));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let rid = record_id(PRODUCT_TABLE, id)?;
        let product: Option<Product> = self.base.db().select(rid).await?;
        Ok(product)
    }

    /// Create a new product owned by the given farmer
    pub async fn create(&self, farmer: &str, data: ProductCreate) -> RepoResult<Product> {
        let now = now_rfc3339();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            quantity: data.quantity,
            unit: data.unit,
            category: data.category,
            images: data.images,
            farmer: farmer.to_string(),
            is_available: data.is_available.unwrap_or(true),
            location: data.location,
            harvested_date: data.harvested_date,
            expiry_date: data.expiry_date,
            created_at: now.clone(),
            updated_at: now,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update catalog fields of a product (quantity excluded)
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = record_id(PRODUCT_TABLE, id)?;

        #[derive(Serialize)]
        struct Patch {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<rust_decimal::Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            unit: Option<ProduceUnit>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<ProduceCategory>,
            #[serde(skip_serializing_if = "Option::is_none")]
            images: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_available: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            location: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            harvested_date: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            expiry_date: Option<String>,
            updated_at: String,
        }

        let patch = Patch {
            name: data.name,
            description: data.description,
            price: data.price,
            unit: data.unit,
            category: data.category,
            images: data.images,
            is_available: data.is_available,
            location: data.location,
            harvested_date: data.harvested_date,
            expiry_date: data.expiry_date,
            updated_at: now_rfc3339(),
        };

        let updated: Option<Product> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Delete a product, returning whether it existed
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(PRODUCT_TABLE, id)?;
        let deleted: Option<Product> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
