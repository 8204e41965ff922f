//! Inventory Ledger
//!
//! The sole authority for reading and adjusting available product
//! quantity. Every mutation is a single conditional
//! `UPDATE ... WHERE <precondition> RETURN AFTER` statement, so the stock
//! check and the decrement are one atomic step at the storage layer and
//! concurrent reservations can never drive a quantity below zero.
//!
//! Same-product mutations additionally serialize through a per-product
//! lock (the server owns its embedded database, so in-process ordering is
//! total ordering).

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use shared::AppError;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;
use tracing::warn;

use crate::db::models::Product;
use crate::db::repository::record_id;
use crate::utils::time::now_rfc3339;

const PRODUCT_TABLE: &str = "product";

/// A successful atomic stock decrement tied to one order line item
///
/// Carries the product snapshot captured at the instant of the decrement;
/// the order builder turns it into a line item without re-reading the
/// product.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub product: RecordId,
    pub product_name: String,
    /// Seller principal id of the product at reservation time
    pub seller: String,
    pub quantity: u32,
    /// Unit price at reservation time
    pub unit_price: Decimal,
}

/// Inventory ledger over the product table
#[derive(Clone)]
pub struct InventoryLedger {
    db: Surreal<Db>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl InventoryLedger {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, product: &RecordId) -> Arc<Mutex<()>> {
        self.locks
            .entry(product.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Atomically check availability and decrement stock
    ///
    /// Fails with `ProductNotFound` if the product does not exist,
    /// `ProductUnavailable` if its availability flag is off, and
    /// `InsufficientStock` if the requested quantity exceeds what is
    /// available.
    pub async fn check_and_reserve(
        &self,
        product_id: &str,
        quantity: u32,
    ) -> Result<Reservation, AppError> {
        if quantity == 0 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }
        let rid = record_id(PRODUCT_TABLE, product_id)
            .map_err(|_| AppError::product_not_found(product_id))?;

        let lock = self.lock_for(&rid);
        let _guard = lock.lock().await;

        let updated: Vec<Product> = self
            .db
            .query(
                "UPDATE product SET quantity -= $qty, updated_at = $now \
                 WHERE id = $id AND is_available = true AND quantity >= $qty \
                 RETURN AFTER",
            )
            .bind(("qty", quantity as i64))
            .bind(("now", now_rfc3339()))
            .bind(("id", rid.clone()))
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;

        match updated.into_iter().next() {
            Some(product) => Ok(Reservation {
                product: rid,
                product_name: product.name,
                seller: product.farmer,
                quantity,
                unit_price: product.price,
            }),
            // Precondition failed; read the product once more to name the
            // reason (the read is diagnostic only, the guard already held)
            None => {
                let current: Option<Product> = self
                    .db
                    .select(rid)
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?;
                match current {
                    None => Err(AppError::product_not_found(product_id)),
                    Some(p) if !p.is_available => Err(AppError::product_unavailable(p.name)),
                    Some(p) => Err(AppError::insufficient_stock(p.name)),
                }
            }
        }
    }

    /// Atomically return a reserved quantity to stock
    ///
    /// Used as the compensating action on cancellation and rollback. The
    /// caller guarantees a single invocation per cancelled order.
    pub async fn release(&self, product: &RecordId, quantity: u32) -> Result<(), AppError> {
        let lock = self.lock_for(product);
        let _guard = lock.lock().await;

        let updated: Vec<Product> = self
            .db
            .query(
                "UPDATE product SET quantity += $qty, updated_at = $now \
                 WHERE id = $id RETURN AFTER",
            )
            .bind(("qty", quantity as i64))
            .bind(("now", now_rfc3339()))
            .bind(("id", product.clone()))
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;

        if updated.is_empty() {
            return Err(AppError::product_not_found(product.to_string()));
        }
        Ok(())
    }

    /// Best-effort release of a whole reservation list
    ///
    /// Attempted for every entry even if some fail; failures are logged
    /// and never abort the compensation.
    pub async fn release_all(&self, reservations: &[Reservation]) {
        for r in reservations {
            if let Err(e) = self.release(&r.product, r.quantity).await {
                warn!(
                    product = %r.product,
                    quantity = r.quantity,
                    error = %e,
                    "stock release failed"
                );
            }
        }
    }

    /// Signed stock adjustment (restock, correction)
    ///
    /// The precondition keeps the resulting quantity non-negative.
    pub async fn adjust(&self, product_id: &str, delta: i64) -> Result<Product, AppError> {
        let rid = record_id(PRODUCT_TABLE, product_id)
            .map_err(|_| AppError::product_not_found(product_id))?;

        let lock = self.lock_for(&rid);
        let _guard = lock.lock().await;

        let updated: Vec<Product> = self
            .db
            .query(
                "UPDATE product SET quantity += $delta, updated_at = $now \
                 WHERE id = $id AND quantity + $delta >= 0 RETURN AFTER",
            )
            .bind(("delta", delta))
            .bind(("now", now_rfc3339()))
            .bind(("id", rid.clone()))
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;

        match updated.into_iter().next() {
            Some(product) => Ok(product),
            None => {
                let current: Option<Product> = self
                    .db
                    .select(rid)
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?;
                match current {
                    None => Err(AppError::product_not_found(product_id)),
                    Some(p) => Err(AppError::validation(format!(
                        "Adjustment of {} would drive {} below zero",
                        delta, p.name
                    ))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{ProduceCategory, ProduceUnit, ProductCreate};
    use crate::db::repository::ProductRepository;
    use shared::ErrorCode;

    async fn test_db() -> Surreal<Db> {
        DbService::open_in_memory().await.unwrap().db
    }

    async fn seed_product(
        db: &Surreal<Db>,
        farmer: &str,
        name: &str,
        price: i64,
        quantity: i64,
        available: bool,
    ) -> Product {
        let repo = ProductRepository::new(db.clone());
        repo.create(
            farmer,
            ProductCreate {
                name: name.to_string(),
                description: format!("{} from {}", name, farmer),
                price: Decimal::from(price),
                quantity,
                unit: ProduceUnit::Kg,
                category: ProduceCategory::Vegetables,
                images: vec![],
                is_available: Some(available),
                location: "Nakuru".to_string(),
                harvested_date: None,
                expiry_date: None,
            },
        )
        .await
        .unwrap()
    }

    fn id_of(product: &Product) -> String {
        product.id.as_ref().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_reserve_decrements_and_snapshots_price() {
        let db = test_db().await;
        let product = seed_product(&db, "user:wanjiku", "Tomatoes", 120, 10, true).await;
        let ledger = InventoryLedger::new(db.clone());

        let reservation = ledger.check_and_reserve(&id_of(&product), 4).await.unwrap();
        assert_eq!(reservation.quantity, 4);
        assert_eq!(reservation.unit_price, Decimal::from(120));
        assert_eq!(reservation.seller, "user:wanjiku");

        let repo = ProductRepository::new(db);
        let stored = repo.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 6);
    }

    #[tokio::test]
    async fn test_reserve_insufficient_stock() {
        let db = test_db().await;
        let product = seed_product(&db, "user:wanjiku", "Kale", 40, 3, true).await;
        let ledger = InventoryLedger::new(db.clone());

        let err = ledger.check_and_reserve(&id_of(&product), 4).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        // nothing was decremented
        let repo = ProductRepository::new(db);
        let stored = repo.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 3);
    }

    #[tokio::test]
    async fn test_reserve_unavailable_product() {
        let db = test_db().await;
        let product = seed_product(&db, "user:wanjiku", "Spinach", 30, 10, false).await;
        let ledger = InventoryLedger::new(db);

        let err = ledger.check_and_reserve(&id_of(&product), 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductUnavailable);
    }

    #[tokio::test]
    async fn test_reserve_missing_product() {
        let db = test_db().await;
        let ledger = InventoryLedger::new(db);

        let err = ledger
            .check_and_reserve("product:doesnotexist", 1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }

    #[tokio::test]
    async fn test_release_restores_quantity() {
        let db = test_db().await;
        let product = seed_product(&db, "user:wanjiku", "Carrots", 50, 8, true).await;
        let ledger = InventoryLedger::new(db.clone());

        let reservation = ledger.check_and_reserve(&id_of(&product), 5).await.unwrap();
        ledger
            .release(&reservation.product, reservation.quantity)
            .await
            .unwrap();

        let repo = ProductRepository::new(db);
        let stored = repo.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 8);
    }

    #[tokio::test]
    async fn test_adjust_guards_negative_quantity() {
        let db = test_db().await;
        let product = seed_product(&db, "user:wanjiku", "Onions", 60, 5, true).await;
        let ledger = InventoryLedger::new(db.clone());

        let updated = ledger.adjust(&id_of(&product), 7).await.unwrap();
        assert_eq!(updated.quantity, 12);

        let err = ledger.adjust(&id_of(&product), -20).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let updated = ledger.adjust(&id_of(&product), -12).await.unwrap();
        assert_eq!(updated.quantity, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reservations_never_oversell() {
        let db = test_db().await;
        let product = seed_product(&db, "user:wanjiku", "Mangoes", 25, 5, true).await;
        let ledger = InventoryLedger::new(db.clone());
        let product_id = id_of(&product);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let ledger = ledger.clone();
            let product_id = product_id.clone();
            handles.push(tokio::spawn(async move {
                ledger.check_and_reserve(&product_id, 1).await
            }));
        }

        let mut ok = 0;
        let mut insufficient = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(e) => {
                    assert_eq!(e.code, ErrorCode::InsufficientStock);
                    insufficient += 1;
                }
            }
        }

        assert_eq!(ok, 5);
        assert_eq!(insufficient, 11);

        let repo = ProductRepository::new(db);
        let stored = repo.find_by_id(&product_id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 0);
    }
}
