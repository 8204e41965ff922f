//! Order Repository
//!
//! The single writer of order status and payment status. Orders are never
//! deleted; terminal transitions freeze them in place.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::auth::Principal;
use crate::db::models::{Order, OrderStatus, PaymentStatus};
use crate::utils::time::now_rfc3339;
use serde::Serialize;
use shared::Role;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a fully-built order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = record_id(ORDER_TABLE, id)?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    /// List orders visible to the principal, newest first
    ///
    /// Customers see their own orders, farmers the orders addressed to
    /// them, administrators everything.
    pub async fn find_for_principal(&self, principal: &Principal) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = match principal.role {
            Role::Admin => {
                self.base
                    .db()
                    .query("SELECT * FROM order ORDER BY created_at DESC")
                    .await?
                    .take(0)?
            }
            Role::Customer => {
                self.base
                    .db()
                    .query("SELECT * FROM order WHERE customer = $id ORDER BY created_at DESC")
                    .bind(("id", principal.id.clone()))
                    .await?
                    .take(0)?
            }
            Role::Farmer => {
                self.base
                    .db()
                    .query("SELECT * FROM order WHERE seller = $id ORDER BY created_at DESC")
                    .bind(("id", principal.id.clone()))
                    .await?
                    .take(0)?
            }
        };
        Ok(orders)
    }

    /// Set the order status, optionally stamping the actual delivery time
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        actual_delivery_date: Option<String>,
    ) -> RepoResult<Order> {
        let rid = record_id(ORDER_TABLE, id)?;

        #[derive(Serialize)]
        struct Patch {
            status: OrderStatus,
            #[serde(skip_serializing_if = "Option::is_none")]
            actual_delivery_date: Option<String>,
            updated_at: String,
        }

        let patch = Patch {
            status,
            actual_delivery_date,
            updated_at: now_rfc3339(),
        };

        let updated: Option<Order> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Set the payment status
    pub async fn update_payment_status(
        &self,
        id: &str,
        payment_status: PaymentStatus,
    ) -> RepoResult<Order> {
        let rid = record_id(ORDER_TABLE, id)?;

        #[derive(Serialize)]
        struct Patch {
            payment_status: PaymentStatus,
            updated_at: String,
        }

        let patch = Patch {
            payment_status,
            updated_at: now_rfc3339(),
        };

        let updated: Option<Order> = self.base.db().update(rid).merge(patch).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
