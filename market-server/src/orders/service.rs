//! Order lifecycle service
//!
//! All order operations take the acting principal as an explicit
//! parameter; there is no ambient request context.

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{info, warn};

use crate::auth::Principal;
use crate::db::models::{Order, OrderCreate, OrderStatus, PaymentStatus};
use crate::db::repository::OrderRepository;
use crate::inventory::InventoryLedger;
use crate::orders::builder::OrderBuilder;
use crate::orders::state;
use crate::utils::time::now_rfc3339;

#[derive(Clone)]
pub struct OrdersService {
    orders: OrderRepository,
    ledger: InventoryLedger,
}

impl OrdersService {
    pub fn new(db: Surreal<Db>, ledger: InventoryLedger) -> Self {
        Self {
            orders: OrderRepository::new(db),
            ledger,
        }
    }

    /// Create an order from a cart (customers only)
    pub async fn create_order(
        &self,
        principal: &Principal,
        request: OrderCreate,
    ) -> Result<Order, AppError> {
        OrderBuilder::new(&self.ledger, &self.orders)
            .create_order(principal, request)
            .await
    }

    /// List orders visible to the principal
    pub async fn list_orders(&self, principal: &Principal) -> Result<Vec<Order>, AppError> {
        Ok(self.orders.find_for_principal(principal).await?)
    }

    /// Fetch one order; only its customer, its seller or an administrator
    /// may see it
    pub async fn get_order(&self, principal: &Principal, id: &str) -> Result<Order, AppError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))?;

        if !principal.is_admin() && order.customer != principal.id && order.seller != principal.id
        {
            return Err(AppError::forbidden("Not authorized to access this order"));
        }
        Ok(order)
    }

    /// Move an order along its lifecycle (seller or administrator)
    ///
    /// `delivered` stamps the actual delivery time with the current
    /// moment; repeated deliveries restamp it.
    pub async fn set_status(
        &self,
        principal: &Principal,
        id: &str,
        status_value: &str,
    ) -> Result<Order, AppError> {
        let new_status: OrderStatus = status_value
            .parse()
            .map_err(|_| AppError::invalid_order_status(status_value))?;

        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))?;

        if !principal.is_admin() && order.seller != principal.id {
            return Err(AppError::forbidden("Not authorized to update this order"));
        }
        if !state::can_transition(order.status, new_status) {
            return Err(AppError::invalid_transition(
                order.status.as_str(),
                new_status.as_str(),
            ));
        }

        let delivered_at = (new_status == OrderStatus::Delivered).then(now_rfc3339);
        let updated = self.orders.update_status(id, new_status, delivered_at).await?;

        info!(order = id, status = %new_status, "order status updated");
        Ok(updated)
    }

    /// Set the payment status (administrators only)
    pub async fn set_payment_status(
        &self,
        principal: &Principal,
        id: &str,
        status_value: &str,
    ) -> Result<Order, AppError> {
        if !principal.is_admin() {
            return Err(AppError::admin_required(
                "Only admins can update payment status",
            ));
        }
        let payment_status: PaymentStatus = status_value
            .parse()
            .map_err(|_| AppError::invalid_payment_status(status_value))?;

        let updated = self
            .orders
            .update_payment_status(id, payment_status)
            .await
            .map_err(|e| match e {
                crate::db::repository::RepoError::NotFound(_) => AppError::order_not_found(id),
                other => other.into(),
            })?;

        info!(order = id, payment_status = %payment_status, "payment status updated");
        Ok(updated)
    }

    /// Cancel a pending order (its customer or an administrator)
    ///
    /// Status moves to `cancelled` first; the compensating stock release
    /// is then attempted for every line item, and a failed release is
    /// logged without rolling the cancellation back.
    pub async fn cancel(&self, principal: &Principal, id: &str) -> Result<Order, AppError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))?;

        if !principal.is_admin() && order.customer != principal.id {
            return Err(AppError::forbidden("Not authorized to cancel this order"));
        }
        if order.status != OrderStatus::Pending {
            return Err(AppError::not_cancellable(order.status.as_str()));
        }

        let updated = self
            .orders
            .update_status(id, OrderStatus::Cancelled, None)
            .await?;

        for item in &updated.items {
            if let Err(e) = self.ledger.release(&item.product, item.quantity).await {
                warn!(
                    order = id,
                    product = %item.product,
                    quantity = item.quantity,
                    error = %e,
                    "compensating stock release failed"
                );
            }
        }

        info!(order = id, "order cancelled");
        Ok(updated)
    }
}
