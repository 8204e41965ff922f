//! Order Builder
//!
//! Validates a submitted cart and produces the persisted pending order.
//! Reservations are accumulated in memory and committed or rolled back as
//! a unit: any failure after a successful reservation releases every
//! reservation made so far before the error is returned.

use rust_decimal::Decimal;
use shared::{AppError, Role};
use tracing::info;
use validator::Validate;

use crate::auth::Principal;
use crate::db::models::{Order, OrderCreate, OrderLineItem, OrderStatus, PaymentStatus};
use crate::db::repository::OrderRepository;
use crate::inventory::{InventoryLedger, Reservation};
use crate::utils::time::now_rfc3339;
use crate::utils::validation::validation_error;

pub struct OrderBuilder<'a> {
    ledger: &'a InventoryLedger,
    orders: &'a OrderRepository,
}

impl<'a> OrderBuilder<'a> {
    pub fn new(ledger: &'a InventoryLedger, orders: &'a OrderRepository) -> Self {
        Self { ledger, orders }
    }

    /// Validate the cart, reserve stock for every line item and persist
    /// the order as `pending`
    pub async fn create_order(
        &self,
        principal: &Principal,
        request: OrderCreate,
    ) -> Result<Order, AppError> {
        if principal.role != Role::Customer {
            return Err(AppError::forbidden("Only customers can create orders"));
        }
        if request.items.is_empty() {
            return Err(AppError::empty_cart());
        }
        request.validate().map_err(validation_error)?;

        let mut reservations: Vec<Reservation> = Vec::with_capacity(request.items.len());
        let mut seller: Option<String> = None;

        for item in &request.items {
            let reservation = match self
                .ledger
                .check_and_reserve(&item.product, item.quantity)
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    self.ledger.release_all(&reservations).await;
                    return Err(e);
                }
            };

            // The first resolved product pins the order's seller; every
            // later item must belong to the same one.
            match &seller {
                None => seller = Some(reservation.seller.clone()),
                Some(s) if *s != reservation.seller => {
                    reservations.push(reservation);
                    self.ledger.release_all(&reservations).await;
                    return Err(AppError::multi_seller_cart());
                }
                Some(_) => {}
            }
            reservations.push(reservation);
        }

        let Some(seller) = seller else {
            return Err(AppError::empty_cart());
        };

        let items: Vec<OrderLineItem> = reservations
            .iter()
            .map(|r| {
                let subtotal = r.unit_price * Decimal::from(r.quantity);
                OrderLineItem {
                    product: r.product.clone(),
                    name: r.product_name.clone(),
                    quantity: r.quantity,
                    price: r.unit_price,
                    subtotal,
                }
            })
            .collect();
        let total_amount: Decimal = items.iter().map(|i| i.subtotal).sum();

        let now = now_rfc3339();
        let order = Order {
            id: None,
            customer: principal.id.clone(),
            seller,
            items,
            total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: request.payment_method,
            delivery_address: request.delivery_address,
            delivery_instructions: request.delivery_instructions,
            expected_delivery_date: request.expected_delivery_date,
            actual_delivery_date: None,
            created_at: now.clone(),
            updated_at: now,
        };

        match self.orders.create(order).await {
            Ok(stored) => {
                info!(
                    customer = %stored.customer,
                    seller = %stored.seller,
                    total = %stored.total_amount,
                    "order created"
                );
                Ok(stored)
            }
            Err(e) => {
                // Persistence failed after the stock was taken; give it
                // back before surfacing the error.
                self.ledger.release_all(&reservations).await;
                Err(e.into())
            }
        }
    }
}
