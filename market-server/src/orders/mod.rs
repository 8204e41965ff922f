//! Order Lifecycle Module
//!
//! Turns a validated cart into a durable order and mediates its status
//! from there:
//!
//! - **builder**: cart validation, stock reservation, order creation
//! - **state**: status transition rules
//! - **service**: lifecycle operations (list / get / status / payment /
//!   cancel)
//!
//! # Control flow
//!
//! ```text
//! Cart → OrderBuilder → InventoryLedger (reserve) → OrderRepository (pending)
//!                                  ↑
//!                        release on any failure
//!
//! cancel → OrderRepository (cancelled) → InventoryLedger (release items)
//! ```

pub mod builder;
pub mod service;
pub mod state;

// Re-exports
pub use builder::OrderBuilder;
pub use service::OrdersService;
