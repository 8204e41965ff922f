//! Database models

pub mod order;
pub mod product;

pub use order::{
    DeliveryAddress, Order, OrderCreate, OrderItemInput, OrderLineItem, OrderStatus,
    PaymentStatus,
};
pub use product::{ProduceCategory, ProduceUnit, Product, ProductCreate, ProductUpdate};
