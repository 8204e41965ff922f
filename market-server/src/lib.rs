//! Market Server - produce marketplace order and inventory service
//!
//! # Architecture overview
//!
//! - **Database** (`db`): embedded SurrealDB storage, models, repositories
//! - **Inventory** (`inventory`): the ledger owning product stock counts
//! - **Orders** (`orders`): cart validation, order creation, lifecycle
//! - **Auth** (`auth`): principal extraction from the identity gateway
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module structure
//!
//! ```text
//! market-server/src/
//! ├── core/          # config, state, server startup
//! ├── auth/          # acting principal, header extractor
//! ├── db/            # database layer (models + repositories)
//! ├── inventory/     # inventory ledger
//! ├── orders/        # order builder, state machine, service
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation, result types
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod inventory;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::Principal;
pub use crate::core::{Config, Server, ServerState};
pub use inventory::{InventoryLedger, Reservation};
pub use orders::OrdersService;
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(Some(&level), log_dir.as_deref());

    Ok(())
}
