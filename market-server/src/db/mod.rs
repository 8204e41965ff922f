//! Database Module
//!
//! Embedded SurrealDB storage: connection setup and idempotent schema
//! definition.

pub mod models;
pub mod repository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "market";
const DATABASE: &str = "market";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database (RocksDB engine) at the given directory
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
        let service = Self::prepare(db).await?;
        tracing::info!(path = db_path, "Database connection established");
        Ok(service)
    }

    /// Open an in-memory database (tests, local experiments)
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        define_schema(&db).await?;

        Ok(Self { db })
    }
}

/// Idempotent schema definition, applied at every startup
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
         DEFINE INDEX IF NOT EXISTS product_farmer ON product FIELDS farmer;
         DEFINE INDEX IF NOT EXISTS product_category ON product FIELDS category;
         DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
         DEFINE INDEX IF NOT EXISTS order_customer ON order FIELDS customer;
         DEFINE INDEX IF NOT EXISTS order_seller ON order FIELDS seller;",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;

    Ok(())
}
