//! Repository Module
//!
//! Data access over the embedded SurrealDB tables.

pub mod order;
pub mod product;

// Re-exports
pub use order::OrderRepository;
pub use product::ProductRepository;

use shared::{AppError, ErrorCode};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

// =============================================================================
// ID Convention: "table:key" everywhere on the wire
// =============================================================================
//
// surrealdb::RecordId handles all IDs:
//   - create: RecordId::from_table_key("product", "abc")
//   - table name: id.table()
//   - bare key: id.key().to_string()
//   - CRUD: db.select(id) / db.delete(id) take a RecordId directly

/// Parse a "table:key" string (or a bare key) into a RecordId for the
/// given table
pub fn record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id);
    if key.is_empty() || key.contains(':') {
        return Err(RepoError::Validation(format!(
            "invalid {} id: {}",
            table, id
        )));
    }
    Ok(RecordId::from_table_key(table, key))
}
