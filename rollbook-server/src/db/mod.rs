//! Database layer - record store and connection providers
//!
//! # Design Principles
//!
//! - One table, `student_record`, created with `IF NOT EXISTS` on startup
//! - Uniqueness comes from the primary key; no check-then-insert
//! - Every operation acquires its own handle and releases it before returning
//! - Duplicate keys are an outcome, not an error

pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::models::StudentRecord;

pub use postgres::PgStore;
pub use sqlite::SqliteStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("could not connect to {backend} store: {source}")]
    Connect {
        backend: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Result of a single insert attempt that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The roll number already exists; nothing was written.
    Duplicate,
}

/// Persistence for student records.
///
/// Implementations own their connection discipline: the embedded store opens
/// a connection per call, the networked store borrows one from its pool.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Backend label for logs (`sqlite` / `postgres`).
    fn backend(&self) -> &'static str;

    /// Create `student_record` if it does not exist. Safe to call repeatedly.
    async fn init(&self) -> Result<(), DbError>;

    /// Insert one record with a single parameterized statement.
    async fn insert(&self, record: &StudentRecord) -> Result<InsertOutcome, DbError>;

    /// Look up a record by roll number.
    async fn find(&self, roll_number: i64) -> Result<Option<StudentRecord>, DbError>;

    /// Number of stored records.
    async fn count(&self) -> Result<i64, DbError>;

    /// Release pooled resources. Called once on shutdown.
    async fn close(&self);
}

/// Open the configured store and make sure its table exists.
///
/// Any failure here is a startup failure; the caller must not serve traffic.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>, DbError> {
    let store: Arc<dyn RecordStore> = match config {
        StoreConfig::Sqlite { path } => Arc::new(SqliteStore::open(path).await?),
        StoreConfig::Postgres {
            url,
            max_connections,
        } => Arc::new(PgStore::connect(url, *max_connections).await?),
    };

    store.init().await?;
    tracing::info!(backend = store.backend(), "student_record table ready");

    Ok(store)
}

/// Map the raw result of an INSERT onto [`InsertOutcome`].
///
/// Only a uniqueness violation is recovered; every other failure is returned
/// as [`DbError`].
pub(crate) fn classify_insert<T>(result: Result<T, sqlx::Error>) -> Result<InsertOutcome, DbError> {
    match result {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
        Err(e) => Err(DbError::Sqlx(e)),
    }
}
