//! Networked store backed by a PostgreSQL connection pool
//!
//! The pool is created once at startup, pre-warmed to its full size, and
//! shared by every request. Each operation acquires its own connection; the
//! `PoolConnection` guard returns it to the pool when dropped.

use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::{Connection, PgPool};

use super::{classify_insert, DbError, InsertOutcome, RecordStore};
use crate::models::StudentRecord;

// BIGINT so both backends accept the full i64 range.
const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS student_record (
        roll_number BIGINT PRIMARY KEY,
        name TEXT NOT NULL
    )
"#;

/// PostgreSQL-backed record store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a pool of `max_connections` connections.
    ///
    /// A single connection is opened first so an unreachable server or bad
    /// credentials fail immediately with the driver's own error, rather than
    /// as a pool acquire timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connect`] if the server cannot be reached.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let connect_err = |source| DbError::Connect {
            backend: "postgres",
            source,
        };

        let first = PgConnection::connect(database_url).await.map_err(connect_err)?;
        if let Err(e) = first.close().await {
            tracing::warn!(error = %e, "failed to close initial postgres connection");
        }

        let pool = PgPoolOptions::new()
            .min_connections(max_connections)
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(connect_err)?;

        tracing::info!(max_connections, "PostgreSQL pool established");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn init(&self) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(CREATE_TABLE).execute(&mut *conn).await?;
        Ok(())
    }

    async fn insert(&self, record: &StudentRecord) -> Result<InsertOutcome, DbError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("INSERT INTO student_record (roll_number, name) VALUES ($1, $2)")
            .bind(record.roll_number)
            .bind(&record.name)
            .execute(&mut *conn)
            .await;
        classify_insert(result)
    }

    async fn find(&self, roll_number: i64) -> Result<Option<StudentRecord>, DbError> {
        let record = sqlx::query_as::<_, StudentRecord>(
            "SELECT roll_number, name FROM student_record WHERE roll_number = $1",
        )
        .bind(roll_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_record")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
