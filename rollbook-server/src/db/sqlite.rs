//! Embedded store backed by a SQLite file
//!
//! Holds only connect options. Each operation opens a fresh connection and
//! closes it before returning; SQLite's file locking serializes writers.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};

use super::{classify_insert, DbError, InsertOutcome, RecordStore};
use crate::models::StudentRecord;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS student_record (
        roll_number INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )
"#;

/// SQLite-backed record store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    options: SqliteConnectOptions,
}

impl SqliteStore {
    /// Prepare a store for the database file at `path`, creating the file if
    /// needed, and check that it can be opened.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        tracing::info!("Opening database at {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let store = Self { options };
        let conn = store.connection().await.map_err(|source| DbError::Connect {
            backend: "sqlite",
            source,
        })?;
        release(conn, Ok(())).await?;

        Ok(store)
    }

    async fn connection(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }
}

/// Close `conn`, then hand back the result of the work done on it.
///
/// A failed close is logged; the operation's own result wins.
async fn release<T>(
    conn: SqliteConnection,
    result: Result<T, sqlx::Error>,
) -> Result<T, sqlx::Error> {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "failed to close sqlite connection");
    }
    result
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn init(&self) -> Result<(), DbError> {
        let mut conn = self.connection().await?;
        let result = sqlx::query(CREATE_TABLE).execute(&mut conn).await;
        release(conn, result).await?;
        Ok(())
    }

    async fn insert(&self, record: &StudentRecord) -> Result<InsertOutcome, DbError> {
        let mut conn = self.connection().await?;
        let result = sqlx::query("INSERT INTO student_record (roll_number, name) VALUES (?, ?)")
            .bind(record.roll_number)
            .bind(&record.name)
            .execute(&mut conn)
            .await;
        classify_insert(release(conn, result).await)
    }

    async fn find(&self, roll_number: i64) -> Result<Option<StudentRecord>, DbError> {
        let mut conn = self.connection().await?;
        let result = sqlx::query_as::<_, StudentRecord>(
            "SELECT roll_number, name FROM student_record WHERE roll_number = ?",
        )
        .bind(roll_number)
        .fetch_optional(&mut conn)
        .await;
        Ok(release(conn, result).await?)
    }

    async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.connection().await?;
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_record")
            .fetch_one(&mut conn)
            .await;
        Ok(release(conn, result).await?)
    }

    async fn close(&self) {}
}
