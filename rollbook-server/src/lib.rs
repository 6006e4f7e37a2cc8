//! rollbook-server: HTTP service for student record ingestion
//!
//! Accepts `{roll_number, name}` records over HTTP and inserts them into a
//! `student_record` table, rejecting duplicate roll numbers. The table lives
//! either in an embedded SQLite file or on a PostgreSQL server behind a
//! connection pool; both behave identically over HTTP.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, StoreConfig};
pub use db::{open_store, DbError, InsertOutcome, RecordStore};
pub use http::{
    build_router, run_server, run_server_with_shutdown, AppState, ServerConfig, ServerError,
};
pub use models::StudentRecord;
