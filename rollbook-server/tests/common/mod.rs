//! Shared fixtures for router and lifecycle tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use rollbook_server::{open_store, DbError, InsertOutcome, RecordStore, StoreConfig, StudentRecord};

/// A store whose inserts always fail with a non-constraint error.
#[derive(Default)]
pub struct FailingStore {
    pub inserts: AtomicUsize,
    pub closes: AtomicUsize,
}

#[async_trait]
impl RecordStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn init(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn insert(&self, _record: &StudentRecord) -> Result<InsertOutcome, DbError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn find(&self, _roll_number: i64) -> Result<Option<StudentRecord>, DbError> {
        Ok(None)
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(0)
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// A bootstrapped SQLite store in its own temp directory.
pub async fn sqlite_store() -> (tempfile::TempDir, Arc<dyn RecordStore>) {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::sqlite(Some(dir.path().join("students.db")));
    let store = open_store(&config).await.unwrap();
    (dir, store)
}

pub fn add_record(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/add_record")
        .header("origin", "http://example.com")
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn allow_origin(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
}
