//! Student record ingestion

use axum::{extract::State, routing::post, Json, Router};

use crate::db::InsertOutcome;
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{AddRecordResponse, StudentRecord};

/// POST /add_record - insert one record, rejecting a known roll number
async fn add_record(
    State(state): State<AppState>,
    ValidJson(record): ValidJson<StudentRecord>,
) -> Result<Json<AddRecordResponse>, ApiError> {
    match state.store().insert(&record).await? {
        InsertOutcome::Inserted => Ok(Json(AddRecordResponse::added())),
        InsertOutcome::Duplicate => {
            tracing::debug!(roll_number = record.roll_number, "duplicate roll number rejected");
            Err(ApiError::DuplicateRollNumber)
        }
    }
}

/// Record routes
pub fn router() -> Router<AppState> {
    Router::new().route("/add_record", post(add_record))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::db::{RecordStore, SqliteStore};

    async fn app() -> (tempfile::TempDir, Arc<SqliteStore>, Router) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SqliteStore::open(dir.path().join("students.db")).await.unwrap());
        store.init().await.unwrap();
        let app = router().with_state(AppState::new(store.clone()));
        (dir, store, app)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/add_record")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn adds_record() {
        let (_dir, store, app) = app().await;

        let response = app
            .oneshot(post_json(r#"{"roll_number": 101, "name": "Asha"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: AddRecordResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "success");
        assert_eq!(body.message, "Record added.");

        assert_eq!(
            store.find(101).await.unwrap(),
            Some(StudentRecord::new(101, "Asha"))
        );
    }

    #[tokio::test]
    async fn second_insert_is_conflict() {
        let (_dir, store, app) = app().await;

        let first = app
            .clone()
            .oneshot(post_json(r#"{"roll_number": 7, "name": "Asha"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(post_json(r#"{"roll_number": 7, "name": "Other"}"#))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);

        assert_eq!(store.find(7).await.unwrap().unwrap().name, "Asha");
    }

    #[tokio::test]
    async fn wrong_type_never_reaches_store() {
        let (_dir, store, app) = app().await;

        let response = app
            .oneshot(post_json(r#"{"roll_number": "not-a-number", "name": "X"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
