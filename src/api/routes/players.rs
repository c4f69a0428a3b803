use axum::extract::State;
use axum::http::Method;
use axum::Json;
use tracing::{error, info};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::FinalTableRecord;
use crate::store::fetch_all_records;

/// Every document in the configured collection, unfiltered.
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<FinalTableRecord>>, ApiError> {
    match fetch_all_records(state.store.as_ref(), &state.collection).await {
        Ok(records) => {
            info!("Served {} records from {}", records.len(), state.collection);
            Ok(Json(records))
        }
        Err(e) => {
            error!("Failed to load {}: {}", state.collection, e);
            Err(ApiError::Database(e.to_string()))
        }
    }
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::config::SlateConfig;
    use crate::models::FinalTableRecord;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn setup_test_state(store: Arc<MemoryStore>) -> AppState {
        AppState {
            store,
            collection: "final_table".to_string(),
            slate: Arc::new(SlateConfig::default()),
        }
    }

    fn record(value: Value) -> FinalTableRecord {
        serde_json::from_value(value).unwrap()
    }

    async fn send(app: axum::Router, method: &str, uri: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    }

    #[tokio::test]
    async fn test_get_returns_every_record() {
        let store = Arc::new(MemoryStore::new(vec![
            record(json!({"_id": "65a1f0c2e4b0a1b2c3d4e5f6", "player": "Jalen Brunson"})),
            record(json!({"player": "Donovan Mitchell", "PTS": 3.1})),
            record(json!({})),
        ]));
        let app = build_router(setup_test_state(store.clone()));

        let resp = send(app, "GET", "/api/players").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1]["player"], "Donovan Mitchell");
        assert_eq!(store.opened(), 1);
        assert_eq!(store.closed(), 1);
    }

    #[tokio::test]
    async fn test_get_empty_collection() {
        let store = Arc::new(MemoryStore::new(vec![]));
        let app = build_router(setup_test_state(store));

        let resp = send(app, "GET", "/api/players").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn test_non_get_methods_are_rejected() {
        for method in ["HEAD", "POST", "PUT", "PATCH", "DELETE"] {
            let store = Arc::new(MemoryStore::new(vec![record(json!({"a": 1}))]));
            let app = build_router(setup_test_state(store.clone()));

            let resp = send(app, method, "/api/players").await;

            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);
            assert_eq!(resp.headers()[header::ALLOW], "GET");
            assert_eq!(store.opened(), 0);
            if method == "HEAD" {
                continue;
            }
            let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(body, format!("Method {} Not Allowed", method).as_bytes());
        }
    }

    #[tokio::test]
    async fn test_query_failure_returns_500_and_closes() {
        let store = Arc::new(MemoryStore::new(vec![]).failing_query("cursor not found"));
        let app = build_router(setup_test_state(store.clone()));

        let resp = send(app, "GET", "/api/players").await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({"message": "cursor not found"}));
        assert_eq!(store.opened(), 1);
        assert_eq!(store.closed(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_returns_500() {
        let store = Arc::new(MemoryStore::new(vec![]).failing_connect("connection refused"));
        let app = build_router(setup_test_state(store));

        let resp = send(app, "GET", "/api/players").await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["message"], "connection refused");
    }
}
