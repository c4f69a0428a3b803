//! HTTP surface.
//!
//! Axum router exposing the stats endpoint, the matchup table (HTML and
//! JSON) and the static public directory.

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use self::routes::{matchups, pages, players};
use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Method {0} Not Allowed")]
    MethodNotAllowed(Method),

    /// Data-access failure on the stats endpoint.
    #[error("{0}")]
    Database(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Body of a failed stats request.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::MethodNotAllowed(_) => {
                return (
                    StatusCode::METHOD_NOT_ALLOWED,
                    [(header::ALLOW, "GET")],
                    self.to_string(),
                )
                    .into_response();
            }
            ApiError::Database(message) => {
                let body = MessageResponse {
                    message: message.clone(),
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let public_dir = ServeDir::new(&state.slate.public_dir);

    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/nba", get(matchups::matchup_page))
        .route("/api/matchups", get(matchups::list_matchups))
        .route(
            "/api/players",
            get(players::list_players)
                .head(players::method_not_allowed)
                .fallback(players::method_not_allowed),
        )
        .fallback_service(public_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap `router` in a CORS layer for `origin` (`*` allows any origin).
pub fn with_cors(router: Router, origin: &str) -> Router {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                return router;
            }
        }
    };

    router.layer(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET]),
    )
}
