//! Central module for organizing the application's HTTP API.
//!
//! This module owns the top-level router: the account endpoints nested under
//! `/user`, the service banner and the health check, plus the layers applied
//! to every request.

pub mod common;
pub mod user;

use crate::api::common::ApiResponse;
use crate::config::Config;
use axum::{Extension, Router, http::StatusCode, response::Json, routing::get};
use sqlx::SqlitePool;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Builds the application router with its shared extensions.
///
/// Layer order (bottom-to-top execution):
/// 1. TimeoutLayer - bounds each request at the network boundary
/// 2. TraceLayer - logs request details
pub fn build_router(pool: SqlitePool, config: Config) -> Router {
    let request_timeout = Duration::from_secs(config.request_timeout_seconds);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .nest("/user", user::routes::user_router())
        .layer(Extension(pool))
        .layer(Extension(config))
        .layer(request_timeout_layer(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Answers `408 Request Timeout` once a request runs past `timeout`.
fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Auth Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the Auth API",
    ))
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use axum::{
        body::{Body, Bytes},
        http::Request,
    };
    use http_body_util::BodyExt;
    use std::collections::HashMap;
    use tower::ServiceExt;

    async fn get_request(uri: &str) -> (StatusCode, Bytes) {
        let app = build_router(test_pool().await, Config::from_vars(&HashMap::new()).unwrap());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, response.into_body().collect().await.unwrap().to_bytes())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_request("/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (status, body) = get_request("/").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["service"], "Auth Backend");
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(request_timeout_layer(Duration::from_millis(50)));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = get_request("/user/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
