pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::verification::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public verification
        .route("/api/v1/verify", post(handlers::handle_verify_body))
        .route("/api/v1/verify/:reference_id", get(handlers::handle_verify))
        // Reference tooling
        .route("/api/v1/reference/validate", post(handlers::handle_validate))
        .route("/api/v1/reference/types", get(handlers::handle_list_types))
        .route(
            "/api/v1/reference/types/:doc_type",
            get(handlers::handle_get_type),
        )
        .route("/api/v1/reference/stats", get(handlers::handle_stats))
        // Issuance
        .route("/api/v1/documents", post(handlers::handle_issue))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{Config, StoreBackend};
    use crate::verification::stats::StatsCache;
    use crate::verification::InMemoryDocumentStore;

    fn app() -> Router {
        build_router(AppState {
            store: Arc::new(InMemoryDocumentStore::new()),
            stats_cache: Arc::new(StatsCache::new(Duration::from_secs(60))),
            config: Config {
                store_backend: StoreBackend::Memory,
                database_url: None,
                port: 0,
                rust_log: "info".to_string(),
                stats_cache_ttl_secs: 60,
            },
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_issue_then_verify_over_http() {
        let app = app();
        let (status, issued) = send(
            &app,
            post_json(
                "/api/v1/documents",
                json!({"documentType": "CERT", "userName": "Jane Doe", "title": "Negotiation"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let reference = issued["referenceId"].as_str().unwrap().to_lowercase();

        let (status, body) = send(&app, get(&format!("/api/v1/verify/{reference}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["userName"], "Jane Doe");
        assert_eq!(body["data"]["verified"], true);
    }

    #[tokio::test]
    async fn test_verify_malformed_returns_not_found_payload() {
        let (status, body) = send(&app(), get("/api/v1/verify/not-an-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["formattedId"], "NOT-AN-ID");
        assert!(body["message"].as_str().unwrap().contains("TYPE-YEAR-CODE"));
    }

    #[tokio::test]
    async fn test_verify_body_without_reference_is_bad_request() {
        let (status, body) = send(&app(), post_json("/api/v1/verify", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Reference ID is required");
    }

    #[tokio::test]
    async fn test_validate_endpoint() {
        let (status, body) = send(
            &app(),
            post_json("/api/v1/reference/validate", json!({"referenceId": "cert-2024-a1b2c3"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["type"], "CERT");
        assert_eq!(body["shortId"], "CERT-***C3");
        assert_eq!(body["formattedId"], "CERT-2024-A1B2C3");
    }

    #[tokio::test]
    async fn test_types_endpoint_lists_registry() {
        let (status, body) = send(&app(), get("/api/v1/reference/types")).await;
        assert_eq!(status, StatusCode::OK);
        let types = body.as_array().unwrap();
        assert_eq!(types.len(), 7);
        assert_eq!(types[0]["type"], "EXEC");
        assert_eq!(types[0]["modelName"], "members");
    }

    #[tokio::test]
    async fn test_type_lookup_accepts_tag_or_slug() {
        let app = app();
        for name in ["PERF", "perf", "performance-profile"] {
            let (status, body) =
                send(&app, get(&format!("/api/v1/reference/types/{name}"))).await;
            assert_eq!(status, StatusCode::OK, "{name}");
            assert_eq!(body["type"], "PERF");
            assert_eq!(body["fieldName"], "profile_ref");
        }

        let (status, body) = send(&app, get("/api/v1/reference/types/diploma")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("diploma"));
    }

    #[tokio::test]
    async fn test_issue_with_lowercase_custom_code_verifies() {
        let app = app();
        let (status, issued) = send(
            &app,
            post_json(
                "/api/v1/documents",
                json!({
                    "documentType": "CERT",
                    "userName": "Jane Doe",
                    "title": "Negotiation",
                    "customCode": "k3n8p1"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let reference = issued["referenceId"].as_str().unwrap();
        assert!(reference.ends_with("-K3N8P1"));

        let (status, body) = send(&app, get(&format!("/api/v1/verify/{reference}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["referenceId"], reference);
    }

    #[tokio::test]
    async fn test_issue_rejects_malformed_custom_code() {
        let (status, body) = send(
            &app(),
            post_json(
                "/api/v1/documents",
                json!({
                    "documentType": "CERT",
                    "userName": "Jane Doe",
                    "title": "Negotiation",
                    "customCode": "no spaces"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_stats_reflect_issuance() {
        let app = app();
        let (_, before) = send(&app, get("/api/v1/reference/stats")).await;
        assert_eq!(before["total"], 0);

        send(
            &app,
            post_json(
                "/api/v1/documents",
                json!({"documentType": "SIM", "userName": "Jane Doe", "title": "Mock Interview"}),
            ),
        )
        .await;

        let (_, after) = send(&app, get("/api/v1/reference/stats")).await;
        assert_eq!(after["total"], 1);
    }

    #[tokio::test]
    async fn test_issue_rejects_blank_title() {
        let (status, body) = send(
            &app(),
            post_json(
                "/api/v1/documents",
                json!({"documentType": "REC", "userName": "Jane Doe", "title": " "}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
