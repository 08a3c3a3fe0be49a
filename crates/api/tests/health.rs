//! Integration tests for the health check endpoint and app-level wiring.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

/// GET /health returns 200 with status, version, and database health.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["db_healthy"], true);
}

/// The health check lives at root level, not under /api.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_not_under_api(pool: PgPool) {
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let response = get(app, "/api/health").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// An unregistered path falls through to a plain 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let response = get(app, "/api/no-such-resource").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Every response carries the security header set.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_security_headers_present(pool: PgPool) {
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let response = get(app, "/health").await;

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("strict-transport-security"));
    assert!(headers.contains_key("referrer-policy"));
}

/// Responses carry a request id for log correlation.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_id_propagated(pool: PgPool) {
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let response = get(app, "/health").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header");
    assert!(!id.to_str().unwrap().is_empty());
}
