//! Router tests that need no database.
//!
//! Every request here is answered before the first query, so the app runs
//! against a pool that never connects.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{
    create_offline_app, get_request, json_request, parse_response_body, test_config,
    test_issuer,
};
use serde_json::json;
use shared::jwt::SessionTokenIssuer;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = create_offline_app(test_config());

    let response = app
        .oneshot(get_request("/api/health/live", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = create_offline_app(test_config());

    let mut request = get_request("/api/health/live", None);
    request
        .headers_mut()
        .insert("x-request-id", "trace-me-123".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-request-id").unwrap(), "trace-me-123");
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
}

#[tokio::test]
async fn test_get_settings_without_session_is_unauthorized() {
    let app = create_offline_app(test_config());

    let response = app
        .oneshot(get_request("/api/v1/coach/settings", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn test_update_settings_without_session_is_unauthorized() {
    let app = create_offline_app(test_config());

    let request = json_request(
        Method::PUT,
        "/api/v1/coach/settings",
        json!({ "inviteSlug": "ab", "brandColor": "red" }),
        None,
    );
    let response = app.oneshot(request).await.unwrap();

    // Authentication is checked before slug or color validation.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_update_settings_with_malformed_body_and_no_session_is_unauthorized() {
    let app = create_offline_app(test_config());

    let request = axum::http::Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/coach/settings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = create_offline_app(test_config());

    let response = app
        .oneshot(get_request("/api/v1/coach/settings", Some("not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_unauthorized() {
    let app = create_offline_app(test_config());
    let foreign = SessionTokenIssuer::from_secret("someone-elses-secret", 3600);
    let (token, _) = foreign.issue(Uuid::new_v4()).unwrap();

    let response = app
        .oneshot(get_request("/api/v1/coach/settings", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_without_user_id_is_unauthorized() {
    let (token, _) = test_issuer(3600).issue_for_subject("").unwrap();
    let app = create_offline_app(test_config());

    let request = json_request(
        Method::PUT,
        "/api/v1/coach/settings",
        json!({ "brandName": "FitPro" }),
        Some(&token),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (token, _) = test_issuer(-3600).issue(Uuid::new_v4()).unwrap();
    let app = create_offline_app(test_config());

    let response = app
        .oneshot(get_request("/api/v1/coach/settings", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lookup_requires_slug() {
    let app = create_offline_app(test_config());

    let response = app
        .oneshot(get_request("/api/v1/coach/lookup-slug", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Slug required");
}

#[tokio::test]
async fn test_lookup_rejects_blank_slug() {
    let app = create_offline_app(test_config());

    for uri in [
        "/api/v1/coach/lookup-slug?slug=",
        "/api/v1/coach/lookup-slug?slug=%20%20",
    ] {
        let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

fn lookup_from(forwarded_for: &str) -> axum::http::Request<axum::body::Body> {
    let mut request = get_request("/api/v1/coach/lookup-slug", None);
    request
        .headers_mut()
        .insert("x-forwarded-for", forwarded_for.parse().unwrap());
    request
}

#[tokio::test]
async fn test_lookup_quota_ignores_untrusted_forwarded_for() {
    let mut config = test_config();
    config.security.lookup_rate_limit_per_minute = 1;
    let app = create_offline_app(config);

    let first = app.clone().oneshot(lookup_from("203.0.113.9")).await.unwrap();
    assert_eq!(first.status(), StatusCode::BAD_REQUEST);

    // Rotating the header does not buy a fresh quota.
    for i in 1..20 {
        let spoofed = format!("198.51.100.{}", i);
        let response = app.clone().oneshot(lookup_from(&spoofed)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS, "{}", spoofed);
    }
}

#[tokio::test]
async fn test_lookup_is_rate_limited_per_client() {
    let mut config = test_config();
    config.security.lookup_rate_limit_per_minute = 1;
    config.security.trust_forwarded_for = true;
    let app = create_offline_app(config);

    let first = app.clone().oneshot(lookup_from("203.0.113.9")).await.unwrap();
    assert_eq!(first.status(), StatusCode::BAD_REQUEST);

    let second = app.clone().oneshot(lookup_from("203.0.113.9")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(second.headers().contains_key(header::RETRY_AFTER));
    let body = parse_response_body(second).await;
    assert_eq!(body["code"], "rate_limited");

    let other_client = app.oneshot(lookup_from("198.51.100.4")).await.unwrap();
    assert_eq!(other_client.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_routes_are_not_rate_limited() {
    let mut config = test_config();
    config.security.lookup_rate_limit_per_minute = 1;
    let app = create_offline_app(config);

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(get_request("/api/v1/coach/settings", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_offline_app(test_config());

    let response = app
        .oneshot(get_request("/api/v1/coach/unknown", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
