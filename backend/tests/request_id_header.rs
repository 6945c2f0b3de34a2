use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension,
};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use workdays_backend::{
    config::Config,
    middleware::request_id::{request_id, RequestId},
    routes,
    services::holiday::StaticHolidayProvider,
    state::AppState,
};

fn echo_app() -> axum::Router {
    axum::Router::new()
        .route(
            "/test",
            axum::routing::get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(axum::middleware::from_fn(request_id))
}

#[tokio::test]
async fn generated_request_id_is_a_uuid() {
    let response = echo_app()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn client_request_id_is_echoed_and_exposed_to_handlers() {
    let response = echo_app()
        .oneshot(
            Request::builder()
                .uri("/test")
                .header("x-request-id", "client-req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "client-req-123");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"client-req-123");
}

#[tokio::test]
async fn correlation_id_is_used_when_request_id_is_absent() {
    let response = echo_app()
        .oneshot(
            Request::builder()
                .uri("/test")
                .header("x-correlation-id", "corr-req-456")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "corr-req-456");
}

#[tokio::test]
async fn api_error_responses_carry_a_request_id() {
    let app = routes::router(AppState::new(
        Config::default(),
        Arc::new(StaticHolidayProvider::default()),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/business-date")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key("x-request-id"));
}
