use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{docs::ApiDoc, handlers, middleware, state::AppState};

/// Public API routes with the shared layers applied.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allow_origins);

    Router::new()
        .route("/api/business-date", get(handlers::get_business_date))
        .route("/api/ping", get(handlers::ping))
        .route("/api/holidays", get(handlers::list_holidays))
        .route("/api/config/calendar", get(handlers::get_calendar))
        .merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::log_error_responses))
                .layer(CatchPanicLayer::custom(middleware::panic_response))
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(24 * 60 * 60));

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}
