// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    docs,
    handlers::{health, tryout},
    state::AppState,
    utils::jwt::{auth_middleware, learner_middleware},
};

/// Assembles the main application router.
///
/// * Learner tryout routes behind authentication and the learner role check.
/// * Health and OpenAPI routes open.
/// * The whole API is mounted again under `api_base_path` when one is configured.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = match HeaderValue::from_str(&state.config.cors_origin) {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(e) => {
            tracing::warn!("Ignoring invalid CORS_ORIGIN {:?}: {}", state.config.cors_origin, e);
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let tryout_routes = Router::new()
        .route("/", get(tryout::list_tryouts))
        .route("/{id}", get(tryout::get_tryout))
        .route("/{id}/submit", post(tryout::submit_tryout))
        .route("/{id}/dashboard", get(tryout::get_dashboard))
        .route("/{id}/hasil/{attempt_id}", get(tryout::get_attempt))
        // Auth first, then the role check
        .layer(middleware::from_fn(learner_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/api/user/tryout", tryout_routes)
        .route("/api/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    let base_path = state.config.api_base_path.clone();
    let api = if base_path.is_empty() {
        api
    } else {
        api.clone().nest(&base_path, api)
    };

    api.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
    .with_state(state)
}
