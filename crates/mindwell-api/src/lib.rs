//! mindwell-api
//!
//! HTTP binding of the check-in, assessment and mood features, served from
//! AWS Lambda. Handlers stay thin: decode, call the core crates, persist
//! through the configured document store.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/assessments/pool", get(routes::assessments::get_pool))
        .route(
            "/assessments",
            get(routes::assessments::list_assessments).post(routes::assessments::create_assessment),
        )
        .route("/daily/opening", get(routes::daily::get_opening))
        .route("/daily/session", post(routes::daily::advance_session))
        .route("/moods", post(routes::moods::create_mood))
        .route("/stats", get(routes::stats::get_stats))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_user,
        ));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Instruments (no auth, public schema data)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route("/instruments/{id}", get(routes::instruments::get_instrument_detail))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
