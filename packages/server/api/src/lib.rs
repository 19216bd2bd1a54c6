//! HTTP service serving statistically ranked GitHub trending listings.

pub mod config;
pub mod handlers;
pub mod services;
pub mod state;

use axum::{http, Router};
use state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the router with its layers.
pub fn app(state: AppState) -> anyhow::Result<Router> {
    let mut router = handlers::router().layer(TraceLayer::new_for_http());

    if let Some(origin) = state.config.cors_origin.as_deref() {
        let cors = CorsLayer::new()
            .allow_origin(origin.parse::<http::HeaderValue>()?)
            .allow_methods([http::Method::GET])
            .allow_headers([http::header::ACCEPT, http::header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    Ok(router.with_state(state))
}
