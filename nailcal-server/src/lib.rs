//! HTTP surface for the nailcal booking system.

pub mod routes;
pub mod settings;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::bookings::router())
        .merge(routes::clients::router())
        .merge(routes::procedures::router())
        .merge(routes::feed::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
