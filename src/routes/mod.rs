pub mod api;
pub mod builder;
pub mod public;
pub mod trips;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{error::AppError, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let static_root = state.config.static_root.clone();
    Router::new()
        .merge(public::router())
        .merge(trips::router())
        .nest("/build-trip", builder::router())
        .nest("/api", api::router())
        .nest_service("/static", ServeDir::new(static_root))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
