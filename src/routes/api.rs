use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::AppError,
    models::{campground::LocationCampgrounds, custom_trip::CustomTrip},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/custom-trips/:id", get(custom_trip))
        .route("/locations/:id/campgrounds", get(location_campgrounds))
}

async fn custom_trip(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<CustomTrip>, AppError> {
    let id: i64 = raw_id.parse().map_err(|_| AppError::NotFound)?;
    let trip = state
        .storage
        .load_custom_trip(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(trip))
}

/// Unknown locations answer with empty lists rather than 404.
async fn location_campgrounds(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> Json<LocationCampgrounds> {
    Json(state.catalog.campgrounds_by_location(&location_id).clone())
}
