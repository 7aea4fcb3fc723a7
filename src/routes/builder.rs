use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::AppError,
    models::{
        campground::{AccommodationFilter, FALLBACK_IMAGE},
        custom_trip::NightsAtLocation,
    },
    services::{
        builder::{BuildError, TripDraft, MAX_TRIP_LENGTH, MIN_TRIP_LENGTH},
        storage::StorageService,
    },
    session::DraftSession,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(builder_page))
        .route("/region", post(region_submit))
        .route("/details", post(details_submit))
        .route("/campgrounds", post(campgrounds_submit))
        .route("/campgrounds/toggle", post(campground_toggle))
        .route("/back", post(step_back))
        .route("/reset", post(reset))
        .route("/create", post(create_trip))
        .route("/result/:id", get(result_page))
}

async fn builder_page(
    State(state): State<AppState>,
    mut session: DraftSession,
) -> Result<Response, AppError> {
    session.draft.normalize(&state.catalog);
    render_step(&state, &session.draft, None)
}

#[derive(Deserialize)]
struct RegionForm {
    region: String,
}

async fn region_submit(
    State(state): State<AppState>,
    mut session: DraftSession,
    Form(form): Form<RegionForm>,
) -> Result<Response, AppError> {
    let outcome = session.draft.select_region(&state.catalog, &form.region);
    respond(&state, session, outcome)
}

#[derive(Deserialize)]
struct DetailsForm {
    trip_length: Option<String>,
    accommodation: Option<String>,
    #[serde(default)]
    location: Vec<String>,
    action: Option<String>,
}

async fn details_submit(
    State(state): State<AppState>,
    mut session: DraftSession,
    Form(form): Form<DetailsForm>,
) -> Result<Response, AppError> {
    let draft = &mut session.draft;
    if let Some(days) = form.trip_length.as_deref().and_then(parse_trip_length) {
        draft.set_trip_length(days);
    }
    draft.set_accommodation(AccommodationFilter::parse(form.accommodation.as_deref()));
    let outcome = draft
        .set_locations(&state.catalog, &form.location)
        .and_then(|()| navigate(draft, form.action.as_deref()));
    respond(&state, session, outcome)
}

#[derive(Deserialize)]
struct ToggleForm {
    campground: String,
}

async fn campground_toggle(
    State(state): State<AppState>,
    mut session: DraftSession,
    Form(form): Form<ToggleForm>,
) -> Result<Response, AppError> {
    let outcome = session
        .draft
        .toggle_campground(&state.catalog, &form.campground);
    respond(&state, session, outcome)
}

#[derive(Deserialize)]
struct NavigationForm {
    action: Option<String>,
}

async fn campgrounds_submit(
    State(state): State<AppState>,
    mut session: DraftSession,
    Form(form): Form<NavigationForm>,
) -> Result<Response, AppError> {
    let outcome = navigate(&mut session.draft, form.action.as_deref());
    respond(&state, session, outcome)
}

async fn step_back(
    State(state): State<AppState>,
    mut session: DraftSession,
) -> Result<Response, AppError> {
    session.draft.back();
    respond(&state, session, Ok(()))
}

async fn reset(session: DraftSession) -> impl IntoResponse {
    (session.clear(), Redirect::to("/build-trip"))
}

async fn create_trip(
    State(state): State<AppState>,
    session: DraftSession,
) -> Result<Response, AppError> {
    let id = StorageService::next_trip_id(Utc::now());
    let trip = match session.draft.build(&state.catalog, id) {
        Ok(trip) => trip,
        Err(err) => {
            warn!("custom trip rejected: {err}");
            return respond(&state, session, Err(err));
        }
    };
    let saved = state.storage.save_custom_trip(trip).await?;
    info!(trip_id = saved.id, region = %saved.region, "custom trip created");
    Ok((
        session.clear(),
        Redirect::to(&format!("/build-trip/result/{}", saved.id)),
    )
        .into_response())
}

/// Any integer is accepted and later clamped; anything else keeps the current length.
fn parse_trip_length(raw: &str) -> Option<u32> {
    let days: i64 = raw.trim().parse().ok()?;
    Some(u32::try_from(days.max(0)).unwrap_or(u32::MAX))
}

fn navigate(draft: &mut TripDraft, action: Option<&str>) -> Result<(), BuildError> {
    match action {
        Some("back") => {
            draft.back();
            Ok(())
        }
        _ => draft.advance(),
    }
}

/// Saves the draft and either moves on or shows the same step again with the error.
fn respond(
    state: &AppState,
    mut session: DraftSession,
    outcome: Result<(), BuildError>,
) -> Result<Response, AppError> {
    session.draft.normalize(&state.catalog);
    let draft = session.draft.clone();
    let jar = session.persist()?;
    match outcome {
        Ok(()) => Ok((jar, Redirect::to("/build-trip")).into_response()),
        Err(err) => {
            let page = render_step(state, &draft, Some(err.to_string()))?;
            Ok((StatusCode::BAD_REQUEST, jar, page).into_response())
        }
    }
}

struct RegionCard {
    id: String,
    name: String,
    image: String,
    destination_count: usize,
    selected: bool,
}

#[derive(Template)]
#[template(path = "build/region.html")]
struct RegionStepTemplate {
    step: u8,
    has_error: bool,
    error_message: String,
    regions: Vec<RegionCard>,
}

struct LocationOption {
    id: String,
    name: String,
    checked: bool,
}

#[derive(Template)]
#[template(path = "build/details.html")]
struct DetailsStepTemplate {
    step: u8,
    has_error: bool,
    error_message: String,
    region_name: String,
    trip_length: u32,
    min_length: u32,
    max_length: u32,
    accommodation: &'static str,
    locations: Vec<LocationOption>,
}

struct BuilderCard {
    id: String,
    title: String,
    city_and_state: String,
    offerings: String,
    estimated_price: String,
    image: String,
    kind_label: &'static str,
    selected: bool,
}

struct BuilderSection {
    name: String,
    cards: Vec<BuilderCard>,
}

#[derive(Template)]
#[template(path = "build/campgrounds.html")]
struct CampgroundsStepTemplate {
    step: u8,
    has_error: bool,
    error_message: String,
    sections: Vec<BuilderSection>,
    selected_count: usize,
}

#[derive(Template)]
#[template(path = "build/review.html")]
struct ReviewStepTemplate {
    step: u8,
    has_error: bool,
    error_message: String,
    region_name: String,
    trip_length: u32,
    destinations: Vec<String>,
    picks: Vec<String>,
}

fn render_step(
    state: &AppState,
    draft: &TripDraft,
    error: Option<String>,
) -> Result<Response, AppError> {
    let catalog = &state.catalog;
    let has_error = error.is_some();
    let error_message = error.unwrap_or_default();
    let region = draft.region(catalog);
    let region_name = region
        .as_ref()
        .map(|region| region.name.clone())
        .unwrap_or_default();

    let page = match draft.step {
        2 => {
            let locations = region
                .map(|region| region.locations)
                .unwrap_or_default()
                .into_iter()
                .map(|loc| LocationOption {
                    checked: draft.locations.contains(&loc.id),
                    id: loc.id,
                    name: loc.name,
                })
                .collect();
            AskamaTemplateResponse::into_response(DetailsStepTemplate {
                step: draft.step,
                has_error,
                error_message,
                region_name,
                trip_length: draft.trip_length,
                min_length: MIN_TRIP_LENGTH,
                max_length: MAX_TRIP_LENGTH,
                accommodation: draft.accommodation.as_str(),
                locations,
            })
        }
        3 => {
            let entries = catalog.available_campgrounds(&draft.locations, draft.accommodation);
            let sections = draft
                .locations
                .iter()
                .map(|location_id| BuilderSection {
                    name: catalog
                        .location_name(location_id)
                        .unwrap_or(location_id)
                        .to_string(),
                    cards: entries
                        .iter()
                        .filter(|entry| entry.location_id == *location_id)
                        .map(|entry| {
                            let id = entry.id.to_string();
                            BuilderCard {
                                selected: draft.is_selected(&id),
                                id,
                                title: entry.campground.title.clone(),
                                city_and_state: entry.campground.city_and_state.clone(),
                                offerings: entry.campground.offerings.clone(),
                                estimated_price: entry.campground.estimated_price.clone(),
                                image: entry.campground.cover_image().to_string(),
                                kind_label: entry.kind.label(),
                            }
                        })
                        .collect(),
                })
                .collect();
            AskamaTemplateResponse::into_response(CampgroundsStepTemplate {
                step: draft.step,
                has_error,
                error_message,
                sections,
                selected_count: draft.campgrounds.len(),
            })
        }
        4 => {
            let destinations = draft
                .locations
                .iter()
                .map(|id| catalog.location_name(id).unwrap_or(id).to_string())
                .collect();
            let picks = draft
                .campgrounds
                .iter()
                .filter_map(|id| catalog.entry(id))
                .map(|entry| format!("{} ({})", entry.campground.title, entry.location_name))
                .collect();
            AskamaTemplateResponse::into_response(ReviewStepTemplate {
                step: draft.step,
                has_error,
                error_message,
                region_name,
                trip_length: draft.trip_length,
                destinations,
                picks,
            })
        }
        _ => {
            let regions = catalog
                .regions()
                .into_iter()
                .map(|region| RegionCard {
                    selected: draft.region.as_deref() == Some(region.id.as_str()),
                    destination_count: region.locations.len(),
                    id: region.id,
                    name: region.name,
                    image: region.image,
                })
                .collect();
            AskamaTemplateResponse::into_response(RegionStepTemplate {
                step: 1,
                has_error,
                error_message,
                regions,
            })
        }
    };
    Ok(page)
}

struct ResultCampground {
    title: String,
    image: String,
    kind_label: &'static str,
}

struct ResultStop {
    number: usize,
    name: String,
    nights: u32,
    campgrounds: Vec<ResultCampground>,
}

#[derive(Template)]
#[template(path = "build/result.html")]
struct ResultTemplate {
    trip_id: String,
    created_label: String,
    trip_length: u32,
    location_count: usize,
    campground_count: usize,
    destinations: Vec<String>,
    route: String,
    nights: Vec<NightsAtLocation>,
    stops: Vec<ResultStop>,
}

#[derive(Template)]
#[template(path = "build/not_found.html")]
struct TripNotFoundTemplate;

async fn result_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let trip = match raw_id.parse::<i64>() {
        Ok(id) => state.storage.load_custom_trip(id).await?,
        Err(_) => None,
    };
    let Some(trip) = trip else {
        return Ok((
            StatusCode::NOT_FOUND,
            AskamaTemplateResponse::into_response(TripNotFoundTemplate),
        )
            .into_response());
    };

    let nights = trip.nights_per_location();
    let stops = trip
        .locations
        .iter()
        .enumerate()
        .map(|(index, location)| ResultStop {
            number: index + 1,
            name: location.name.clone(),
            nights: nights.get(index).map(|n| n.nights).unwrap_or_default(),
            campgrounds: trip
                .campgrounds_at(&location.name)
                .into_iter()
                .map(|c| ResultCampground {
                    title: c.title.clone(),
                    image: if c.image_url.is_empty() {
                        FALLBACK_IMAGE.to_string()
                    } else {
                        c.image_url.clone()
                    },
                    kind_label: c.kind.label(),
                })
                .collect(),
        })
        .collect();

    Ok(AskamaTemplateResponse::into_response(ResultTemplate {
        trip_id: trip.id.to_string(),
        created_label: trip
            .created_at()
            .map(|created| created.format("%B %-d, %Y").to_string())
            .unwrap_or_default(),
        trip_length: trip.trip_length,
        location_count: trip.locations.len(),
        campground_count: trip.campgrounds.len(),
        destinations: trip.locations.iter().map(|loc| loc.name.clone()).collect(),
        route: trip.optimal_route(),
        nights,
        stops,
    }))
}
