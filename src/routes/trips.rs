use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{
        campground::{Accommodation, AccommodationFilter, Campground, CampgroundId},
        trip::{RouteInfo, Trip},
    },
    state::AppState,
};

const TABS: [&str; 4] = ["campgrounds", "route", "activities", "restaurants"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(trips_list))
        .route("/trips/:id", get(trip_detail))
        .route("/campgrounds/:id", get(campground_detail))
}

#[derive(Template)]
#[template(path = "trips/list.html")]
struct TripsListTemplate {
    trips: Vec<Trip>,
}

async fn trips_list(State(state): State<AppState>) -> impl IntoResponse {
    AskamaTemplateResponse::into_response(TripsListTemplate {
        trips: state.catalog.trips().to_vec(),
    })
}

#[derive(Deserialize)]
struct TripQuery {
    tab: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Clone)]
struct CampgroundCard {
    id: String,
    campground: Campground,
}

struct LocationSection {
    name: String,
    tent: Vec<CampgroundCard>,
    lodging: Vec<CampgroundCard>,
    show_tent: bool,
    show_lodging: bool,
}

#[derive(Template)]
#[template(path = "trips/detail.html")]
struct TripDetailTemplate {
    trip: Trip,
    tab: String,
    filter: &'static str,
    sections: Vec<LocationSection>,
    has_route: bool,
    route: RouteInfo,
}

async fn trip_detail(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Query(query): Query<TripQuery>,
) -> Result<impl IntoResponse, AppError> {
    let trip = state
        .catalog
        .trip(&trip_id)
        .cloned()
        .ok_or(AppError::NotFound)?;
    let filter = AccommodationFilter::parse(query.kind.as_deref());
    let tab = query
        .tab
        .filter(|tab| TABS.contains(&tab.as_str()))
        .unwrap_or_else(|| TABS[0].to_string());

    let sections = trip
        .locations
        .iter()
        .map(|location| {
            let data = state.catalog.campgrounds_by_location(&location.id);
            let cards = |kind: Accommodation| -> Vec<CampgroundCard> {
                data.of_kind(kind)
                    .iter()
                    .enumerate()
                    .map(|(index, campground)| CampgroundCard {
                        id: CampgroundId::new(location.id.as_str(), kind, index).to_string(),
                        campground: campground.clone(),
                    })
                    .collect()
            };
            let tent = cards(Accommodation::Tent);
            let lodging = cards(Accommodation::Lodging);
            LocationSection {
                name: location.name.clone(),
                show_tent: filter.includes(Accommodation::Tent) && !tent.is_empty(),
                show_lodging: filter.includes(Accommodation::Lodging) && !lodging.is_empty(),
                tent,
                lodging,
            }
        })
        .collect();

    let (has_route, route) = match trip.route.clone() {
        Some(route) => (true, route),
        None => (false, RouteInfo::default()),
    };

    Ok(AskamaTemplateResponse::into_response(TripDetailTemplate {
        trip,
        tab,
        filter: filter.as_str(),
        sections,
        has_route,
        route,
    }))
}

#[derive(Template)]
#[template(path = "campgrounds/detail.html")]
struct CampgroundDetailTemplate {
    campground: Campground,
    location_name: String,
    kind_label: &'static str,
    has_trip: bool,
    trip_id: String,
    trip_title: String,
}

async fn campground_detail(
    State(state): State<AppState>,
    Path(campground_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state
        .catalog
        .entry(&campground_id)
        .ok_or(AppError::NotFound)?;
    let trip = state
        .catalog
        .trips()
        .iter()
        .find(|trip| trip.has_location(&entry.location_id));
    let (trip_id, trip_title) = trip
        .map(|trip| (trip.id.clone(), trip.title.clone()))
        .unwrap_or_default();
    Ok(AskamaTemplateResponse::into_response(
        CampgroundDetailTemplate {
            kind_label: entry.kind.label(),
            location_name: entry.location_name,
            campground: entry.campground,
            has_trip: trip.is_some(),
            trip_id,
            trip_title,
        },
    ))
}
