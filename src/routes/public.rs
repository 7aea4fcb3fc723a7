use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{extract::State, response::IntoResponse, routing::get, Router};

use crate::{models::trip::Trip, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/about", get(about))
}

#[derive(Template)]
#[template(path = "landing.html")]
struct LandingTemplate {
    featured: Vec<Trip>,
}

async fn landing(State(state): State<AppState>) -> impl IntoResponse {
    let featured = state
        .catalog
        .featured_trips()
        .into_iter()
        .cloned()
        .collect();
    AskamaTemplateResponse::into_response(LandingTemplate { featured })
}

#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {
    team: Vec<TeamMember>,
    vetting_steps: Vec<VettingStep>,
}

struct TeamMember {
    name: &'static str,
    role: &'static str,
    photo: &'static str,
    bio: &'static str,
}

struct VettingStep {
    title: &'static str,
    body: &'static str,
}

async fn about() -> impl IntoResponse {
    AskamaTemplateResponse::into_response(AboutTemplate {
        team: vec![
            TeamMember {
                name: "Alex Thompson",
                role: "Founder & Lead Explorer",
                photo: "https://images.unsplash.com/photo-1560250097-0b93528c311a?ixlib=rb-4.0.3&auto=format&fit=crop&w=687&q=80",
                bio: "With over 15 years of camping experience across 40 states, Alex founded Caravan Trip Plan to share his passion for outdoor adventure.",
            },
            TeamMember {
                name: "Maya Rodriguez",
                role: "Route Planner & Content Creator",
                photo: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?ixlib=rb-4.0.3&auto=format&fit=crop&w=688&q=80",
                bio: "A former travel blogger with a knack for finding hidden gems, Maya creates our detailed itineraries and writes much of our content.",
            },
            TeamMember {
                name: "David Chen",
                role: "Campground Specialist",
                photo: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?ixlib=rb-4.0.3&auto=format&fit=crop&w=1470&q=80",
                bio: "An avid camper and former park ranger, David evaluates campgrounds with a keen eye for detail and safety considerations.",
            },
        ],
        vetting_steps: vec![
            VettingStep {
                title: "Research",
                body: "We start by researching potential campgrounds in a region, looking at reviews, amenities, and location. We identify promising options that offer a range of experiences from rustic to full-service.",
            },
            VettingStep {
                title: "Personal Visits",
                body: "Our team personally visits each campground, staying at least one night to experience the facilities, assess the noise levels, check the condition of amenities, and evaluate the overall atmosphere.",
            },
            VettingStep {
                title: "Documentation",
                body: "We document our experience with photos, notes on amenities, and detailed observations about the campground and surrounding area, including nearby attractions and activities.",
            },
            VettingStep {
                title: "Route Planning",
                body: "We create logical routes connecting our vetted campgrounds, considering driving distances, road conditions, and points of interest along the way.",
            },
            VettingStep {
                title: "Local Recommendations",
                body: "We research and often personally try local restaurants, activities, and attractions to provide well-rounded recommendations that enhance your camping experience.",
            },
            VettingStep {
                title: "Regular Updates",
                body: "We revisit destinations periodically to ensure our information remains accurate and up-to-date, and we incorporate feedback from travelers who use our guides.",
            },
        ],
    })
}
