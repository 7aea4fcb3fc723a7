use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RouteInfo {
    #[serde(default)]
    pub overview: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryStop>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryStop {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityGroup {
    pub location: String,
    pub items: Vec<Activity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantGroup {
    pub location: String,
    pub items: Vec<Restaurant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub name: String,
    pub address: String,
    pub price: String,
    pub cuisine: String,
    pub description: String,
}

/// A curated, hand-written road trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub title: String,
    pub region_name: String,
    pub summary: String,
    pub card_image: String,
    pub page_title: String,
    pub page_description: String,
    pub headline: String,
    pub tagline: String,
    pub hero_image: String,
    pub locations: Vec<LocationRef>,
    #[serde(default)]
    pub route: Option<RouteInfo>,
    #[serde(default)]
    pub activities: Vec<ActivityGroup>,
    #[serde(default)]
    pub restaurants: Vec<RestaurantGroup>,
}

impl Trip {
    pub fn location_names(&self) -> Vec<String> {
        self.locations.iter().map(|loc| loc.name.clone()).collect()
    }

    pub fn has_location(&self, location_id: &str) -> bool {
        self.locations.iter().any(|loc| loc.id == location_id)
    }
}

/// A curated trip seen from the trip builder's first step.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub image: String,
    pub locations: Vec<LocationRef>,
}

impl From<&Trip> for Region {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.clone(),
            name: trip.region_name.clone(),
            image: trip.card_image.clone(),
            locations: trip.locations.clone(),
        }
    }
}

impl Region {
    pub fn location_ids(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|loc| loc.id.as_str())
    }

    pub fn contains(&self, location_id: &str) -> bool {
        self.location_ids().any(|id| id == location_id)
    }
}
