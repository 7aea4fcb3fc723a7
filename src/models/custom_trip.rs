use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{campground::Accommodation, trip::LocationRef};

pub const STORAGE_KEY_PREFIX: &str = "customTrip-";

/// Trip document written by the builder's last step.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomTrip {
    #[serde_as(as = "DisplayFromStr")]
    pub id: i64,
    pub region: String,
    pub trip_length: u32,
    pub locations: Vec<LocationRef>,
    pub campgrounds: Vec<SelectedCampground>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCampground {
    pub id: String,
    pub title: String,
    pub location: String,
    pub image_url: String,
    #[serde(rename = "type")]
    pub kind: Accommodation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightsAtLocation {
    pub location: String,
    pub nights: u32,
}

impl CustomTrip {
    pub fn storage_key(&self) -> String {
        storage_key(self.id)
    }

    pub fn optimal_route(&self) -> String {
        self.locations
            .iter()
            .map(|loc| loc.name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }

    /// Spreads `trip_length - 1` nights over the stops, earlier stops taking the remainder.
    pub fn nights_per_location(&self) -> Vec<NightsAtLocation> {
        let count = self.locations.len() as u32;
        if count == 0 {
            return Vec::new();
        }
        let total = self.trip_length.saturating_sub(1);
        let base = total / count;
        let extra = total % count;
        self.locations
            .iter()
            .enumerate()
            .map(|(index, loc)| NightsAtLocation {
                location: loc.name.clone(),
                nights: base + u32::from((index as u32) < extra),
            })
            .collect()
    }

    pub fn campgrounds_by_location(&self) -> Vec<(String, Vec<&SelectedCampground>)> {
        let mut groups: Vec<(String, Vec<&SelectedCampground>)> = Vec::new();
        for campground in &self.campgrounds {
            match groups
                .iter_mut()
                .find(|(location, _)| *location == campground.location)
            {
                Some((_, items)) => items.push(campground),
                None => groups.push((campground.location.clone(), vec![campground])),
            }
        }
        groups
    }

    pub fn campgrounds_at(&self, location_name: &str) -> Vec<&SelectedCampground> {
        self.campgrounds
            .iter()
            .filter(|c| c.location == location_name)
            .collect()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.id)
    }
}

pub fn storage_key(id: i64) -> String {
    format!("{STORAGE_KEY_PREFIX}{id}")
}
