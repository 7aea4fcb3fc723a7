use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    models::{
        campground::{AccommodationFilter, CampgroundId},
        custom_trip::{CustomTrip, SelectedCampground},
        trip::{LocationRef, Region},
    },
    services::catalog::Catalog,
};

pub const MIN_TRIP_LENGTH: u32 = 3;
pub const MAX_TRIP_LENGTH: u32 = 14;
pub const DEFAULT_TRIP_LENGTH: u32 = 7;
pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Please choose a region to start your trip.")]
    NoRegion,
    #[error("We don't know the region \"{0}\".")]
    UnknownRegion(String),
    #[error("Select at least one destination to continue.")]
    NoLocations,
    #[error("Select at least one campground to continue.")]
    NoCampgrounds,
    #[error("\"{0}\" is not part of the selected region.")]
    ForeignLocation(String),
    #[error("We couldn't find the campground \"{0}\".")]
    UnknownCampground(String),
}

/// Trip builder state between requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TripDraft {
    pub step: u8,
    pub region: Option<String>,
    pub trip_length: u32,
    pub locations: Vec<String>,
    pub accommodation: AccommodationFilter,
    pub campgrounds: Vec<String>,
}

impl Default for TripDraft {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            region: None,
            trip_length: DEFAULT_TRIP_LENGTH,
            locations: Vec::new(),
            accommodation: AccommodationFilter::All,
            campgrounds: Vec::new(),
        }
    }
}

impl TripDraft {
    pub fn region(&self, catalog: &Catalog) -> Option<Region> {
        self.region.as_deref().and_then(|id| catalog.region(id))
    }

    pub fn select_region(&mut self, catalog: &Catalog, region_id: &str) -> Result<(), BuildError> {
        let region = catalog
            .region(region_id)
            .ok_or_else(|| BuildError::UnknownRegion(region_id.to_string()))?;
        self.region = Some(region.id.clone());
        let locations = region.location_ids().map(str::to_string).collect();
        self.replace_locations(locations);
        self.step = 2;
        Ok(())
    }

    pub fn toggle_location(&mut self, catalog: &Catalog, location_id: &str) -> Result<(), BuildError> {
        let region = self.region(catalog).ok_or(BuildError::NoRegion)?;
        if !region.contains(location_id) {
            return Err(BuildError::ForeignLocation(location_id.to_string()));
        }
        if self.locations.iter().any(|id| id == location_id) {
            let remaining = self
                .locations
                .iter()
                .filter(|id| *id != location_id)
                .cloned()
                .collect();
            self.replace_locations(remaining);
        } else {
            self.locations.push(location_id.to_string());
        }
        Ok(())
    }

    /// Replaces the selection with the region's locations that appear in `ids`, in region order.
    pub fn set_locations(&mut self, catalog: &Catalog, ids: &[String]) -> Result<(), BuildError> {
        let region = self.region(catalog).ok_or(BuildError::NoRegion)?;
        let selected = region
            .location_ids()
            .filter(|id| ids.iter().any(|wanted| wanted.as_str() == *id))
            .map(str::to_string)
            .collect();
        self.replace_locations(selected);
        Ok(())
    }

    pub fn set_trip_length(&mut self, days: u32) {
        self.trip_length = days.clamp(MIN_TRIP_LENGTH, MAX_TRIP_LENGTH);
    }

    pub fn set_accommodation(&mut self, filter: AccommodationFilter) {
        self.accommodation = filter;
    }

    pub fn toggle_campground(&mut self, catalog: &Catalog, raw_id: &str) -> Result<(), BuildError> {
        let unknown = || BuildError::UnknownCampground(raw_id.to_string());
        let id = CampgroundId::parse(raw_id).ok_or_else(unknown)?;
        if !self.locations.contains(&id.location) || catalog.find_campground(&id).is_none() {
            return Err(unknown());
        }
        let key = id.to_string();
        if let Some(pos) = self.campgrounds.iter().position(|c| *c == key) {
            self.campgrounds.remove(pos);
        } else {
            self.campgrounds.push(key);
        }
        Ok(())
    }

    pub fn is_selected(&self, campground_id: &str) -> bool {
        self.campgrounds.iter().any(|c| c == campground_id)
    }

    pub fn advance(&mut self) -> Result<(), BuildError> {
        match self.step {
            1 if self.region.is_none() => return Err(BuildError::NoRegion),
            2 if self.locations.is_empty() => return Err(BuildError::NoLocations),
            3 if self.campgrounds.is_empty() => return Err(BuildError::NoCampgrounds),
            _ => {}
        }
        self.step = (self.step + 1).min(LAST_STEP);
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = self.step.saturating_sub(1).max(FIRST_STEP);
    }

    /// Pulls the step back to the furthest one the current state supports.
    pub fn normalize(&mut self, catalog: &Catalog) {
        self.step = self.step.clamp(FIRST_STEP, LAST_STEP);
        if self.region(catalog).is_none() {
            *self = Self {
                trip_length: self.trip_length.clamp(MIN_TRIP_LENGTH, MAX_TRIP_LENGTH),
                ..Self::default()
            };
            return;
        }
        self.trip_length = self.trip_length.clamp(MIN_TRIP_LENGTH, MAX_TRIP_LENGTH);
        if self.locations.is_empty() {
            self.step = self.step.min(2);
        } else if self.campgrounds.is_empty() {
            self.step = self.step.min(3);
        }
    }

    pub fn build(&self, catalog: &Catalog, id: i64) -> Result<CustomTrip, BuildError> {
        let region = self.region(catalog).ok_or(BuildError::NoRegion)?;
        if self.locations.is_empty() {
            return Err(BuildError::NoLocations);
        }
        if self.campgrounds.is_empty() {
            return Err(BuildError::NoCampgrounds);
        }

        let locations = self
            .locations
            .iter()
            .map(|id| LocationRef {
                id: id.clone(),
                name: catalog.location_name(id).unwrap_or_default().to_string(),
            })
            .collect();

        let campgrounds = self
            .campgrounds
            .iter()
            .map(|raw_id| {
                let entry = catalog
                    .entry(raw_id)
                    .ok_or_else(|| BuildError::UnknownCampground(raw_id.clone()))?;
                Ok(SelectedCampground {
                    id: entry.id.to_string(),
                    title: entry.campground.title.clone(),
                    location: entry.location_name,
                    image_url: entry
                        .campground
                        .primary_image()
                        .unwrap_or_default()
                        .to_string(),
                    kind: entry.kind,
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        Ok(CustomTrip {
            id,
            region: region.id,
            trip_length: self.trip_length,
            locations,
            campgrounds,
        })
    }

    fn replace_locations(&mut self, locations: Vec<String>) {
        self.campgrounds.retain(|raw_id| {
            CampgroundId::parse(raw_id)
                .map(|id| locations.contains(&id.location))
                .unwrap_or(false)
        });
        self.locations = locations;
    }
}
