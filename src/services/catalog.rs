use std::{ops::Deref, path::Path, sync::Arc};

use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, error, info};

use crate::{
    error::AppError,
    models::{
        campground::{
            Accommodation, AccommodationFilter, Campground, CampgroundData, CampgroundEntry,
            CampgroundId, LocationCampgrounds,
        },
        trip::{LocationRef, Region, Trip},
    },
};

const CAMPGROUNDS_FILE: &str = "campgrounds.json";
const TRIPS_FILE: &str = "trips.json";
const FEATURED_TRIPS: [&str; 3] = ["northern-michigan", "washington", "southern-california"];

static NO_CAMPGROUNDS: LocationCampgrounds = LocationCampgrounds {
    tent: Vec::new(),
    lodging: Vec::new(),
};

/// Read-only campground records and curated trips.
#[derive(Debug, Default)]
pub struct Catalog {
    campgrounds: CampgroundData,
    trips: Vec<Trip>,
}

impl Catalog {
    pub fn new(campgrounds: CampgroundData, trips: Vec<Trip>) -> Self {
        Self { campgrounds, trips }
    }

    /// Loads both catalog files; a file that cannot be read or parsed leaves its half empty.
    pub async fn load(data_root: &Path) -> Self {
        let campgrounds: CampgroundData = match read_json(&data_root.join(CAMPGROUNDS_FILE)).await
        {
            Ok(data) => data,
            Err(err) => {
                error!("loading campground data failed: {err}");
                CampgroundData::default()
            }
        };
        let trips: Vec<Trip> = match read_json(&data_root.join(TRIPS_FILE)).await {
            Ok(trips) => trips,
            Err(err) => {
                error!("loading curated trips failed: {err}");
                Vec::new()
            }
        };
        info!(
            locations = campgrounds.len(),
            trips = trips.len(),
            "catalog loaded from {}",
            data_root.display()
        );
        Self::new(campgrounds, trips)
    }

    pub fn campgrounds_by_location(&self, location: &str) -> &LocationCampgrounds {
        self.campgrounds.get(location).unwrap_or(&NO_CAMPGROUNDS)
    }

    /// Every location named by a curated trip, in trip order, without repeats.
    pub fn all_locations(&self) -> Vec<LocationRef> {
        let mut seen: Vec<LocationRef> = Vec::new();
        for location in self.trips.iter().flat_map(|trip| trip.locations.iter()) {
            if !seen.iter().any(|known| known.id == location.id) {
                seen.push(location.clone());
            }
        }
        seen
    }

    pub fn location_name(&self, location_id: &str) -> Option<&str> {
        self.trips
            .iter()
            .flat_map(|trip| trip.locations.iter())
            .find(|loc| loc.id == location_id)
            .map(|loc| loc.name.as_str())
    }

    pub fn available_campgrounds(
        &self,
        locations: &[String],
        filter: AccommodationFilter,
    ) -> Vec<CampgroundEntry> {
        let mut entries = Vec::new();
        for location_id in locations {
            let location_name = self
                .location_name(location_id)
                .unwrap_or(location_id)
                .to_string();
            let data = self.campgrounds_by_location(location_id);
            for kind in [Accommodation::Tent, Accommodation::Lodging] {
                if !filter.includes(kind) {
                    continue;
                }
                for (index, campground) in data.of_kind(kind).iter().enumerate() {
                    entries.push(CampgroundEntry {
                        id: CampgroundId::new(location_id.as_str(), kind, index),
                        location_id: location_id.clone(),
                        location_name: location_name.clone(),
                        kind,
                        campground: campground.clone(),
                    });
                }
            }
        }
        debug!(
            locations = locations.len(),
            filter = filter.as_str(),
            found = entries.len(),
            "listed available campgrounds"
        );
        entries
    }

    pub fn find_campground(&self, id: &CampgroundId) -> Option<&Campground> {
        self.campgrounds
            .get(&id.location)?
            .of_kind(id.kind)
            .get(id.index)
    }

    pub fn entry(&self, raw_id: &str) -> Option<CampgroundEntry> {
        let id = CampgroundId::parse(raw_id)?;
        let campground = self.find_campground(&id)?.clone();
        let location_name = self
            .location_name(&id.location)
            .unwrap_or(&id.location)
            .to_string();
        Some(CampgroundEntry {
            location_id: id.location.clone(),
            location_name,
            kind: id.kind,
            campground,
            id,
        })
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trip(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == id)
    }

    pub fn featured_trips(&self) -> Vec<&Trip> {
        FEATURED_TRIPS
            .iter()
            .filter_map(|id| self.trip(id))
            .collect()
    }

    pub fn regions(&self) -> Vec<Region> {
        self.trips.iter().map(Region::from).collect()
    }

    pub fn region(&self, id: &str) -> Option<Region> {
        self.trip(id).map(Region::from)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CatalogService {
    inner: Arc<Catalog>,
}

impl CatalogService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(catalog),
        }
    }

    pub async fn load(data_root: &Path) -> Self {
        Self::new(Catalog::load(data_root).await)
    }
}

impl Deref for CatalogService {
    type Target = Catalog;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read(path).await?;
    let value = serde_json::from_slice(&raw)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn data_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[tokio::test]
    async fn bundled_catalog_loads() {
        let catalog = Catalog::load(&data_root()).await;
        assert_eq!(catalog.trips().len(), 9);
        assert_eq!(catalog.featured_trips().len(), 3);
        assert_eq!(catalog.all_locations().len(), 27);
        assert_eq!(catalog.location_name("olympicNP"), Some("Olympic National Park"));
        let traverse = catalog.campgrounds_by_location("traverseCity");
        assert_eq!(traverse.tent.len(), 1);
        assert_eq!(traverse.lodging.len(), 1);
    }

    #[tokio::test]
    async fn missing_files_give_an_empty_catalog() {
        let catalog = Catalog::load(Path::new("/definitely/not/here")).await;
        assert!(catalog.trips().is_empty());
        assert!(catalog.campgrounds_by_location("traverseCity").is_empty());
    }

    #[tokio::test]
    async fn available_campgrounds_follow_selection_order_and_filter() {
        let catalog = Catalog::load(&data_root()).await;
        let selection = vec!["mackinacCity".to_string(), "traverseCity".to_string()];

        let all = catalog.available_campgrounds(&selection, AccommodationFilter::All);
        let ids: Vec<String> = all.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "mackinacCity-tent-0",
                "mackinacCity-lodging-0",
                "traverseCity-tent-0",
                "traverseCity-lodging-0",
            ]
        );
        assert_eq!(all[0].location_name, "Mackinac City");

        let tents = catalog.available_campgrounds(&selection, AccommodationFilter::Tent);
        assert!(tents.iter().all(|e| e.kind == Accommodation::Tent));
        assert_eq!(tents.len(), 2);
    }

    #[tokio::test]
    async fn entries_resolve_by_builder_id() {
        let catalog = Catalog::load(&data_root()).await;
        let entry = catalog.entry("grandCanyon-tent-0").expect("entry");
        assert_eq!(entry.campground.title, "Grand Canyon South Rim Campground");
        assert_eq!(entry.location_name, "Grand Canyon");
        assert!(catalog.entry("grandCanyon-tent-9").is_none());
        assert!(catalog.entry("nowhere-tent-0").is_none());
    }

    #[tokio::test]
    async fn regions_mirror_curated_trips() {
        let catalog = Catalog::load(&data_root()).await;
        let region = catalog.region("arizona").expect("region");
        assert_eq!(region.name, "Arizona");
        assert!(region.contains("sedona"));
        assert!(!region.contains("traverseCity"));
        assert!(catalog.region("atlantis").is_none());
    }
}
