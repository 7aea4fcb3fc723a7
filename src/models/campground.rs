use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const FALLBACK_IMAGE: &str = "https://images.unsplash.com/photo-1504280390367-361c6d9f38f4";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Accommodation {
    Tent,
    Lodging,
}

impl Accommodation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accommodation::Tent => "tent",
            Accommodation::Lodging => "lodging",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Accommodation::Tent => "Tent Camping",
            Accommodation::Lodging => "Lodging/Cabin",
        }
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Accommodation {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "tent" => Ok(Accommodation::Tent),
            "lodging" => Ok(Accommodation::Lodging),
            _ => Err(()),
        }
    }
}

/// Which accommodation kinds a listing shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationFilter {
    #[default]
    All,
    Tent,
    Lodging,
}

impl AccommodationFilter {
    /// Lenient parse for query strings: anything unknown shows everything.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("tent") => AccommodationFilter::Tent,
            Some("lodging") => AccommodationFilter::Lodging,
            _ => AccommodationFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationFilter::All => "all",
            AccommodationFilter::Tent => "tent",
            AccommodationFilter::Lodging => "lodging",
        }
    }

    pub fn includes(&self, kind: Accommodation) -> bool {
        match self {
            AccommodationFilter::All => true,
            AccommodationFilter::Tent => kind == Accommodation::Tent,
            AccommodationFilter::Lodging => kind == Accommodation::Lodging,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campground {
    pub title: String,
    pub address: String,
    pub city_and_state: String,
    pub content: String,
    pub estimated_price: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub offerings: String,
    pub distance_to_town: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub check_in_time: String,
    pub check_out_time: String,
    pub guidelines: String,
    pub cancellation_policy: String,
}

impl Campground {
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    pub fn cover_image(&self) -> &str {
        self.primary_image().unwrap_or(FALLBACK_IMAGE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LocationCampgrounds {
    #[serde(default)]
    pub tent: Vec<Campground>,
    #[serde(default)]
    pub lodging: Vec<Campground>,
}

impl LocationCampgrounds {
    pub fn of_kind(&self, kind: Accommodation) -> &[Campground] {
        match kind {
            Accommodation::Tent => &self.tent,
            Accommodation::Lodging => &self.lodging,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tent.is_empty() && self.lodging.is_empty()
    }
}

/// Flat-file catalog: location id to its tent and lodging records.
pub type CampgroundData = BTreeMap<String, LocationCampgrounds>;

/// `<location>-<tent|lodging>-<index>`, the identifier the trip builder hands out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CampgroundId {
    pub location: String,
    pub kind: Accommodation,
    pub index: usize,
}

impl CampgroundId {
    pub fn new(location: impl Into<String>, kind: Accommodation, index: usize) -> Self {
        Self {
            location: location.into(),
            kind,
            index,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.rsplitn(3, '-');
        let index = parts.next()?.parse().ok()?;
        let kind = parts.next()?.parse().ok()?;
        let location = parts.next().filter(|loc| !loc.is_empty())?;
        Some(Self::new(location, kind, index))
    }
}

impl fmt::Display for CampgroundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.location, self.kind, self.index)
    }
}

/// A catalog record tagged with where it sits, as listed by the trip builder.
#[derive(Debug, Clone, PartialEq)]
pub struct CampgroundEntry {
    pub id: CampgroundId,
    pub location_id: String,
    pub location_name: String,
    pub kind: Accommodation,
    pub campground: Campground,
}
