//! Venue sources and the fallback policy.
//!
//! A [`VenueSource`] answers nearby-venue queries. Callers go through
//! [`fetch_with_fallback`], which never surfaces an error: any failure of the
//! primary source is logged and the fallback dataset is shown instead.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::venue::{find_nearby, NearbyQuery, NearbyVenue, Venue, VenueRecord};

/// Anything that can list venues around a point.
pub trait VenueSource {
    /// Short identifier used in logs (e.g. a file path or "fallback").
    fn name(&self) -> &str;

    /// Venues matching `query`, nearest first.
    fn venues_nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyVenue>>;
}

/// Venues read from a JSON array of records on disk.
///
/// The file is re-read on every query. Records that fail validation are
/// skipped with a warning; an unreadable or malformed file is an error.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate every record in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// venue records.
    pub fn load(&self) -> Result<Vec<Venue>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| CoreError::source_failed(&self.name, e))?;
        let records: Vec<VenueRecord> = serde_json::from_str(&content)?;

        let total = records.len();
        let venues: Vec<Venue> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match Venue::try_from(record) {
                Ok(venue) => Some(venue),
                Err(e) => {
                    tracing::warn!(
                        source = %self.name,
                        index,
                        error = %e,
                        "skipping invalid venue record"
                    );
                    None
                }
            })
            .collect();

        tracing::debug!(source = %self.name, total, valid = venues.len(), "loaded venue file");
        Ok(venues)
    }
}

impl VenueSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn venues_nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyVenue>> {
        Ok(find_nearby(&self.load()?, query))
    }
}

/// Venues held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    venues: Vec<Venue>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, venues: Vec<Venue>) -> Self {
        Self {
            name: name.into(),
            venues,
        }
    }

    /// Built-in dataset shown when the real source is unavailable.
    pub fn fallback() -> Self {
        Self::new("fallback", fallback_venues())
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }
}

impl VenueSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn venues_nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyVenue>> {
        Ok(find_nearby(&self.venues, query))
    }
}

/// Query `primary`; on any error, log it and return `fallback`'s results.
///
/// If the fallback fails too, the result is empty.
pub fn fetch_with_fallback(
    primary: &dyn VenueSource,
    fallback: &dyn VenueSource,
    query: &NearbyQuery,
) -> Vec<NearbyVenue> {
    match primary.venues_nearby(query) {
        Ok(venues) => venues,
        Err(e) => {
            tracing::warn!(
                source = primary.name(),
                fallback = fallback.name(),
                error = %e,
                "venue lookup failed, using fallback"
            );
            fallback.venues_nearby(query).unwrap_or_else(|e| {
                tracing::warn!(source = fallback.name(), error = %e, "fallback lookup failed");
                Vec::new()
            })
        }
    }
}

/// (id, name, lat, lng, sports, capacity, current)
const FALLBACK: &[(&str, &str, f64, f64, &[&str], u32, u32)] = &[
    (
        "fb-green-lake",
        "Green Lake Tennis Courts",
        47.6801,
        -122.3287,
        &["tennis", "pickleball"],
        40,
        10,
    ),
    (
        "fb-cal-anderson",
        "Cal Anderson Park Fields",
        47.6173,
        -122.3190,
        &["soccer", "basketball"],
        120,
        70,
    ),
    (
        "fb-amy-yee",
        "Amy Yee Tennis Center",
        47.5853,
        -122.2970,
        &["tennis"],
        60,
        50,
    ),
    (
        "fb-miller",
        "Miller Community Center Gym",
        47.6228,
        -122.3042,
        &["basketball", "volleyball"],
        80,
        20,
    ),
    (
        "fb-magnuson",
        "Magnuson Park Courts",
        47.6812,
        -122.2562,
        &["pickleball", "tennis"],
        48,
        44,
    ),
];

fn fallback_venues() -> Vec<Venue> {
    FALLBACK
        .iter()
        .filter_map(|&(id, name, lat, lng, sports, capacity, current)| {
            let record = VenueRecord {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                latitude: Some(lat),
                longitude: Some(lng),
                sports: sports.iter().map(|s| s.to_string()).collect(),
                capacity: Some(capacity),
                current_count: Some(current),
                crowd_level: None,
            };
            Venue::try_from(record).ok()
        })
        .collect()
}
