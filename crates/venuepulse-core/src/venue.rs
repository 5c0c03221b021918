//! Venue records and nearby search.
//!
//! Venue data arrives loosely typed ([`VenueRecord`]) and is validated once
//! into a [`Venue`]. Everything downstream works with the validated type.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::context::UserContext;
use crate::crowd::{CrowdLevel, Occupancy};
use crate::error::ValidationError;
use crate::geo::{calculate_distance, Coordinates};

/// Venue as it arrives from a file or service, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_count: Option<u32>,
    /// Explicit level; wins over the occupancy reading
    #[serde(default)]
    pub crowd_level: Option<String>,
}

/// A validated venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub location: Coordinates,
    /// Lowercased, trimmed, non-empty
    pub sports: Vec<String>,
    pub occupancy: Option<Occupancy>,
    pub crowd_level: Option<CrowdLevel>,
}

impl Venue {
    /// Whether this venue offers `sport` (case-insensitive).
    pub fn offers(&self, sport: &str) -> bool {
        let sport = sport.trim().to_lowercase();
        self.sports.iter().any(|s| *s == sport)
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))
}

impl TryFrom<VenueRecord> for Venue {
    type Error = ValidationError;

    fn try_from(record: VenueRecord) -> Result<Self, Self::Error> {
        let id = required("id", record.id)?;
        let name = required("name", record.name)?;
        let lat = record
            .latitude
            .ok_or_else(|| ValidationError::MissingField("latitude".into()))?;
        let lng = record
            .longitude
            .ok_or_else(|| ValidationError::MissingField("longitude".into()))?;
        let location = Coordinates::new(lat, lng)?;

        let sports = record
            .sports
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let occupancy = match (record.current_count, record.capacity) {
            (Some(current), Some(capacity)) => Some(Occupancy::new(current, capacity)),
            _ => None,
        };

        let crowd_level = match record.crowd_level.as_deref() {
            Some(level) => Some(level.parse::<CrowdLevel>()?),
            None => occupancy.map(|o| o.level()),
        };

        Ok(Venue {
            id,
            name,
            location,
            sports,
            occupancy,
            crowd_level,
        })
    }
}

/// Search parameters for venues around a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub origin: Coordinates,
    pub radius_miles: f64,
    pub sport: Option<String>,
}

impl NearbyQuery {
    pub fn new(origin: Coordinates, radius_miles: f64) -> Self {
        Self {
            origin,
            radius_miles,
            sport: None,
        }
    }

    pub fn with_sport(mut self, sport: Option<String>) -> Self {
        self.sport = sport
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self
    }

    /// Query around the user's location, filtered by their preferred sport.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the context has no location.
    pub fn for_user(ctx: &UserContext, radius_miles: f64) -> Result<Self, ValidationError> {
        let origin = ctx
            .location
            .ok_or_else(|| ValidationError::MissingField("location".into()))?;
        Ok(Self::new(origin, radius_miles).with_sport(ctx.preferred_sport.clone()))
    }
}

/// A venue paired with its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyVenue {
    pub venue: Venue,
    pub distance_miles: f64,
}

/// Venues within the query radius (inclusive), nearest first, ties by name.
pub fn find_nearby(venues: &[Venue], query: &NearbyQuery) -> Vec<NearbyVenue> {
    let mut found: Vec<NearbyVenue> = venues
        .iter()
        .filter(|v| query.sport.as_deref().map_or(true, |s| v.offers(s)))
        .map(|v| NearbyVenue {
            distance_miles: calculate_distance(query.origin, v.location),
            venue: v.clone(),
        })
        .filter(|n| n.distance_miles <= query.radius_miles)
        .collect();

    found.sort_by(|a, b| {
        a.distance_miles
            .partial_cmp(&b.distance_miles)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.venue.name.cmp(&b.venue.name))
    });
    found
}
