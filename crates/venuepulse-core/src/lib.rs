//! # VenuePulse Core Library
//!
//! This library provides the core logic behind VenuePulse's venue discovery
//! screens. It follows a CLI-first philosophy: every operation is available
//! via the standalone `venuepulse` binary, and UI layers sit on top of the
//! same library.
//!
//! ## Architecture
//!
//! - **Crowd model**: discrete crowd levels (quiet/active/busy/packed) with
//!   display colors and labels, derived from the hour or a live headcount
//! - **Prediction**: six-hour crowd forecast with a best-time-to-visit pick,
//!   driven by an injectable, seedable random source
//! - **Venues**: typed venue records validated at the boundary, nearby search
//!   by haversine distance, and sources with a fallback dataset
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ActivityPredictor`]: crowd forecast generator
//! - [`calculate_distance`]: great-circle distance in miles
//! - [`VenueSource`]: trait for anything that lists nearby venues
//! - [`Config`]: application configuration management

pub mod context;
pub mod crowd;
pub mod error;
pub mod geo;
pub mod predict;
pub mod service;
pub mod storage;
pub mod venue;

pub use context::{UserContext, UserRole};
pub use crowd::{format_hour_label, CrowdLevel, DayKind, HourOfDay, Occupancy};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use geo::{calculate_distance, distance_km, format_distance, Coordinates};
pub use predict::{
    bucket_for, classify_hour, generate_hourly_predictions, ActivityPredictor, CrowdBucket,
    PredictionPoint, PredictionSeries, PredictorConfig, SERIES_LEN,
};
pub use service::{fetch_with_fallback, JsonFileSource, StaticSource, VenueSource};
pub use storage::Config;
pub use venue::{find_nearby, NearbyQuery, NearbyVenue, Venue, VenueRecord};
