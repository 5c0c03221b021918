//! Crowd model: hours, day kinds and discrete crowd levels.
//!
//! Venue cards and map markers are color-coded by [`CrowdLevel`]. Levels are
//! either predicted from the hour of day (see [`crate::predict`]) or derived
//! from a live [`Occupancy`] reading.

mod level;
mod time;

pub use level::{CrowdLevel, Occupancy};
pub use time::{format_hour_label, DayKind, HourOfDay};
