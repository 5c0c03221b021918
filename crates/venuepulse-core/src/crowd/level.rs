//! Crowd levels and occupancy readings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Discrete occupancy classification, ordered from emptiest to fullest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdLevel {
    Quiet,
    Active,
    Busy,
    Packed,
}

impl CrowdLevel {
    /// All levels in ascending order.
    pub const ALL: [CrowdLevel; 4] = [
        CrowdLevel::Quiet,
        CrowdLevel::Active,
        CrowdLevel::Busy,
        CrowdLevel::Packed,
    ];

    /// Human label shown on venue cards.
    pub fn label(self) -> &'static str {
        match self {
            CrowdLevel::Quiet => "Wide Open",
            CrowdLevel::Active => "Active",
            CrowdLevel::Busy => "Crowded",
            CrowdLevel::Packed => "Full",
        }
    }

    /// Display color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            CrowdLevel::Quiet => "#10B981",
            CrowdLevel::Active => "#3B82F6",
            CrowdLevel::Busy => "#F59E0B",
            CrowdLevel::Packed => "#EF4444",
        }
    }

    /// Machine-readable key, as used in venue files and config.
    pub fn as_str(self) -> &'static str {
        match self {
            CrowdLevel::Quiet => "quiet",
            CrowdLevel::Active => "active",
            CrowdLevel::Busy => "busy",
            CrowdLevel::Packed => "packed",
        }
    }

    /// Classify an occupancy percentage (0-100).
    ///
    /// Thresholds: below 30 quiet, below 60 active, below 85 busy, else packed.
    /// NaN is treated as empty.
    pub fn from_occupancy_percent(percent: f64) -> Self {
        match percent {
            p if p.is_nan() || p < 30.0 => CrowdLevel::Quiet,
            p if p < 60.0 => CrowdLevel::Active,
            p if p < 85.0 => CrowdLevel::Busy,
            _ => CrowdLevel::Packed,
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrowdLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Ok(CrowdLevel::Quiet),
            "active" => Ok(CrowdLevel::Active),
            "busy" => Ok(CrowdLevel::Busy),
            "packed" => Ok(CrowdLevel::Packed),
            other => Err(ValidationError::invalid(
                "crowd_level",
                format!("'{other}' is not one of quiet/active/busy/packed"),
            )),
        }
    }
}

/// A live headcount against a venue's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub current: u32,
    pub capacity: u32,
}

impl Occupancy {
    pub fn new(current: u32, capacity: u32) -> Self {
        Self { current, capacity }
    }

    /// Percentage full, clamped to 0-100. Zero capacity reads as empty.
    pub fn percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        (f64::from(self.current) / f64::from(self.capacity) * 100.0).min(100.0)
    }

    pub fn level(&self) -> CrowdLevel {
        CrowdLevel::from_occupancy_percent(self.percent())
    }
}
