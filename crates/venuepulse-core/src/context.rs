//! Explicit user context.
//!
//! Role, location and sport preference are carried in a [`UserContext`] value
//! passed to whatever needs them, rather than read from shared state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::geo::Coordinates;

/// Persona the app is currently acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Player,
    Trainer,
    Instructor,
    Facility,
    /// Plays and also runs a business
    Both,
}

impl UserRole {
    /// Sees player-facing discovery (nearby venues, crowd forecasts).
    pub fn is_player(self) -> bool {
        matches!(self, UserRole::Player | UserRole::Both)
    }

    /// Sees business dashboards (bookings, clients, revenue).
    pub fn is_business(self) -> bool {
        !matches!(self, UserRole::Player)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Player => "player",
            UserRole::Trainer => "trainer",
            UserRole::Instructor => "instructor",
            UserRole::Facility => "facility",
            UserRole::Both => "both",
        };
        f.write_str(s)
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" => Ok(UserRole::Player),
            "trainer" => Ok(UserRole::Trainer),
            "instructor" => Ok(UserRole::Instructor),
            "facility" => Ok(UserRole::Facility),
            "both" => Ok(UserRole::Both),
            other => Err(ValidationError::invalid("role", format!("unknown role '{other}'"))),
        }
    }
}

/// Who is asking, and from where.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub role: UserRole,
    pub location: Option<Coordinates>,
    /// Lowercased sport name, e.g. "tennis"
    pub preferred_sport: Option<String>,
}

impl UserContext {
    pub fn new(role: UserRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the preferred sport; blank values clear it.
    pub fn with_sport(mut self, sport: impl AsRef<str>) -> Self {
        let sport = sport.as_ref().trim().to_lowercase();
        self.preferred_sport = (!sport.is_empty()).then_some(sport);
        self
    }
}
