//! Prediction points and the six-hour series.

use serde::{Deserialize, Serialize};

use crate::crowd::{CrowdLevel, HourOfDay};
use crate::error::ValidationError;

/// Number of hourly points in a series, "Now" included.
pub const SERIES_LEN: usize = 6;

const NOW_LABEL: &str = "Now";

/// One hour of a forward-looking crowd forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// "Now" for the first point, otherwise a 12-hour label like "3p"
    pub hour_label: String,
    /// Wall-clock hour this point describes
    pub hour: HourOfDay,
    pub level: CrowdLevel,
    pub is_now: bool,
    /// First quiet hour after "Now"
    pub is_best: bool,
}

/// Hourly forecast starting at the current hour.
///
/// Always holds [`SERIES_LEN`] points. Only the first is `is_now`; at most one
/// later point is `is_best`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SeriesPoints")]
pub struct PredictionSeries {
    points: Vec<PredictionPoint>,
}

/// Wire shape of a series, checked before it becomes a [`PredictionSeries`].
#[derive(Deserialize)]
struct SeriesPoints {
    points: Vec<PredictionPoint>,
}

impl TryFrom<SeriesPoints> for PredictionSeries {
    type Error = ValidationError;

    fn try_from(raw: SeriesPoints) -> Result<Self, Self::Error> {
        let points = raw.points;
        if points.len() != SERIES_LEN {
            return Err(ValidationError::invalid(
                "points",
                format!("expected {SERIES_LEN} points, got {}", points.len()),
            ));
        }
        if !points[0].is_now || points[1..].iter().any(|p| p.is_now) {
            return Err(ValidationError::invalid("is_now", "only the first point may be now"));
        }

        let expected_best = points
            .iter()
            .skip(1)
            .position(|p| p.level == CrowdLevel::Quiet)
            .map(|i| i + 1);
        let flagged: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_best)
            .map(|(i, _)| i)
            .collect();
        if flagged.len() > 1 || flagged.first().copied() != expected_best {
            return Err(ValidationError::invalid(
                "is_best",
                "best must be the first quiet point after now",
            ));
        }

        Ok(Self { points })
    }
}

impl PredictionSeries {
    /// Build a series from consecutive `(hour, level)` pairs, labelling the
    /// first as "Now" and flagging the first later quiet hour as best.
    pub(crate) fn from_levels(levels: &[(HourOfDay, CrowdLevel)]) -> Self {
        debug_assert_eq!(levels.len(), SERIES_LEN);

        let best_index = levels
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, (_, level))| *level == CrowdLevel::Quiet)
            .map(|(i, _)| i);

        let points = levels
            .iter()
            .enumerate()
            .map(|(i, &(hour, level))| PredictionPoint {
                hour_label: if i == 0 {
                    NOW_LABEL.to_string()
                } else {
                    hour.label()
                },
                hour,
                level,
                is_now: i == 0,
                is_best: Some(i) == best_index,
            })
            .collect();

        Self { points }
    }

    pub fn points(&self) -> &[PredictionPoint] {
        &self.points
    }

    /// The point flagged `is_best`, if any.
    pub fn best(&self) -> Option<&PredictionPoint> {
        self.points.iter().find(|p| p.is_best)
    }

    /// Label of the best upcoming hour, falling back to "Now".
    pub fn best_time_label(&self) -> &str {
        self.best().map_or(NOW_LABEL, |p| p.hour_label.as_str())
    }

    /// Current crowd level (the "Now" point).
    pub fn current_level(&self) -> CrowdLevel {
        self.points.first().map_or(CrowdLevel::Quiet, |p| p.level)
    }

    /// Busiest level anywhere in the series.
    pub fn peak_level(&self) -> CrowdLevel {
        self.points
            .iter()
            .map(|p| p.level)
            .max()
            .unwrap_or(CrowdLevel::Quiet)
    }
}

impl<'a> IntoIterator for &'a PredictionSeries {
    type Item = &'a PredictionPoint;
    type IntoIter = std::slice::Iter<'a, PredictionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
