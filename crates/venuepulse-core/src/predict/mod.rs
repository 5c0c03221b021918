//! Hourly crowd-level prediction.
//!
//! This module projects how busy a venue will be over the next few hours and
//! picks the best (quietest) upcoming hour to visit.
//!
//! The demand shape is fixed per hour and day kind ([`bucket_for`]); within a
//! peak bucket the exact level is drawn from an injected random source, so a
//! seeded [`ActivityPredictor`] yields reproducible series.

mod series;

pub use series::{PredictionPoint, PredictionSeries, SERIES_LEN};

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::crowd::{CrowdLevel, DayKind, HourOfDay};

/// Deterministic shape of demand for one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrowdBucket {
    /// Always this level.
    Fixed(CrowdLevel),
    /// One of two levels, evenly split.
    Either(CrowdLevel, CrowdLevel),
}

impl CrowdBucket {
    /// Whether `level` is a possible outcome of this bucket.
    pub fn allows(self, level: CrowdLevel) -> bool {
        match self {
            CrowdBucket::Fixed(l) => l == level,
            CrowdBucket::Either(a, b) => a == level || b == level,
        }
    }

    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> CrowdLevel {
        match self {
            CrowdBucket::Fixed(level) => level,
            CrowdBucket::Either(a, b) => {
                if rng.gen_bool(0.5) {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Demand bucket for an hour on a given kind of day.
///
/// Weekends peak late morning through afternoon and stay active into the
/// evening. Weekdays peak before and after work with a lunchtime bump.
pub fn bucket_for(hour: HourOfDay, day: DayKind) -> CrowdBucket {
    use CrowdLevel::*;

    match (day, hour.get()) {
        (DayKind::Weekend, 10..=17) => CrowdBucket::Either(Active, Busy),
        (DayKind::Weekend, 18..=20) => CrowdBucket::Fixed(Active),
        (DayKind::Weekday, 6..=9 | 17..=20) => CrowdBucket::Either(Busy, Packed),
        (DayKind::Weekday, 12..=14) => CrowdBucket::Fixed(Active),
        _ => CrowdBucket::Fixed(Quiet),
    }
}

/// Classify a single hour, drawing from `rng` inside peak buckets.
pub fn classify_hour<R: Rng + ?Sized>(hour: HourOfDay, day: DayKind, rng: &mut R) -> CrowdLevel {
    bucket_for(hour, day).sample(rng)
}

/// Build the six-hour series starting at `current`.
///
/// Every point uses `day`, including hours that wrap past midnight.
pub fn generate_hourly_predictions<R: Rng + ?Sized>(
    current: HourOfDay,
    day: DayKind,
    rng: &mut R,
) -> PredictionSeries {
    let levels: Vec<(HourOfDay, CrowdLevel)> = (0..SERIES_LEN as u32)
        .map(|offset| {
            let hour = current.advance(offset);
            (hour, classify_hour(hour, day, rng))
        })
        .collect();

    let series = PredictionSeries::from_levels(&levels);
    tracing::debug!(
        hour = current.get(),
        %day,
        best = %series.best_time_label(),
        "generated crowd predictions"
    );
    series
}

/// Predictor settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Random seed for reproducible predictions (None = OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Stateful predictor owning its random source.
#[derive(Debug, Clone)]
pub struct ActivityPredictor {
    rng: Mcg128Xsl64,
}

impl Default for ActivityPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityPredictor {
    /// Predictor seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_config(&PredictorConfig::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    pub fn with_config(config: &PredictorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { rng }
    }

    pub fn classify(&mut self, hour: HourOfDay, day: DayKind) -> CrowdLevel {
        classify_hour(hour, day, &mut self.rng)
    }

    pub fn predict(&mut self, current: HourOfDay, day: DayKind) -> PredictionSeries {
        generate_hourly_predictions(current, day, &mut self.rng)
    }

    /// Predict from the local clock: current hour and today's day kind.
    pub fn predict_now(&mut self) -> PredictionSeries {
        self.predict(HourOfDay::now(), DayKind::today())
    }
}
