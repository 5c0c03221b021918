//! Property tests for crowd prediction and distance.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use venuepulse_core::{
    bucket_for, calculate_distance, generate_hourly_predictions, ActivityPredictor, Coordinates,
    CrowdLevel, DayKind, HourOfDay, SERIES_LEN,
};

fn day_kind() -> impl Strategy<Value = DayKind> {
    prop_oneof![Just(DayKind::Weekday), Just(DayKind::Weekend)]
}

fn coordinates() -> impl Strategy<Value = Coordinates> {
    (-90.0..=90.0f64, -180.0..=180.0f64).prop_map(|(lat, lng)| Coordinates::new(lat, lng).unwrap())
}

proptest! {
    #[test]
    fn prop_series_has_six_points(hour in 0u8..24, day in day_kind(), seed in any::<u64>()) {
        let mut rng = Mcg128Xsl64::seed_from_u64(seed);
        let series = generate_hourly_predictions(HourOfDay::new(hour).unwrap(), day, &mut rng);
        prop_assert_eq!(series.points().len(), SERIES_LEN);
    }

    #[test]
    fn prop_only_first_point_is_now(hour in 0u8..24, day in day_kind(), seed in any::<u64>()) {
        let series = ActivityPredictor::with_seed(seed).predict(HourOfDay::new(hour).unwrap(), day);
        let points = series.points();
        prop_assert_eq!(points[0].hour_label.as_str(), "Now");
        prop_assert!(points[0].is_now);
        prop_assert_eq!(points[0].hour.get(), hour);
        prop_assert!(points[1..].iter().all(|p| !p.is_now));
    }

    #[test]
    fn prop_points_advance_hourly(hour in 0u8..24, day in day_kind(), seed in any::<u64>()) {
        let series = ActivityPredictor::with_seed(seed).predict(HourOfDay::new(hour).unwrap(), day);
        for (i, p) in series.points().iter().enumerate() {
            prop_assert_eq!(u32::from(p.hour.get()), (u32::from(hour) + i as u32) % 24);
            if i > 0 {
                prop_assert_eq!(&p.hour_label, &p.hour.label());
            }
        }
    }

    #[test]
    fn prop_levels_respect_buckets(hour in 0u8..24, day in day_kind(), seed in any::<u64>()) {
        let series = ActivityPredictor::with_seed(seed).predict(HourOfDay::new(hour).unwrap(), day);
        for p in series.points() {
            prop_assert!(bucket_for(p.hour, day).allows(p.level));
        }
    }

    #[test]
    fn prop_weekend_peak_is_active_or_busy(hour in 10u8..=17, seed in any::<u64>()) {
        let hour = HourOfDay::new(hour).unwrap();
        let level = ActivityPredictor::with_seed(seed).classify(hour, DayKind::Weekend);
        prop_assert!(matches!(level, CrowdLevel::Active | CrowdLevel::Busy));
    }

    #[test]
    fn prop_weekday_rush_is_busy_or_packed(
        hour in prop_oneof![6u8..=9, 17u8..=20],
        seed in any::<u64>(),
    ) {
        let hour = HourOfDay::new(hour).unwrap();
        let level = ActivityPredictor::with_seed(seed).classify(hour, DayKind::Weekday);
        prop_assert!(matches!(level, CrowdLevel::Busy | CrowdLevel::Packed));
    }

    #[test]
    fn prop_best_is_first_later_quiet_point(
        hour in 0u8..24,
        day in day_kind(),
        seed in any::<u64>(),
    ) {
        let series = ActivityPredictor::with_seed(seed).predict(HourOfDay::new(hour).unwrap(), day);
        let points = series.points();
        let best: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_best)
            .map(|(i, _)| i)
            .collect();
        let first_quiet = points
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, p)| p.level == CrowdLevel::Quiet)
            .map(|(i, _)| i);

        prop_assert!(best.len() <= 1);
        prop_assert_eq!(best.first().copied(), first_quiet);
        match first_quiet {
            Some(i) => {
                prop_assert_eq!(series.best_time_label(), points[i].hour_label.as_str());
            }
            None => {
                prop_assert_eq!(series.best_time_label(), "Now");
            }
        }
    }

    #[test]
    fn prop_same_seed_same_series(hour in 0u8..24, day in day_kind(), seed in any::<u64>()) {
        let hour = HourOfDay::new(hour).unwrap();
        let a = ActivityPredictor::with_seed(seed).predict(hour, day);
        let b = ActivityPredictor::with_seed(seed).predict(hour, day);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_distance_to_self_is_zero(p in coordinates()) {
        prop_assert_eq!(calculate_distance(p, p), 0.0);
    }

    #[test]
    fn prop_distance_is_symmetric(a in coordinates(), b in coordinates()) {
        let ab = calculate_distance(a, b);
        let ba = calculate_distance(b, a);
        prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        prop_assert!(ab >= 0.0);
        prop_assert!(ab <= std::f64::consts::PI * venuepulse_core::geo::EARTH_RADIUS_MILES + 1e-6);
    }
}

#[test]
fn midnight_wraparound_labels() {
    let series =
        ActivityPredictor::with_seed(1).predict(HourOfDay::new(22).unwrap(), DayKind::Weekday);
    let labels: Vec<_> = series.points().iter().map(|p| p.hour_label.as_str()).collect();
    assert_eq!(labels, vec!["Now", "11p", "12a", "1a", "2a", "3a"]);
}

#[test]
fn noon_and_afternoon_labels() {
    let series =
        ActivityPredictor::with_seed(1).predict(HourOfDay::new(11).unwrap(), DayKind::Weekend);
    let labels: Vec<_> = series.points().iter().map(|p| p.hour_label.as_str()).collect();
    assert_eq!(labels, vec!["Now", "12p", "1p", "2p", "3p", "4p"]);
}

#[test]
fn starting_at_midnight_labels_now() {
    let series = ActivityPredictor::with_seed(5).predict(HourOfDay::MIDNIGHT, DayKind::Weekend);
    assert_eq!(series.points()[0].hour_label, "Now");
    assert_eq!(series.points()[0].hour.label(), "12a");
    // 0..=5 is quiet on weekends, so the very next hour is best
    assert_eq!(series.best_time_label(), "1a");
}
