use airmon_core::timeseries::nowcast::{nowcast_series, nowcast_window};
use airmon_core::{AirmonError, Column, SeriesCollection, SeriesMeta, ValueTable};
use chrono::{DateTime, Utc};
use proptest::prelude::*;

#[test]
fn constant_window_returns_the_constant() {
    assert_eq!(nowcast_window(&[Some(10.0); 12]).unwrap(), 10.0);
}

#[test]
fn missing_hour_keeps_older_ages() {
    // Chronological; most recent is 5. Present ages: 3 -> 10, 1 -> 6, 0 -> 5.
    // Weight 0.5: (5 + 6*0.5 + 10*0.125) / (1 + 0.5 + 0.125) = 9.25 / 1.625
    assert_eq!(
        nowcast_window(&[Some(10.0), None, Some(6.0), Some(5.0)]).unwrap(),
        5.7
    );
}

#[test]
fn two_of_three_recent_hours_missing_is_insufficient() {
    let window = [Some(10.0), Some(10.0), None, None, Some(5.0)];
    assert!(matches!(
        nowcast_window(&window),
        Err(AirmonError::InsufficientData(_))
    ));
}

#[test]
fn all_missing_window_is_insufficient() {
    assert!(nowcast_window(&[None; 12]).is_err());
    assert!(nowcast_window(&[]).is_err());
}

#[test]
fn collection_nowcast_has_one_value_per_row() {
    let datetime: Vec<DateTime<Utc>> = (0..30)
        .map(|h| DateTime::from_timestamp(h * 3600, 0).unwrap())
        .collect();
    let values = ValueTable::new(datetime, vec![Column::new("s", vec![Some(8.0); 30])]).unwrap();
    let c = SeriesCollection::new(vec![SeriesMeta::new("s", "UTC")], values).unwrap();

    let out = c.nowcast("s").unwrap();
    assert_eq!(out.len(), 30);
    assert_eq!(out[0], None);
    assert!(out[1..].iter().all(|v| *v == Some(8.0)));
    assert_eq!(c.nowcast("missing"), Err(AirmonError::unknown_series("missing")));
}

proptest! {
    #[test]
    fn nowcast_stays_within_window_range(
        window in proptest::collection::vec(proptest::option::of(0.0f64..1000.0), 1..=12)
    ) {
        let present: Vec<f64> = window.iter().flatten().copied().collect();
        if let Ok(v) = nowcast_window(&window) {
            let lo = present.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(v >= (lo * 10.0).floor() / 10.0 - 1e-9);
            prop_assert!(v <= (hi * 10.0).ceil() / 10.0 + 1e-9);
        }
    }

    #[test]
    fn recency_rule_decides_success(
        window in proptest::collection::vec(proptest::option::of(0.0f64..1000.0), 1..=12)
    ) {
        let recent_valid = window.iter().rev().take(3).filter(|v| v.is_some()).count();
        prop_assert_eq!(nowcast_window(&window).is_ok(), recent_valid >= 2);
    }

    #[test]
    fn series_output_matches_input_length(
        values in proptest::collection::vec(proptest::option::of(0.0f64..1000.0), 0..60)
    ) {
        prop_assert_eq!(nowcast_series(&values).len(), values.len());
    }
}
