use airmon_core::{AirmonError, Column, SeriesCollection, SeriesMeta, ValueTable};
use chrono::{DateTime, TimeZone, Timelike, Utc};

fn hourly(start: DateTime<Utc>, len: usize, tz: &str) -> SeriesCollection {
    let datetime: Vec<DateTime<Utc>> = (0..len)
        .map(|i| start + chrono::Duration::hours(i as i64))
        .collect();
    let values = (0..len).map(|i| Some(i as f64)).collect();
    let table = ValueTable::new(datetime, vec![Column::new("s1", values)]).unwrap();
    SeriesCollection::new(vec![SeriesMeta::new("s1", tz)], table).unwrap()
}

#[test]
fn sixty_four_hours_from_local_five_am_keep_one_day() {
    // Etc/GMT+7 is UTC-7: 12:00 UTC is 05:00 local.
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    let c = hourly(start, 64, "Etc/GMT+7");
    let trimmed = c.trim_date_named("Etc/GMT+7").unwrap();

    assert_eq!(trimmed.datetime().len(), 24);
    let tz: chrono_tz::Tz = "Etc/GMT+7".parse().unwrap();
    let first = trimmed.datetime()[0].with_timezone(&tz);
    let last = trimmed.datetime()[23].with_timezone(&tz);
    assert_eq!(first.hour(), 0);
    assert_eq!(last.hour(), 23);
    // 19 leading rows dropped.
    assert_eq!(trimmed.values("s1").unwrap()[0], Some(19.0));
    assert_eq!(trimmed.values("s1").unwrap()[23], Some(42.0));
}

#[test]
fn metadata_is_unchanged_and_input_untouched() {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 3, 0, 0).unwrap();
    let c = hourly(start, 50, "UTC");
    let trimmed = c.trim_date(chrono_tz::UTC);
    assert_eq!(trimmed.meta(), c.meta());
    assert_eq!(c.datetime().len(), 50);
    // 21 leading rows (03:00..23:00), tail ends at hour 4 so 5 rows go.
    assert_eq!(trimmed.datetime().len(), 24);
}

#[test]
fn already_complete_days_pass_through() {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    let c = hourly(start, 48, "UTC");
    assert_eq!(c.trim_date(chrono_tz::UTC), c);
}

#[test]
fn too_short_to_hold_a_day_is_empty() {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap();
    let c = hourly(start, 20, "UTC");
    let trimmed = c.trim_date(chrono_tz::UTC);
    assert!(trimmed.datetime().is_empty());
    assert_eq!(trimmed.values("s1").unwrap().len(), 0);
    assert_eq!(trimmed.ids(), vec!["s1"]);
}

#[test]
fn unknown_zone_name_is_invalid_argument() {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    let c = hourly(start, 24, "UTC");
    assert!(matches!(
        c.trim_date_named("Not/AZone"),
        Err(AirmonError::InvalidArg(_))
    ));
}
