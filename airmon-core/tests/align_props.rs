use airmon_core::{AirmonError, Column, SeriesCollection, SeriesMeta, ValueTable, combine_all};
use chrono::{DateTime, Utc};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn ts(hour: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 / 3600 * 3600 + hour * 3600, 0).unwrap()
}

fn collection(id: &str, readings: &BTreeMap<i64, Option<f64>>) -> SeriesCollection {
    let values = ValueTable::new(
        readings.keys().map(|h| ts(*h)).collect(),
        vec![Column::new(id, readings.values().copied().collect())],
    )
    .unwrap();
    SeriesCollection::new(vec![SeriesMeta::new(id, "UTC")], values).unwrap()
}

fn arb_readings() -> impl Strategy<Value = BTreeMap<i64, Option<f64>>> {
    proptest::collection::btree_map(0i64..240, proptest::option::of(0.0f64..500.0), 0..60)
}

proptest! {
    #[test]
    fn outer_join_preserves_every_reading(a in arb_readings(), b in arb_readings()) {
        let merged = collection("a", &a).combine(&collection("b", &b)).unwrap();

        let union: BTreeSet<i64> = a.keys().chain(b.keys()).copied().collect();
        let axis: Vec<DateTime<Utc>> = union.iter().map(|h| ts(*h)).collect();
        prop_assert_eq!(merged.datetime(), axis.as_slice());
        prop_assert_eq!(merged.ids(), vec!["a", "b"]);

        for (i, h) in union.iter().enumerate() {
            prop_assert_eq!(merged.values("a").unwrap()[i], a.get(h).copied().flatten());
            prop_assert_eq!(merged.values("b").unwrap()[i], b.get(h).copied().flatten());
        }
    }

    #[test]
    fn empty_collection_is_identity(a in arb_readings()) {
        let c = collection("a", &a);
        let empty = SeriesCollection::empty();
        prop_assert_eq!(&c.combine(&empty).unwrap(), &c);
        prop_assert_eq!(&empty.combine(&c).unwrap(), &c);
    }

    #[test]
    fn combine_all_matches_pairwise(a in arb_readings(), b in arb_readings(), c in arb_readings()) {
        let (ca, cb, cc) = (collection("a", &a), collection("b", &b), collection("c", &c));
        let folded = combine_all([&ca, &cb, &cc]).unwrap();
        let pairwise = ca.combine(&cb).unwrap().combine(&cc).unwrap();
        prop_assert_eq!(folded, pairwise);
    }
}

#[test]
fn half_hour_offset_axes_are_rejected() {
    let on_hour = collection("a", &BTreeMap::from([(0, Some(1.0))]));
    let values = ValueTable::new(
        vec![ts(0) + chrono::Duration::minutes(30)],
        vec![Column::new("b", vec![Some(2.0)])],
    )
    .unwrap();
    let half_past = SeriesCollection::new(vec![SeriesMeta::new("b", "UTC")], values).unwrap();

    assert!(matches!(
        on_hour.combine(&half_past),
        Err(AirmonError::SchemaMismatch(_))
    ));
}

#[test]
fn unchanged_columns_share_storage_when_axes_match() {
    let readings = BTreeMap::from([(0, Some(1.0)), (1, None)]);
    let a = collection("a", &readings);
    let b = collection("b", &readings);
    let merged = a.combine(&b).unwrap();
    let before = a.values_table().column("a").unwrap();
    let after = merged.values_table().column("a").unwrap();
    assert!(after.shares_storage_with(before));
}

#[test]
fn overlapping_identifiers_are_kept_twice() {
    let a = collection("x", &BTreeMap::from([(0, Some(1.0))]));
    let b = collection("x", &BTreeMap::from([(1, Some(2.0))]));
    let merged = a.combine(&b).unwrap();
    assert_eq!(merged.ids(), vec!["x", "x"]);
    assert_eq!(merged.values_table().columns().len(), 2);
    // Lookups resolve to the first occurrence.
    assert_eq!(merged.values("x").unwrap(), &[Some(1.0), None]);
}
