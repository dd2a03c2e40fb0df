use airmon_core::ingest::{normalize_data, normalize_meta};
use airmon_core::{AirmonError, MetaValue, RawResources, RawTable, collection_from_raw};
use chrono::{TimeZone, Utc};

fn meta_table() -> RawTable {
    RawTable::new(
        [
            "deviceDeploymentID",
            "locationName",
            "longitude",
            "latitude",
            "timezone",
            "dataIngestUnitID",
        ],
        [
            ["a_airnow.1", "Missoula", "-114.09", "46.87", "America/Denver", "u1"],
            ["b_wrcc.s139", "NA", "NA", "", "America/Denver", "s139"],
        ],
    )
}

fn data_table() -> RawTable {
    RawTable::new(
        ["datetime", "a_airnow.1", "b_wrcc.s139"],
        [
            ["2023-01-01 00:00:00+0000", "4.2", "NA"],
            ["2023-01-01 01:00:00+0000", "-1.5", "7"],
            ["2023-01-01 02:00:00+0000", "", "NaN"],
        ],
    )
}

#[test]
fn metadata_keeps_core_columns_and_clears_na() {
    let meta = normalize_meta(&meta_table()).unwrap();
    assert_eq!(meta.len(), 2);
    assert_eq!(meta[0].location_name.as_deref(), Some("Missoula"));
    assert_eq!(meta[0].longitude, Some(-114.09));
    assert_eq!(meta[1].location_name, None);
    assert_eq!(meta[1].longitude, None);
    assert_eq!(meta[1].latitude, None);
    // Core columns absent from the input are missing, not errors.
    assert_eq!(meta[0].aqs_id, None);

    let v = serde_json::to_value(&meta[0]).unwrap();
    assert!(v.get("dataIngestUnitID").is_none());
}

#[test]
fn metadata_without_identifier_column_is_schema_mismatch() {
    let raw = RawTable::new(["locationName"], [["x"]]);
    assert!(matches!(
        normalize_meta(&raw),
        Err(AirmonError::SchemaMismatch(_))
    ));
}

#[test]
fn data_cells_are_cleaned() {
    let table = normalize_data(&data_table()).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.datetime()[0],
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        table.column("a_airnow.1").unwrap().values(),
        &[Some(4.2), Some(0.0), None]
    );
    assert_eq!(
        table.column("b_wrcc.s139").unwrap().values(),
        &[None, Some(7.0), None]
    );
}

#[test]
fn data_without_leading_datetime_is_schema_mismatch() {
    let raw = RawTable::new(["a", "datetime"], [["1", "2023-01-01 00:00"]]);
    assert!(matches!(
        normalize_data(&raw),
        Err(AirmonError::SchemaMismatch(_))
    ));
}

#[test]
fn bad_timestamps_and_ragged_rows_are_data_errors() {
    let bad_ts = RawTable::new(["datetime", "a"], [["yesterday", "1"]]);
    assert!(matches!(normalize_data(&bad_ts), Err(AirmonError::Data(_))));

    let ragged = RawTable::new(["datetime", "a"], [vec!["2023-01-01 00:00"]]);
    assert!(matches!(normalize_data(&ragged), Err(AirmonError::Data(_))));
}

#[test]
fn out_of_order_timestamps_are_schema_mismatch() {
    let raw = RawTable::new(
        ["datetime", "a"],
        [["2023-01-01 01:00", "1"], ["2023-01-01 00:00", "2"]],
    );
    assert!(matches!(
        normalize_data(&raw),
        Err(AirmonError::SchemaMismatch(_))
    ));
}

#[test]
fn snapshot_becomes_a_collection() {
    let c = collection_from_raw(&RawResources {
        meta: meta_table(),
        data: data_table(),
    })
    .unwrap();
    assert_eq!(c.ids(), vec!["a_airnow.1", "b_wrcc.s139"]);
    assert_eq!(
        c.metadata_field("a_airnow.1", "timezone").unwrap(),
        MetaValue::Text(Some("America/Denver".into()))
    );
    assert!(c.values("b_wrcc.s139").unwrap().iter().flatten().all(|v| *v >= 0.0));
}

#[test]
fn snapshot_with_unmatched_series_is_rejected() {
    let data = RawTable::new(
        ["datetime", "a_airnow.1"],
        [["2023-01-01 00:00", "1"]],
    );
    let err = collection_from_raw(&RawResources {
        meta: meta_table(),
        data,
    })
    .unwrap_err();
    assert!(matches!(err, AirmonError::Data(msg) if msg.contains("b_wrcc.s139")));
}
