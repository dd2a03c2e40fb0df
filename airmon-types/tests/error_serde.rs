use airmon_types::AirmonError;

#[test]
fn error_roundtrip_preserves_variant() {
    let errs = vec![
        AirmonError::unknown_series("abc_airnow.123"),
        AirmonError::unknown_field("bogus"),
        AirmonError::SchemaMismatch("no datetime column".into()),
        AirmonError::AllProvidersFailed(vec![
            AirmonError::connector("airmon-airfire", "HTTP 503"),
            AirmonError::provider_timeout("airmon-mock", "latest/wrcc"),
        ]),
    ];
    for e in errs {
        let json = serde_json::to_string(&e).expect("serialize error");
        let de: AirmonError = serde_json::from_str(&json).expect("deserialize error");
        assert_eq!(de, e);
    }
}

#[test]
fn missing_data_is_not_actionable() {
    assert!(!AirmonError::InsufficientData("recency".into()).is_actionable());
    assert!(!AirmonError::unsupported("latest/wrcc").is_actionable());
    assert!(AirmonError::unknown_series("x").is_actionable());
    let agg = AirmonError::AllProvidersFailed(vec![
        AirmonError::unsupported("latest/wrcc"),
        AirmonError::connector("c", "boom"),
    ]);
    assert!(agg.is_actionable());
}

#[test]
fn flatten_unwraps_nested_aggregates() {
    let nested = AirmonError::AllProvidersFailed(vec![
        AirmonError::Other("a".into()),
        AirmonError::AllProvidersFailed(vec![AirmonError::Other("b".into())]),
    ]);
    let leaves = nested.flatten();
    assert_eq!(
        leaves,
        vec![AirmonError::Other("a".into()), AirmonError::Other("b".into())]
    );
}
