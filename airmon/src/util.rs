use airmon_core::AirmonError;

/// Run `fut` under an optional overall deadline.
///
/// On expiry the result is `RequestTimeout(capability)`.
pub async fn with_request_deadline<F, T>(
    capability: &'static str,
    deadline: Option<std::time::Duration>,
    fut: F,
) -> Result<T, AirmonError>
where
    F: core::future::Future<Output = Result<T, AirmonError>>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .unwrap_or_else(|_| Err(AirmonError::request_timeout(capability))),
        None => fut.await,
    }
}

/// Collapse a set of connector errors into a uniform `AirmonError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - Else → `AllProvidersFailed(errors)`.
///
/// Aggregates returned by a connector are flattened into their leaves first.
pub fn collapse_errors(
    capability: &str,
    attempted_any: bool,
    errors: Vec<AirmonError>,
) -> AirmonError {
    if !attempted_any {
        return AirmonError::unsupported(capability);
    }
    let errors: Vec<AirmonError> = errors.into_iter().flat_map(AirmonError::flatten).collect();
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, AirmonError::ProviderTimeout { .. }))
    {
        return AirmonError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    AirmonError::AllProvidersFailed(errors)
}

/// Attribute an error to the connector that produced it.
///
/// Errors that already carry a connector, a timeout, or a data-shape kind are
/// kept; anything else becomes `Connector { connector, msg }`.
pub fn tag_err(connector: &str, e: AirmonError) -> AirmonError {
    match e {
        e @ (AirmonError::Connector { .. }
        | AirmonError::ProviderTimeout { .. }
        | AirmonError::RequestTimeout { .. }
        | AirmonError::AllProvidersTimedOut { .. }
        | AirmonError::AllProvidersFailed(_)
        | AirmonError::SchemaMismatch(_)
        | AirmonError::Data(_)) => e,
        other => AirmonError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_errors_all_timeouts() {
        let errors = vec![
            AirmonError::provider_timeout("p1", "load_latest"),
            AirmonError::provider_timeout("p2", "load_latest"),
        ];
        match collapse_errors("load_latest", true, errors) {
            AirmonError::AllProvidersTimedOut { capability } => {
                assert_eq!(capability, "load_latest");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn collapse_errors_unsupported_when_no_attempts() {
        match collapse_errors("load_daily", false, vec![]) {
            AirmonError::Unsupported { capability } => assert_eq!(capability, "load_daily"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn collapse_errors_mixed_maps_to_all_failed() {
        let errors = vec![
            AirmonError::provider_timeout("p1", "load_latest"),
            AirmonError::Other("oops".into()),
        ];
        match collapse_errors("load_latest", true, errors.clone()) {
            AirmonError::AllProvidersFailed(es) => assert_eq!(es, errors),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn collapse_errors_flattens_nested_aggregates() {
        let nested = AirmonError::AllProvidersFailed(vec![
            AirmonError::provider_timeout("inner", "load_latest"),
            AirmonError::Data("ragged".into()),
        ]);
        let errors = vec![AirmonError::connector("p1", "HTTP 500"), nested];
        match collapse_errors("load_latest", true, errors) {
            AirmonError::AllProvidersFailed(es) => assert_eq!(
                es,
                vec![
                    AirmonError::connector("p1", "HTTP 500"),
                    AirmonError::provider_timeout("inner", "load_latest"),
                    AirmonError::Data("ragged".into()),
                ]
            ),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn collapse_errors_sees_timeouts_inside_aggregates() {
        let nested = AirmonError::AllProvidersFailed(vec![AirmonError::provider_timeout(
            "inner",
            "load_daily",
        )]);
        let errors = vec![AirmonError::provider_timeout("p1", "load_daily"), nested];
        assert_eq!(
            collapse_errors("load_daily", true, errors),
            AirmonError::AllProvidersTimedOut {
                capability: "load_daily".into()
            }
        );
    }

    #[test]
    fn tag_err_wraps_untagged_errors_only() {
        assert_eq!(
            tag_err("p1", AirmonError::Other("x".into())),
            AirmonError::connector("p1", "unknown error: x")
        );
        let data = AirmonError::Data("ragged".into());
        assert_eq!(tag_err("p1", data.clone()), data);
    }

    #[tokio::test]
    async fn deadline_maps_to_request_timeout() {
        let slow = async {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            Ok::<_, AirmonError>(1)
        };
        let err = with_request_deadline(
            "load_latest",
            Some(std::time::Duration::from_millis(10)),
            slow,
        )
        .await
        .unwrap_err();
        assert_eq!(err, AirmonError::request_timeout("load_latest"));
    }
}
