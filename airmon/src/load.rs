use std::sync::Arc;

use airmon_core::timeseries::align::combine_all;
use airmon_core::{AirmonError, Provider, SeriesCollection, Timespan};

use crate::Monitor;
use crate::core::capability;
use crate::util::with_request_deadline;

impl Monitor {
    /// Replace the current collection with the latest snapshot for `provider`.
    ///
    /// On failure the previous collection is kept and the error returned.
    ///
    /// # Errors
    /// `Unsupported` when no connector serves `provider`, `AllProvidersFailed`
    /// or `AllProvidersTimedOut` when every eligible connector failed, and
    /// `RequestTimeout` when the overall deadline passed.
    pub async fn load_latest(&mut self, provider: Provider) -> Result<(), AirmonError> {
        self.load(provider, Timespan::Latest).await
    }

    /// Replace the current collection with the daily snapshot for `provider`.
    ///
    /// # Errors
    /// As for [`load_latest`](Self::load_latest).
    pub async fn load_daily(&mut self, provider: Provider) -> Result<(), AirmonError> {
        self.load(provider, Timespan::Daily).await
    }

    /// Load one provider snapshot for an explicit timespan.
    ///
    /// # Errors
    /// As for [`load_latest`](Self::load_latest).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "airmon::load",
            skip(self),
            fields(capability = capability(timespan)),
        )
    )]
    pub async fn load(&mut self, provider: Provider, timespan: Timespan) -> Result<(), AirmonError> {
        let result = with_request_deadline(
            capability(timespan),
            self.cfg.request_timeout,
            self.fetch_collection(provider, timespan),
        )
        .await;
        self.commit(result)
    }

    /// Load several providers concurrently and combine them in the given order.
    ///
    /// State is replaced only when every fetch succeeded and the snapshots
    /// combined cleanly.
    ///
    /// # Errors
    /// `InvalidArg` for an empty provider list; otherwise the first failing
    /// provider's error in the given order, `SchemaMismatch` from combining,
    /// or `RequestTimeout` when the overall deadline passed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "airmon::load_many",
            skip(self),
            fields(capability = capability(timespan), providers = providers.len()),
        )
    )]
    pub async fn load_many(
        &mut self,
        providers: &[Provider],
        timespan: Timespan,
    ) -> Result<(), AirmonError> {
        if providers.is_empty() {
            return Err(AirmonError::InvalidArg(
                "load_many requires at least one provider".to_string(),
            ));
        }

        let fetch_all = async {
            let tasks = providers.iter().map(|p| self.fetch_collection(*p, timespan));
            let loaded = futures::future::join_all(tasks)
                .await
                .into_iter()
                .collect::<Result<Vec<SeriesCollection>, AirmonError>>()?;
            combine_all(&loaded)
        };
        let result = with_request_deadline(capability(timespan), self.cfg.request_timeout, fetch_all)
            .await;
        self.commit(result)
    }

    fn commit(&mut self, result: Result<SeriesCollection, AirmonError>) -> Result<(), AirmonError> {
        match result {
            Ok(collection) => {
                #[cfg(feature = "tracing")]
                tracing::info!(
                    series = collection.count(),
                    rows = collection.datetime().len(),
                    "replaced current collection"
                );
                self.current = Arc::new(collection);
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                log_failure(&e);
                Err(e)
            }
        }
    }
}

#[cfg(feature = "tracing")]
fn log_failure(e: &AirmonError) {
    if e.is_actionable() {
        for leaf in e.clone().flatten() {
            tracing::warn!(error = %leaf, "load failed; keeping previous collection");
        }
    } else {
        tracing::debug!(error = %e, "nothing to load; keeping previous collection");
    }
}
