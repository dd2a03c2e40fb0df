use std::sync::Arc;
use std::time::Duration;

use airmon_core::connector::MonitorConnector;
use airmon_core::{
    AirmonError, FetchStrategy, MonitorConfig, Provider, SeriesCollection, Timespan,
    collection_from_raw,
};

use crate::util::{collapse_errors, tag_err};

/// Orchestrator that loads archive snapshots through registered connectors and
/// holds the currently loaded collection.
pub struct Monitor {
    pub(crate) connectors: Vec<Arc<dyn MonitorConnector>>,
    pub(crate) cfg: MonitorConfig,
    pub(crate) current: Arc<SeriesCollection>,
}

/// Builder for constructing a `Monitor` with custom configuration.
pub struct MonitorBuilder {
    connectors: Vec<Arc<dyn MonitorConnector>>,
    cfg: MonitorConfig,
    initial: SeriesCollection,
}

impl Default for MonitorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorBuilder {
    /// Create a new builder with default configuration and an empty collection.
    ///
    /// Starts with no connectors; you must register at least one via
    /// [`with_connector`](Self::with_connector).
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: MonitorConfig::default(),
            initial: SeriesCollection::empty(),
        }
    }

    /// Register a connector.
    ///
    /// Registration order is the priority order under
    /// `FetchStrategy::PriorityWithFallback`. Duplicates are not removed.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn MonitorConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: MonitorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select the fetch strategy when several connectors serve a provider.
    ///
    /// - `PriorityWithFallback`: try connectors in registration order until one succeeds.
    /// - `Latency`: race all eligible connectors and keep the first success.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-connector fetch timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for a load, across every connector attempt.
    ///
    /// When exceeded, the load fails with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Start from an existing collection instead of an empty one.
    #[must_use]
    pub fn initial_collection(mut self, c: SeriesCollection) -> Self {
        self.initial = c;
        self
    }

    /// Build the `Monitor`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`with_connector`](Self::with_connector).
    pub fn build(self) -> Result<Monitor, AirmonError> {
        if self.connectors.is_empty() {
            return Err(AirmonError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        Ok(Monitor {
            connectors: self.connectors,
            cfg: self.cfg,
            current: Arc::new(self.initial),
        })
    }
}

/// Capability label used in errors and spans for a timespan.
pub(crate) const fn capability(timespan: Timespan) -> &'static str {
    match timespan {
        Timespan::Latest => "load_latest",
        Timespan::Daily => "load_daily",
    }
}

impl Monitor {
    /// Start building a new `Monitor`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use airmon::{Monitor, FetchStrategy};
    /// use airmon_airfire::AirFireConnector;
    ///
    /// let monitor = Monitor::builder()
    ///     .with_connector(Arc::new(AirFireConnector::new_default()))
    ///     .fetch_strategy(FetchStrategy::PriorityWithFallback)
    ///     .provider_timeout(std::time::Duration::from_secs(20))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> MonitorBuilder {
        MonitorBuilder::new()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.cfg
    }

    /// Wrap a connector future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "airmon::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, AirmonError>
    where
        Fut: core::future::Future<Output = Result<T, AirmonError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(AirmonError::provider_timeout(connector_name, capability)))
    }

    fn eligible(&self, provider: Provider) -> Vec<Arc<dyn MonitorConnector>> {
        self.connectors
            .iter()
            .filter(|c| c.supports_provider(provider))
            .cloned()
            .collect()
    }

    /// Fetch and normalize one snapshot through a single connector.
    ///
    /// A snapshot that fails normalization counts as that connector's failure,
    /// so the next connector still gets a chance.
    async fn attempt(
        connector: Arc<dyn MonitorConnector>,
        provider: Provider,
        timespan: Timespan,
        timeout: Duration,
    ) -> Result<SeriesCollection, AirmonError> {
        let name = connector.name();
        let raw = Self::provider_call_with_timeout(
            name,
            capability(timespan),
            timeout,
            connector.fetch(provider, timespan),
        )
        .await?;
        collection_from_raw(&raw).map_err(|e| tag_err(name, e))
    }

    /// Fetch one provider snapshot honoring the configured fetch strategy.
    ///
    /// Applies the per-connector timeout in both modes. The request deadline is
    /// applied by callers so it also covers fan-out loads.
    pub(crate) async fn fetch_collection(
        &self,
        provider: Provider,
        timespan: Timespan,
    ) -> Result<SeriesCollection, AirmonError> {
        match self.cfg.fetch_strategy {
            FetchStrategy::Latency => self.fetch_latency(provider, timespan).await,
            _ => self.fetch_priority_with_fallback(provider, timespan).await,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "airmon::core::fetch_priority_with_fallback",
            skip(self),
            fields(capability = capability(timespan)),
        )
    )]
    async fn fetch_priority_with_fallback(
        &self,
        provider: Provider,
        timespan: Timespan,
    ) -> Result<SeriesCollection, AirmonError> {
        let eligible = self.eligible(provider);
        let mut errors: Vec<AirmonError> = Vec::new();

        for c in &eligible {
            let name = c.name();
            match Self::attempt(Arc::clone(c), provider, timespan, self.cfg.provider_timeout).await
            {
                Ok(collection) => return Ok(collection),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(connector = name, error = %e, "connector failed; trying next");
                    errors.push(tag_err(name, e));
                }
            }
        }

        Err(collapse_errors(
            capability(timespan),
            !eligible.is_empty(),
            errors,
        ))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "airmon::core::fetch_latency",
            skip(self),
            fields(capability = capability(timespan)),
        )
    )]
    async fn fetch_latency(
        &self,
        provider: Provider,
        timespan: Timespan,
    ) -> Result<SeriesCollection, AirmonError> {
        use futures::stream::{FuturesUnordered, StreamExt};

        let eligible = self.eligible(provider);
        let mut futs: FuturesUnordered<_> = eligible
            .iter()
            .map(|c| {
                let c = Arc::clone(c);
                let timeout = self.cfg.provider_timeout;
                async move {
                    let name = c.name();
                    (name, Self::attempt(c, provider, timespan, timeout).await)
                }
            })
            .collect();

        let mut errors: Vec<AirmonError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(collection) => return Ok(collection),
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(collapse_errors(
            capability(timespan),
            !eligible.is_empty(),
            errors,
        ))
    }
}
