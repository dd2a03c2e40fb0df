use async_trait::async_trait;

use crate::AirmonError;
use crate::ingest::RawResources;
pub use airmon_types::ConnectorKey;
use airmon_types::{Provider, Timespan};

/// The source of raw archive snapshots.
///
/// Connectors only fetch text; all cleaning happens in [`crate::ingest`], so
/// two connectors serving the same archive yield identical collections.
#[async_trait]
pub trait MonitorConnector: Send + Sync {
    /// A stable identifier used in errors and logs (e.g., "airmon-airfire").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to serve a given provider.
    ///
    /// Default: returns `false` for all providers. Connectors must explicitly
    /// override this method to declare which providers they serve.
    fn supports_provider(&self, provider: Provider) -> bool {
        let _ = provider;
        false
    }

    /// Fetch the metadata and data tables for one provider and timespan.
    async fn fetch(
        &self,
        provider: Provider,
        timespan: Timespan,
    ) -> Result<RawResources, AirmonError>;
}
