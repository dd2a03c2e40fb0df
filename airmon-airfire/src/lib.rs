//! airmon-airfire
//!
//! Public connector that implements `MonitorConnector` on top of the USFS
//! AirFire monitoring v2 archive. Each snapshot is two CSV files:
//!
//! `{base}/{timespan}/data/{provider}_PM2.5_{timespan}_meta.csv`
//! `{base}/{timespan}/data/{provider}_PM2.5_{timespan}_data.csv`
#![warn(missing_docs)]

/// CSV text splitting for archive files.
pub mod records;

use async_trait::async_trait;
use airmon_core::connector::{ConnectorKey, MonitorConnector};
use airmon_core::{AirmonError, Provider, RawResources, RawTable, Timespan};

/// Default archive root.
pub const DEFAULT_BASE_URL: &str =
    "https://airfire-data-exports.s3.us-west-2.amazonaws.com/monitoring/v2";

/// Which half of a snapshot a file holds.
#[derive(Debug, Clone, Copy)]
enum Part {
    Meta,
    Data,
}

impl Part {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Data => "data",
        }
    }
}

/// Public connector type. Production users will construct with `AirFireConnector::new_default()`.
#[derive(Debug, Clone)]
pub struct AirFireConnector {
    client: reqwest::Client,
    base_url: String,
}

impl Default for AirFireConnector {
    fn default() -> Self {
        Self::new_default()
    }
}

impl AirFireConnector {
    /// Static connector key for orchestrator configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("airmon-airfire");

    /// Connector against [`DEFAULT_BASE_URL`] with a default HTTP client.
    #[must_use]
    pub fn new_default() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Connector using a caller-configured HTTP client (proxies, TLS, timeouts).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the connector at another archive root (mirrors, test servers).
    /// A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The archive root in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, provider: Provider, timespan: Timespan, part: Part) -> String {
        format!(
            "{base}/{timespan}/data/{provider}_PM2.5_{timespan}_{part}.csv",
            base = self.base_url,
            part = part.as_str(),
        )
    }

    fn http_err(e: &reqwest::Error) -> AirmonError {
        AirmonError::connector(Self::KEY.as_str(), e.to_string())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "airmon_airfire::get_table",
            skip_all,
            fields(provider = %provider, timespan = %timespan, part = part.as_str()),
            err,
        )
    )]
    async fn get_table(
        &self,
        provider: Provider,
        timespan: Timespan,
        part: Part,
    ) -> Result<RawTable, AirmonError> {
        let url = self.url(provider, timespan, part);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::http_err(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AirmonError::connector(
                Self::KEY.as_str(),
                format!("HTTP {} for {url}", status.as_u16()),
            ));
        }

        let text = response.text().await.map_err(|e| Self::http_err(&e))?;
        records::parse_csv(&text)
    }
}

#[async_trait]
impl MonitorConnector for AirFireConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "USFS AirFire"
    }

    fn supports_provider(&self, provider: Provider) -> bool {
        matches!(provider, Provider::AirNow | Provider::Airsis | Provider::Wrcc)
    }

    async fn fetch(
        &self,
        provider: Provider,
        timespan: Timespan,
    ) -> Result<RawResources, AirmonError> {
        let (meta, data) = tokio::try_join!(
            self.get_table(provider, timespan, Part::Meta),
            self.get_table(provider, timespan, Part::Data),
        )?;
        Ok(RawResources { meta, data })
    }
}
