use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the airmon workspace.
///
/// Covers lookups against a collection (unknown series or field), schema
/// problems in ingested tables, the expected "not enough recent data" outcome
/// of a NowCast window, and provider-tagged ingestion failures.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AirmonError {
    /// The identifier is not present in the collection.
    #[error("unknown series: {id}")]
    UnknownSeries {
        /// The `deviceDeploymentID` that was looked up.
        id: String,
    },

    /// The metadata field name is not one of the core metadata columns.
    #[error("unknown metadata field: {field}")]
    UnknownField {
        /// The requested field name.
        field: String,
    },

    /// A table lacks a required column or its time axis is incompatible.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A NowCast window failed the recency check or holds no valid readings.
    ///
    /// This is an expected outcome rather than a fault; series-level helpers
    /// report it as a missing value.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Issues with the returned or expected data (bad timestamps, ragged rows, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// No registered connector can serve the request.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "latest/airnow").
        capability: String,
    },

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "latest/wrcc").
        capability: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// All eligible connectors failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<AirmonError>),

    /// All attempted connectors timed out for the requested capability.
    #[error("all providers timed out: {capability}")]
    AllProvidersTimedOut {
        /// Capability label that timed out across all connectors.
        capability: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl AirmonError {
    /// Helper: build an `UnknownSeries` error for an identifier.
    pub fn unknown_series(id: impl Into<String>) -> Self {
        Self::UnknownSeries { id: id.into() }
    }

    /// Helper: build an `UnknownField` error for a field name.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Missing-data outcomes and capability absence are not actionable.
    /// Aggregates are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::InsufficientData(_) => false,
            Self::AllProvidersFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllProvidersFailed` aggregates into a single list of leaf errors.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(inner) => inner.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
