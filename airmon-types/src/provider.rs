//! Sensor network and archive timespan identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AirmonError;

/// Upstream monitoring network whose PM2.5 files are ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// EPA AirNow permanent monitors.
    AirNow,
    /// AIRSIS temporary monitors.
    Airsis,
    /// Western Regional Climate Center temporary monitors.
    Wrcc,
}

impl Provider {
    /// All known providers in a stable order.
    pub const ALL: [Self; 3] = [Self::AirNow, Self::Airsis, Self::Wrcc];

    /// Lowercase name used in archive file names (e.g. `airnow`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AirNow => "airnow",
            Self::Airsis => "airsis",
            Self::Wrcc => "wrcc",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = AirmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "airnow" => Ok(Self::AirNow),
            "airsis" => Ok(Self::Airsis),
            "wrcc" => Ok(Self::Wrcc),
            other => Err(AirmonError::InvalidArg(format!(
                "unknown provider '{other}' (expected airnow|airsis|wrcc)"
            ))),
        }
    }
}

/// Archive snapshot to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    /// Most recent ~10 days, refreshed every few minutes.
    #[default]
    Latest,
    /// Most recent ~45 days, refreshed daily.
    Daily,
}

impl Timespan {
    /// Lowercase name used in archive paths (e.g. `latest`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Daily => "daily",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("AirNow".parse::<Provider>().unwrap(), Provider::AirNow);
        assert_eq!(" wrcc ".parse::<Provider>().unwrap(), Provider::Wrcc);
        assert!(matches!(
            "purpleair".parse::<Provider>(),
            Err(AirmonError::InvalidArg(_))
        ));
    }

    #[test]
    fn names_match_archive_paths() {
        for p in Provider::ALL {
            assert_eq!(p.to_string().parse::<Provider>().unwrap(), p);
        }
        assert_eq!(Timespan::Daily.as_str(), "daily");
        assert_eq!(Timespan::default(), Timespan::Latest);
    }
}
