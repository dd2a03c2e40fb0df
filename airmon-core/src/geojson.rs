//! GeoJSON point features built from current status.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AirmonError;
use crate::model::SeriesCollection;
use crate::timeseries::status::SeriesStatus;

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// One feature per series, in metadata order.
    pub features: Vec<Feature>,
}

/// A GeoJSON `Feature` with point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Sensor location.
    pub geometry: Geometry,
    /// Per-series status properties.
    pub properties: FeatureProperties,
}

/// A GeoJSON `Point`. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Always `"Point"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude]`; either may be `null` when unknown.
    pub coordinates: [Option<f64>; 2],
}

/// Properties carried by each feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    /// Series identifier.
    #[serde(rename = "deviceDeploymentID")]
    pub device_deployment_id: String,
    /// Site name, when the metadata carries one.
    #[serde(rename = "locationName")]
    pub location_name: Option<String>,
    /// RFC 3339 timestamp of the last valid reading.
    pub last_time: Option<String>,
    /// Last valid PM2.5 reading.
    pub last_pm25: Option<f64>,
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<SeriesStatus> for Feature {
    fn from(s: SeriesStatus) -> Self {
        Self {
            kind: "Feature".into(),
            geometry: Geometry {
                kind: "Point".into(),
                coordinates: [s.meta.longitude, s.meta.latitude],
            },
            properties: FeatureProperties {
                device_deployment_id: s.meta.device_deployment_id,
                location_name: s.meta.location_name,
                last_time: s.last_valid_datetime.map(rfc3339),
                last_pm25: s.last_valid_pm25,
            },
        }
    }
}

impl FeatureCollection {
    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    /// `Other` if serialization fails.
    pub fn to_json(&self) -> Result<String, AirmonError> {
        serde_json::to_string(self).map_err(|e| AirmonError::Other(e.to_string()))
    }
}

/// One point feature per series carrying its current status.
#[must_use]
pub fn to_geojson(c: &SeriesCollection) -> FeatureCollection {
    FeatureCollection {
        kind: "FeatureCollection".into(),
        features: c.current_status().into_iter().map(Feature::from).collect(),
    }
}
