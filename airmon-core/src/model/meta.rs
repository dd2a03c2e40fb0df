use serde::{Deserialize, Serialize};

use crate::AirmonError;

/// Core metadata column names, in archive order.
///
/// Ingestion keeps exactly these columns; `metadata_field` accepts exactly these names.
pub const CORE_METADATA_NAMES: [&str; 18] = [
    "deviceDeploymentID",
    "deviceID",
    "deviceType",
    "deviceDescription",
    "pollutant",
    "units",
    "dataIngestSource",
    "locationID",
    "locationName",
    "longitude",
    "latitude",
    "elevation",
    "countryCode",
    "stateCode",
    "countyName",
    "timezone",
    "AQSID",
    "fullAQSID",
];

/// One metadata record describing a single deployed sensor series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMeta {
    /// Globally unique series identifier, stable across loads.
    #[serde(rename = "deviceDeploymentID")]
    pub device_deployment_id: String,
    /// Physical device identifier; one device may have several deployments.
    #[serde(rename = "deviceID")]
    pub device_id: Option<String>,
    /// Instrument model.
    pub device_type: Option<String>,
    /// Free-text description of the device.
    pub device_description: Option<String>,
    /// Measured pollutant, `PM2.5` for this archive.
    pub pollutant: Option<String>,
    /// Reading units, usually `UG/M3`.
    pub units: Option<String>,
    /// Ingest-source tag (e.g. "AirNow", "WRCC").
    pub data_ingest_source: Option<String>,
    /// Location identifier shared by deployments at one site.
    #[serde(rename = "locationID")]
    pub location_id: Option<String>,
    /// Human-readable site name.
    pub location_name: Option<String>,
    /// Decimal degrees east.
    pub longitude: Option<f64>,
    /// Decimal degrees north.
    pub latitude: Option<f64>,
    /// Meters above sea level.
    pub elevation: Option<f64>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// State or province code.
    pub state_code: Option<String>,
    /// County name, where known.
    pub county_name: Option<String>,
    /// IANA zone name; required by every local-time operation.
    pub timezone: Option<String>,
    /// EPA AQS site identifier.
    #[serde(rename = "AQSID")]
    pub aqs_id: Option<String>,
    /// AQS identifier including country and parameter prefixes.
    #[serde(rename = "fullAQSID")]
    pub full_aqs_id: Option<String>,
}

/// A single scalar read out of a metadata record.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    /// Text column value; `None` when missing.
    Text(Option<String>),
    /// Numeric column value (longitude/latitude/elevation); `None` when missing.
    Number(Option<f64>),
}

impl MetaValue {
    /// Borrow the text payload, if this is a present text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(Some(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The numeric payload, if this is a present numeric value.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => *v,
            Self::Text(_) => None,
        }
    }

    /// True when the underlying value is missing.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Text(None) | Self::Number(None))
    }
}

impl SeriesMeta {
    /// Minimal record carrying only an identifier and timezone.
    pub fn new(id: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            device_deployment_id: id.into(),
            timezone: Some(timezone.into()),
            ..Self::default()
        }
    }

    /// Read a field by its core column name.
    ///
    /// # Errors
    /// Returns `UnknownField` when `name` is not in [`CORE_METADATA_NAMES`].
    pub fn field(&self, name: &str) -> Result<MetaValue, AirmonError> {
        let text = |v: &Option<String>| Ok(MetaValue::Text(v.clone()));
        match name {
            "deviceDeploymentID" => Ok(MetaValue::Text(Some(self.device_deployment_id.clone()))),
            "deviceID" => text(&self.device_id),
            "deviceType" => text(&self.device_type),
            "deviceDescription" => text(&self.device_description),
            "pollutant" => text(&self.pollutant),
            "units" => text(&self.units),
            "dataIngestSource" => text(&self.data_ingest_source),
            "locationID" => text(&self.location_id),
            "locationName" => text(&self.location_name),
            "longitude" => Ok(MetaValue::Number(self.longitude)),
            "latitude" => Ok(MetaValue::Number(self.latitude)),
            "elevation" => Ok(MetaValue::Number(self.elevation)),
            "countryCode" => text(&self.country_code),
            "stateCode" => text(&self.state_code),
            "countyName" => text(&self.county_name),
            "timezone" => text(&self.timezone),
            "AQSID" => text(&self.aqs_id),
            "fullAQSID" => text(&self.full_aqs_id),
            other => Err(AirmonError::unknown_field(other)),
        }
    }

    /// Assign a text cell by core column name; numeric columns are parsed.
    ///
    /// Returns `false` when `name` is not a core column, leaving the record unchanged.
    pub(crate) fn set_from_text(&mut self, name: &str, value: Option<String>) -> bool {
        let number = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<f64>().ok());
        match name {
            "deviceDeploymentID" => self.device_deployment_id = value.unwrap_or_default(),
            "deviceID" => self.device_id = value,
            "deviceType" => self.device_type = value,
            "deviceDescription" => self.device_description = value,
            "pollutant" => self.pollutant = value,
            "units" => self.units = value,
            "dataIngestSource" => self.data_ingest_source = value,
            "locationID" => self.location_id = value,
            "locationName" => self.location_name = value,
            "longitude" => self.longitude = number(&value),
            "latitude" => self.latitude = number(&value),
            "elevation" => self.elevation = number(&value),
            "countryCode" => self.country_code = value,
            "stateCode" => self.state_code = value,
            "countyName" => self.county_name = value,
            "timezone" => self.timezone = value,
            "AQSID" => self.aqs_id = value,
            "fullAQSID" => self.full_aqs_id = value,
            _ => return false,
        }
        true
    }

    /// Parse the record's timezone into a `chrono_tz::Tz`.
    ///
    /// # Errors
    /// `Data` when the record has no timezone, `InvalidArg` when the name is not a known IANA zone.
    pub fn tz(&self) -> Result<chrono_tz::Tz, AirmonError> {
        let name = self.timezone.as_deref().ok_or_else(|| {
            AirmonError::Data(format!(
                "series {} has no timezone",
                self.device_deployment_id
            ))
        })?;
        crate::timeseries::trim::parse_tz(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_core_name_is_readable() {
        let m = SeriesMeta::new("a_airnow.1", "America/Denver");
        for name in CORE_METADATA_NAMES {
            assert!(m.field(name).is_ok(), "field {name} should resolve");
        }
        assert_eq!(
            m.field("timezone").unwrap().as_text(),
            Some("America/Denver")
        );
        assert!(m.field("longitude").unwrap().is_missing());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let m = SeriesMeta::new("a", "UTC");
        assert_eq!(
            m.field("last_PM2.5"),
            Err(AirmonError::unknown_field("last_PM2.5"))
        );
    }

    #[test]
    fn numeric_columns_are_coerced() {
        let mut m = SeriesMeta::default();
        assert!(m.set_from_text("longitude", Some("-114.0909".into())));
        assert!(m.set_from_text("elevation", Some("not-a-number".into())));
        assert!(!m.set_from_text("siteName", Some("x".into())));
        assert_eq!(m.longitude, Some(-114.0909));
        assert_eq!(m.elevation, None);
    }

    #[test]
    fn serializes_with_archive_column_names() {
        let m = SeriesMeta::new("abc_wrcc.s139", "America/Denver");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["deviceDeploymentID"], "abc_wrcc.s139");
        assert_eq!(v["timezone"], "America/Denver");
        assert!(v.get("fullAQSID").is_some());
        assert!(v.get("dataIngestSource").is_some());
    }
}
