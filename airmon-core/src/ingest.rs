//! Normalization of raw text tables into typed collections.
//!
//! Connectors deliver the archive's metadata and data tables as plain text
//! cells. Everything below is shared by all connectors so that cleaning rules
//! are applied identically regardless of where the text came from.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AirmonError;
use crate::model::{CORE_METADATA_NAMES, Column, SeriesCollection, SeriesMeta, ValueTable};

/// Name of the required first column of a data table.
pub const DATETIME_HEADER: &str = "datetime";
/// Name of the required identifier column of a metadata table.
pub const ID_HEADER: &str = "deviceDeploymentID";

/// A header row plus text rows, as read from a delimited file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names.
    pub headers: Vec<String>,
    /// Rows of cells; each row has one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from anything string-like.
    pub fn new<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    fn position(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == header)
    }

    fn check_widths(&self) -> Result<(), AirmonError> {
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != self.headers.len())
        {
            Some((i, r)) => Err(AirmonError::Data(format!(
                "row {i} has {} cells for {} headers",
                r.len(),
                self.headers.len()
            ))),
            None => Ok(()),
        }
    }
}

/// The pair of tables that make up one archive snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawResources {
    /// One row per series.
    pub meta: RawTable,
    /// One row per hour; first column `datetime`, then one column per series.
    pub data: RawTable,
}

/// `"NA"` and blank cells are missing.
fn text_cell(cell: &str) -> Option<String> {
    let t = cell.trim();
    (!t.is_empty() && t != "NA").then(|| t.to_string())
}

/// Parse a reading; missing, unparseable and non-finite cells are `None`,
/// negative readings are lifted to zero.
fn value_cell(cell: &str) -> Option<f64> {
    let t = cell.trim();
    if t.is_empty() || t == "NA" {
        return None;
    }
    t.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
}

/// Accepts RFC 3339, `YYYY-mm-dd HH:MM:SS` with a `+0000` style offset, and
/// naive `YYYY-mm-dd HH:MM[:SS]` taken as UTC.
pub(crate) fn parse_timestamp(cell: &str) -> Result<DateTime<Utc>, AirmonError> {
    let t = cell.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(t, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AirmonError::Data(format!("unparseable timestamp '{t}'")))
}

/// Normalize a raw metadata table into records.
///
/// Only core metadata columns are kept; core columns absent from the input
/// are `None`. Longitude, latitude and elevation are parsed as numbers.
///
/// # Errors
/// `SchemaMismatch` when there is no `deviceDeploymentID` column, `Data` when
/// a row is ragged or has a missing identifier.
pub fn normalize_meta(raw: &RawTable) -> Result<Vec<SeriesMeta>, AirmonError> {
    if raw.position(ID_HEADER).is_none() {
        return Err(AirmonError::SchemaMismatch(format!(
            "metadata has no {ID_HEADER} column"
        )));
    }
    raw.check_widths()?;

    let kept: Vec<(usize, &str)> = raw
        .headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let h = h.trim();
            CORE_METADATA_NAMES.contains(&h).then_some((i, h))
        })
        .collect();

    #[cfg(feature = "tracing")]
    {
        let dropped: Vec<&str> = raw
            .headers
            .iter()
            .map(|h| h.trim())
            .filter(|h| !CORE_METADATA_NAMES.contains(h))
            .collect();
        if !dropped.is_empty() {
            tracing::debug!(count = dropped.len(), columns = ?dropped, "dropped non-core metadata columns");
        }
    }

    raw.rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut meta = SeriesMeta::default();
            for &(col, name) in &kept {
                meta.set_from_text(name, text_cell(&row[col]));
            }
            if meta.device_deployment_id.is_empty() {
                return Err(AirmonError::Data(format!(
                    "metadata row {i} has no {ID_HEADER}"
                )));
            }
            Ok(meta)
        })
        .collect()
}

/// Normalize a raw data table into a value table.
///
/// # Errors
/// `SchemaMismatch` when the first column is not `datetime` or the timestamps
/// are not strictly increasing; `Data` for a ragged row or a bad timestamp.
pub fn normalize_data(raw: &RawTable) -> Result<ValueTable, AirmonError> {
    match raw.headers.first() {
        Some(h) if h.trim() == DATETIME_HEADER => {}
        _ => {
            return Err(AirmonError::SchemaMismatch(format!(
                "data table must start with a {DATETIME_HEADER} column"
            )));
        }
    }
    raw.check_widths()?;

    let datetime = raw
        .rows
        .iter()
        .map(|row| parse_timestamp(&row[0]))
        .collect::<Result<Vec<_>, _>>()?;
    let columns = raw
        .headers
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, name)| {
            Column::new(
                name.trim(),
                raw.rows.iter().map(|row| value_cell(&row[i])).collect(),
            )
        })
        .collect();
    ValueTable::new(datetime, columns)
}

/// Normalize both halves of a snapshot and pair them.
///
/// # Errors
/// Any error from [`normalize_meta`] or [`normalize_data`], or `Data` when
/// the metadata identifiers and data columns do not match one to one.
pub fn collection_from_raw(raw: &RawResources) -> Result<SeriesCollection, AirmonError> {
    let meta = normalize_meta(&raw.meta)?;
    let values = normalize_data(&raw.data)?;
    SeriesCollection::new(meta, values)
}
