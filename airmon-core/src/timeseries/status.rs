use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{SeriesCollection, SeriesMeta};

/// A metadata record augmented with the series' last valid observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStatus {
    /// The unchanged metadata record.
    #[serde(flatten)]
    pub meta: SeriesMeta,
    /// Row of the last valid reading; `0` when the series has none.
    pub last_valid_index: usize,
    /// Timestamp at `last_valid_index`; `None` only when the time axis is empty.
    pub last_valid_datetime: Option<DateTime<Utc>>,
    /// Unrounded reading at `last_valid_index`.
    #[serde(rename = "lastValidPM_25")]
    pub last_valid_pm25: Option<f64>,
}

impl SeriesStatus {
    /// True when the series has a valid reading at its status row.
    ///
    /// A status row for an all-missing series points at row 0 and carries no reading.
    #[must_use]
    pub const fn has_reading(&self) -> bool {
        self.last_valid_pm25.is_some()
    }
}

/// Last valid observation for every series, in metadata row order.
///
/// A series with no valid reading reports index 0 (the first row), the first
/// timestamp, and a missing value. No trimming or smoothing is applied.
#[must_use]
pub fn current_status(c: &SeriesCollection) -> Vec<SeriesStatus> {
    let datetime = c.datetime();
    c.meta()
        .iter()
        .zip(c.paired_columns())
        .map(|(meta, col)| {
            let index = col.and_then(|col| col.last_valid_index()).unwrap_or(0);
            SeriesStatus {
                meta: meta.clone(),
                last_valid_index: index,
                last_valid_datetime: datetime.get(index).copied(),
                last_valid_pm25: col.and_then(|col| col.values().get(index).copied().flatten()),
            }
        })
        .collect()
}
