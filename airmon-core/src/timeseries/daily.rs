use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rolling::trailing_mean;
use super::trim::trim_date;
use crate::AirmonError;
use crate::model::{SeriesCollection, round1};

/// Hours per local day used when sampling the rolling average.
pub const HOURS_PER_DAY: usize = 24;

/// Daily averages for one series.
///
/// `datetime[k]` is the first row of local day `k` (local midnight) and
/// `avg_pm25[k]` is the 24-hour trailing mean at the last row of that day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyAverage {
    /// Start-of-day timestamps, in UTC.
    pub datetime: Vec<DateTime<Utc>>,
    /// Daily mean PM2.5 rounded to one decimal place; `None` when the day has no valid readings.
    pub avg_pm25: Vec<Option<f64>>,
}

impl DailyAverage {
    /// Number of complete local days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.datetime.len()
    }

    /// True when no complete local day was available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datetime.is_empty()
    }
}

/// Daily averages for `id` over complete days in the series' own timezone.
///
/// The collection is trimmed with [`trim_date`] using the zone from the
/// series metadata, then a 24-hour trailing mean is sampled once per day:
/// the timestamp from hour `24k`, the average from hour `24k + 23`.
/// Days are counted as 24-row blocks; trailing rows that do not fill a block
/// are ignored.
///
/// # Errors
/// `UnknownSeries` if `id` is not in the collection; `Data` if its metadata
/// has no timezone; `InvalidArg` if the timezone is not a known IANA zone.
pub fn daily_average(c: &SeriesCollection, id: &str) -> Result<DailyAverage, AirmonError> {
    let tz = c.metadata(id)?.tz()?;
    let day_aligned = trim_date(c, tz).select(&[id]);

    let datetime = day_aligned.datetime();
    let rolling = trailing_mean(day_aligned.values(id)?, HOURS_PER_DAY);
    let day_count = rolling.len() / HOURS_PER_DAY;

    let out = DailyAverage {
        datetime: (0..day_count)
            .map(|k| datetime[HOURS_PER_DAY * k])
            .collect(),
        avg_pm25: (0..day_count)
            .map(|k| rolling[HOURS_PER_DAY * k + HOURS_PER_DAY - 1].map(round1))
            .collect(),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(series = id, timezone = %tz, days = day_count, "computed daily averages");

    Ok(out)
}
