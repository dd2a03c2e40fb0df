use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::AirmonError;
use crate::model::SeriesCollection;

/// Parse an IANA zone name.
///
/// # Errors
/// `InvalidArg` if the name is not in the tz database.
pub fn parse_tz(name: &str) -> Result<Tz, AirmonError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AirmonError::InvalidArg(format!("unknown timezone '{name}'")))
}

/// Row range `[start, end)` covering only complete local days in `tz`.
///
/// Leading rows are dropped until the first kept row is local hour 0, and
/// trailing rows until the last kept row is local hour 23. The range is empty
/// when no complete day fits.
#[must_use]
pub fn full_day_bounds(datetime: &[DateTime<Utc>], tz: Tz) -> (usize, usize) {
    let (Some(first), Some(last)) = (datetime.first(), datetime.last()) else {
        return (0, 0);
    };
    let h0 = first.with_timezone(&tz).hour() as usize;
    let hn = last.with_timezone(&tz).hour() as usize;

    let start = if h0 == 0 { 0 } else { 24 - h0 };
    let tail = if hn == 23 { 0 } else { hn + 1 };
    let end = datetime.len().saturating_sub(tail);
    (start.min(end), end)
}

/// Trim a collection to complete local-calendar days in `tz`.
///
/// Timestamps are converted only to find the boundaries; the stored axis keeps
/// its UTC representation and metadata is unchanged. The zone is not checked
/// against any series' own `timezone`: passing the wrong zone silently yields
/// wrong day boundaries, so callers should source it from series metadata.
#[must_use]
pub fn trim_date(c: &SeriesCollection, tz: Tz) -> SeriesCollection {
    let (start, end) = full_day_bounds(c.datetime(), tz);
    let values = c.values_table().slice(start, end);
    SeriesCollection::from_parts(c.meta().to_vec(), values)
}
