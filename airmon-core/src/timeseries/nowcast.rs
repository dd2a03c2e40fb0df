//! EPA NowCast for hourly PM2.5.
//!
//! The NowCast weights each of the last 12 hourly readings by
//! `weight^age`, where `age` is hours before the most recent reading and the
//! weight shrinks toward 0.5 as the window becomes more volatile.
//!
//! Windows are accepted in chronological order (oldest first). Ages are
//! derived from positions (`age = len - 1 - position`) instead of reversing
//! the data, so a missing reading never shifts the exponent of older ones.

use crate::AirmonError;
use crate::model::round1;

/// Trailing window length used by [`nowcast_series`].
pub const WINDOW_HOURS: usize = 12;
/// How many of the most recent hours are inspected by the recency check.
pub const RECENT_HOURS: usize = 3;
/// Minimum valid readings among the [`RECENT_HOURS`] most recent hours.
pub const MIN_RECENT_VALID: usize = 2;
/// Floor applied to the weight factor.
pub const MIN_WEIGHT_FACTOR: f64 = 0.5;

/// NowCast for a single window of hourly readings in chronological order.
///
/// Windows shorter than 12 hours use the same formulas on whatever is supplied.
/// The result is rounded to one decimal place with [`round1`].
///
/// # Errors
/// `InsufficientData` when fewer than 2 of the 3 most recent readings are
/// valid. This covers all-missing and empty windows too.
///
/// ```
/// use airmon_core::timeseries::nowcast::nowcast_window;
/// assert_eq!(nowcast_window(&[Some(10.0); 12]).unwrap(), 10.0);
/// assert!(nowcast_window(&[Some(10.0), None, None]).is_err());
/// ```
pub fn nowcast_window(window: &[Option<f64>]) -> Result<f64, AirmonError> {
    let n = window.len();
    let aged = || {
        window
            .iter()
            .enumerate()
            .filter_map(move |(pos, v)| v.map(|x| (n - 1 - pos, x)))
    };

    let recent_valid = aged().filter(|&(age, _)| age < RECENT_HOURS).count();
    if recent_valid < MIN_RECENT_VALID {
        return Err(AirmonError::InsufficientData(format!(
            "{recent_valid} of the {RECENT_HOURS} most recent hours are valid"
        )));
    }

    let (min, max) = aged().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, x)| {
        (lo.min(x), hi.max(x))
    });
    // A zero maximum means a zero range as well.
    let scaled_rate_of_change = if max > 0.0 { (max - min) / max } else { 0.0 };
    let weight_factor = (1.0 - scaled_rate_of_change).max(MIN_WEIGHT_FACTOR);

    let (weighted_sum, weight_sum) = aged().fold((0.0, 0.0), |(num, den), (age, x)| {
        let w = weight_factor.powi(i32::try_from(age).unwrap_or(i32::MAX));
        (num + x * w, den + w)
    });

    Ok(round1(weighted_sum / weight_sum))
}

/// NowCast at every position of a series, each using the trailing window
/// `[max(0, i - 11), i]`. Windows that fail the recency check are `None`.
#[must_use]
pub fn nowcast_series(values: &[Option<f64>]) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(WINDOW_HOURS);
            nowcast_window(&values[start..=i]).ok()
        })
        .collect()
}
