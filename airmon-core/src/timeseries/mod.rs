//! Operations over a `SeriesCollection`.
//!
//! Modules include:
//! - `align`: combine two collections on the shared time axis
//! - `select`: project, reorder, or drop series
//! - `trim`: discard partial local-calendar days
//! - `nowcast`: the EPA NowCast decay-weighted statistic
//! - `rolling`: trailing window means tolerant of missing values
//! - `daily`: local-day daily averages
//! - `status`: last valid observation per series
/// Combining collections by outer join on the time axis.
pub mod align;
/// Local-day daily averages.
pub mod daily;
/// EPA NowCast smoothing.
pub mod nowcast;
/// Trailing rolling-window statistics.
pub mod rolling;
/// Series projection and empty-series removal.
pub mod select;
/// Current-status derivation.
pub mod status;
/// Local-calendar-day trimming.
pub mod trim;
