use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

use super::meta::{MetaValue, SeriesMeta};
use super::table::{Column, ValueTable};
use crate::AirmonError;
use crate::timeseries::{align, daily, nowcast, select, status, trim};

/// A metadata table paired with a wide value table.
///
/// Every value column has exactly one metadata record with the same
/// identifier, and vice versa. Collections are immutable: every operation
/// returns a new collection and unchanged columns share storage with the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesCollection {
    meta: Vec<SeriesMeta>,
    values: ValueTable,
}

impl SeriesCollection {
    /// Pair a metadata table with a value table.
    ///
    /// # Errors
    /// Returns `Data` when the metadata identifiers and the value column names
    /// are not the same multiset.
    pub fn new(meta: Vec<SeriesMeta>, values: ValueTable) -> Result<Self, AirmonError> {
        let mut tally: HashMap<&str, i64> = HashMap::new();
        for m in &meta {
            *tally.entry(m.device_deployment_id.as_str()).or_default() += 1;
        }
        for name in values.column_names() {
            *tally.entry(name).or_default() -= 1;
        }
        let mut unmatched: Vec<&str> = tally
            .into_iter()
            .filter(|(_, n)| *n != 0)
            .map(|(id, _)| id)
            .collect();
        if !unmatched.is_empty() {
            unmatched.sort_unstable();
            return Err(AirmonError::Data(format!(
                "metadata and value columns disagree for: {}",
                unmatched.join(", ")
            )));
        }
        Ok(Self { meta, values })
    }

    /// Both halves are produced together by a trusted operation.
    pub(crate) const fn from_parts(meta: Vec<SeriesMeta>, values: ValueTable) -> Self {
        Self { meta, values }
    }

    /// A collection with no series and no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Metadata records in row order.
    #[must_use]
    pub fn meta(&self) -> &[SeriesMeta] {
        &self.meta
    }

    /// The wide value table.
    #[must_use]
    pub const fn values_table(&self) -> &ValueTable {
        &self.values
    }

    /// Series identifiers in metadata row order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.meta
            .iter()
            .map(|m| m.device_deployment_id.as_str())
            .collect()
    }

    /// Number of series.
    #[must_use]
    pub fn count(&self) -> usize {
        self.meta.len()
    }

    /// The shared time axis.
    #[must_use]
    pub fn datetime(&self) -> &[DateTime<Utc>] {
        self.values.datetime()
    }

    pub(crate) fn column(&self, id: &str) -> Result<&Column, AirmonError> {
        self.values
            .column(id)
            .ok_or_else(|| AirmonError::unknown_series(id))
    }

    /// The value column paired with each metadata record, in metadata order.
    ///
    /// Identifiers may repeat after `combine`; the k-th record with an
    /// identifier pairs with the k-th column of that name.
    pub(crate) fn paired_columns(&self) -> Vec<Option<&Column>> {
        let mut by_name: HashMap<&str, VecDeque<&Column>> = HashMap::new();
        for col in self.values.columns() {
            by_name.entry(col.name()).or_default().push_back(col);
        }
        self.meta
            .iter()
            .map(|m| {
                by_name
                    .get_mut(m.device_deployment_id.as_str())
                    .and_then(VecDeque::pop_front)
            })
            .collect()
    }

    /// Raw readings for one series, aligned with [`datetime`](Self::datetime).
    ///
    /// # Errors
    /// `UnknownSeries` if `id` has no column.
    pub fn values(&self, id: &str) -> Result<&[Option<f64>], AirmonError> {
        self.column(id).map(Column::values)
    }

    /// `(timestamp, reading)` pairs for one series.
    ///
    /// # Errors
    /// `UnknownSeries` if `id` has no column.
    pub fn series(&self, id: &str) -> Result<Vec<(DateTime<Utc>, Option<f64>)>, AirmonError> {
        let values = self.values(id)?;
        Ok(self
            .datetime()
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect())
    }

    /// Readings for one series rounded to one decimal place.
    ///
    /// # Errors
    /// `UnknownSeries` if `id` has no column.
    pub fn pm25(&self, id: &str) -> Result<Vec<Option<f64>>, AirmonError> {
        Ok(self.values(id)?.iter().map(|v| v.map(round1)).collect())
    }

    /// Metadata record for one series (first match when identifiers repeat).
    ///
    /// # Errors
    /// `UnknownSeries` if no record has this identifier.
    pub fn metadata(&self, id: &str) -> Result<&SeriesMeta, AirmonError> {
        self.meta
            .iter()
            .find(|m| m.device_deployment_id == id)
            .ok_or_else(|| AirmonError::unknown_series(id))
    }

    /// One metadata scalar by identifier and core column name.
    ///
    /// # Errors
    /// `UnknownSeries` for an unknown identifier, `UnknownField` for an unknown field.
    pub fn metadata_field(&self, id: &str, field: &str) -> Result<MetaValue, AirmonError> {
        self.metadata(id)?.field(field)
    }

    /// See [`align::combine`].
    ///
    /// # Errors
    /// `SchemaMismatch` if the two time axes are not on the same hourly grid.
    pub fn combine(&self, other: &Self) -> Result<Self, AirmonError> {
        align::combine(self, other)
    }

    /// See [`select::select`].
    #[must_use]
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Self {
        select::select(self, ids)
    }

    /// See [`select::select_strict`].
    ///
    /// # Errors
    /// `UnknownSeries` for the first identifier not present in the collection.
    pub fn select_strict<S: AsRef<str>>(&self, ids: &[S]) -> Result<Self, AirmonError> {
        select::select_strict(self, ids)
    }

    /// See [`select::drop_empty`].
    #[must_use]
    pub fn drop_empty(&self) -> Self {
        select::drop_empty(self)
    }

    /// See [`trim::trim_date`].
    #[must_use]
    pub fn trim_date(&self, tz: chrono_tz::Tz) -> Self {
        trim::trim_date(self, tz)
    }

    /// [`trim_date`](Self::trim_date) with an IANA zone name.
    ///
    /// # Errors
    /// `InvalidArg` if the name is not a known zone.
    pub fn trim_date_named(&self, timezone: &str) -> Result<Self, AirmonError> {
        Ok(trim::trim_date(self, trim::parse_tz(timezone)?))
    }

    /// See [`nowcast::nowcast_series`].
    ///
    /// # Errors
    /// `UnknownSeries` if `id` has no column.
    pub fn nowcast(&self, id: &str) -> Result<Vec<Option<f64>>, AirmonError> {
        Ok(nowcast::nowcast_series(self.values(id)?))
    }

    /// See [`daily::daily_average`].
    ///
    /// # Errors
    /// `UnknownSeries`, or the timezone errors described on [`SeriesMeta::tz`].
    pub fn daily_average(&self, id: &str) -> Result<daily::DailyAverage, AirmonError> {
        daily::daily_average(self, id)
    }

    /// See [`status::current_status`].
    #[must_use]
    pub fn current_status(&self) -> Vec<status::SeriesStatus> {
        status::current_status(self)
    }
}

/// Round to one decimal place using the exact decimal value of `x`.
///
/// `0.15` is stored as `0.1499999...` and rounds to `0.1`. Exact ties (odd
/// multiples of `0.25`) round away from zero.
#[must_use]
pub fn round1(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (x * 10.0).round() / 10.0;
    }
    // Float formatting rounds the exact binary value, never a scaled copy.
    format!("{x:.1}").parse().unwrap_or(x)
}
