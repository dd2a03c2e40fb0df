use crate::AirmonError;
use crate::model::SeriesCollection;

const HOUR: i64 = 3_600;

/// Seconds past the top of the hour for the first timestamp on an axis.
fn hourly_phase(c: &SeriesCollection) -> Option<i64> {
    c.datetime().first().map(|ts| ts.timestamp().rem_euclid(HOUR))
}

/// Combine two collections into a new one.
///
/// - Metadata is `a`'s records followed by `b`'s. Identifiers present in both
///   are **not** de-duplicated; callers must pre-filter when overlap is possible.
/// - The value table is the outer join on timestamp: the axis is the sorted
///   union of both axes and every position absent from one input is missing
///   in that input's columns.
/// - An empty collection is the identity.
///
/// # Errors
/// Returns `SchemaMismatch` when both axes are non-empty but do not lie on the
/// same hourly grid (e.g. one reports at :00 and the other at :30).
pub fn combine(a: &SeriesCollection, b: &SeriesCollection) -> Result<SeriesCollection, AirmonError> {
    if let (Some(pa), Some(pb)) = (hourly_phase(a), hourly_phase(b))
        && pa != pb
    {
        return Err(AirmonError::SchemaMismatch(format!(
            "time axes are offset by {}s within the hour",
            (pa - pb).abs()
        )));
    }

    let mut meta = a.meta().to_vec();
    meta.extend(b.meta().iter().cloned());
    let values = a.values_table().outer_join(b.values_table());
    Ok(SeriesCollection::from_parts(meta, values))
}

/// Fold [`combine`] over any number of collections, left to right.
///
/// # Errors
/// Propagates the first `SchemaMismatch`.
pub fn combine_all<'a, I>(collections: I) -> Result<SeriesCollection, AirmonError>
where
    I: IntoIterator<Item = &'a SeriesCollection>,
{
    collections
        .into_iter()
        .try_fold(SeriesCollection::empty(), |acc, c| combine(&acc, c))
}
