use crate::AirmonError;
use crate::model::{SeriesCollection, SeriesMeta};

/// Keep only the listed series, in the listed order.
///
/// Metadata records and value columns are filtered and reordered identically;
/// the time axis is always retained. Unknown identifiers are silently dropped.
/// Use [`select_strict`] to reject them instead.
#[must_use]
pub fn select<S: AsRef<str>>(c: &SeriesCollection, ids: &[S]) -> SeriesCollection {
    let meta: Vec<SeriesMeta> = ids
        .iter()
        .filter_map(|id| c.metadata(id.as_ref()).ok().cloned())
        .collect();
    let keep: Vec<&str> = meta.iter().map(|m| m.device_deployment_id.as_str()).collect();
    let values = c.values_table().project(&keep);
    SeriesCollection::from_parts(meta, values)
}

/// Like [`select`], but every identifier must exist.
///
/// # Errors
/// `UnknownSeries` naming the first identifier that is not in the collection.
pub fn select_strict<S: AsRef<str>>(
    c: &SeriesCollection,
    ids: &[S],
) -> Result<SeriesCollection, AirmonError> {
    if let Some(missing) = ids.iter().find(|id| c.metadata(id.as_ref()).is_err()) {
        return Err(AirmonError::unknown_series(missing.as_ref()));
    }
    Ok(select(c, ids))
}

/// Remove series that have no valid reading anywhere on the time axis.
///
/// A single valid reading is enough to keep a series. Metadata row order is preserved.
#[must_use]
pub fn drop_empty(c: &SeriesCollection) -> SeriesCollection {
    let meta: Vec<SeriesMeta> = c
        .meta()
        .iter()
        .zip(c.paired_columns())
        .filter(|(_, col)| col.is_some_and(|col| col.valid_count() > 0))
        .map(|(m, _)| m.clone())
        .collect();
    let values = c.values_table().retain(|col| col.valid_count() > 0);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        dropped = c.count() - meta.len(),
        kept = meta.len(),
        "dropped empty series"
    );

    SeriesCollection::from_parts(meta, values)
}
