//! The multi-series data model: metadata records, the wide value table, and the collection pairing them.

/// `SeriesCollection` and its accessors.
pub mod collection;
/// Metadata records and field lookup.
pub mod meta;
/// Columnar value storage with the time axis.
pub mod table;

pub use collection::{SeriesCollection, round1};
pub use meta::{CORE_METADATA_NAMES, MetaValue, SeriesMeta};
pub use table::{Column, ValueTable};
