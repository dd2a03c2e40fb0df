//! Export to `polars` (`dataframe` feature).

use polars::prelude::*;

use crate::AirmonError;
use crate::model::SeriesCollection;

fn polars_err(e: PolarsError) -> AirmonError {
    AirmonError::Other(format!("dataframe: {e}"))
}

/// Conversion of a collection's value table into a `DataFrame`.
pub trait ToDataFrame {
    /// A frame with a `datetime` column (milliseconds, UTC) and one `f64`
    /// column per series, in column order.
    ///
    /// # Errors
    /// `Other` if polars rejects the columns.
    fn to_dataframe(&self) -> Result<DataFrame, AirmonError>;
}

impl ToDataFrame for SeriesCollection {
    fn to_dataframe(&self) -> Result<DataFrame, AirmonError> {
        let millis: Vec<i64> = self
            .datetime()
            .iter()
            .map(chrono::DateTime::timestamp_millis)
            .collect();
        let datetime = Series::new("datetime".into(), millis)
            .cast(&DataType::Datetime(
                TimeUnit::Milliseconds,
                Some(TimeZone::UTC),
            ))
            .map_err(polars_err)?;

        let mut columns: Vec<Column> = Vec::with_capacity(self.count() + 1);
        columns.push(datetime.into());
        for col in self.values_table().columns() {
            columns.push(Series::new(col.name().into(), col.values().to_vec()).into());
        }
        DataFrame::new(columns).map_err(polars_err)
    }
}
