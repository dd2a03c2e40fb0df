use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::AirmonError;

/// One named series column. Values are shared between tables that keep the column unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Arc<[Option<f64>]>,
}

impl Column {
    /// Build a column from owned values.
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }

    /// Column name; equals the series `deviceDeploymentID`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values, one per row of the owning table.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of non-missing values.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Row index of the last non-missing value, if any.
    #[must_use]
    pub fn last_valid_index(&self) -> Option<usize> {
        self.values.iter().rposition(Option::is_some)
    }

    /// True when both columns point at the same shared storage.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

/// Wide value table: a strictly increasing UTC time axis plus one column per series.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    datetime: Arc<[DateTime<Utc>]>,
    columns: Vec<Column>,
}

impl Default for ValueTable {
    fn default() -> Self {
        Self {
            datetime: Arc::from(Vec::new()),
            columns: Vec::new(),
        }
    }
}

impl ValueTable {
    /// Build a table from a time axis and named columns.
    ///
    /// # Errors
    /// `SchemaMismatch` if the time axis is not strictly increasing; `Data` if any
    /// column length differs from the axis length.
    pub fn new(datetime: Vec<DateTime<Utc>>, columns: Vec<Column>) -> Result<Self, AirmonError> {
        if let Some(w) = datetime.windows(2).find(|w| w[0] >= w[1]) {
            return Err(AirmonError::SchemaMismatch(format!(
                "time axis is not strictly increasing at {} -> {}",
                w[0], w[1]
            )));
        }
        if let Some(c) = columns.iter().find(|c| c.values.len() != datetime.len()) {
            return Err(AirmonError::Data(format!(
                "column {} has {} values for {} timestamps",
                c.name,
                c.values.len(),
                datetime.len()
            )));
        }
        Ok(Self {
            datetime: datetime.into(),
            columns,
        })
    }

    /// Number of rows on the time axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.datetime.len()
    }

    /// True when the time axis has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datetime.is_empty()
    }

    /// The shared time axis.
    #[must_use]
    pub fn datetime(&self) -> &[DateTime<Utc>] {
        &self.datetime
    }

    /// All series columns in table order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// First column with the given name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Rows `[start, end)`; bounds are clamped to the table.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        if start == 0 && end == self.len() {
            return self.clone();
        }
        Self {
            datetime: self.datetime[start..end].into(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values[start..end].into(),
                })
                .collect(),
        }
    }

    /// Keep only the named columns, in the order given. Unknown names are skipped.
    #[must_use]
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let columns = names
            .iter()
            .filter_map(|n| self.column(n.as_ref()).cloned())
            .collect();
        Self {
            datetime: Arc::clone(&self.datetime),
            columns,
        }
    }

    /// Keep the columns for which `keep` returns true, preserving table order.
    #[must_use]
    pub fn retain<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Column) -> bool,
    {
        Self {
            datetime: Arc::clone(&self.datetime),
            columns: self.columns.iter().filter(|c| keep(c)).cloned().collect(),
        }
    }

    /// Outer join on the time axis.
    ///
    /// The result axis is the sorted union of both axes; `self`'s columns come
    /// first, then `other`'s. Rows missing from one side hold `None` in that
    /// side's columns.
    #[must_use]
    pub fn outer_join(&self, other: &Self) -> Self {
        if self.datetime == other.datetime {
            let mut columns = self.columns.clone();
            columns.extend(other.columns.iter().cloned());
            return Self {
                datetime: Arc::clone(&self.datetime),
                columns,
            };
        }

        // Union axis with the source row on each side.
        let mut rows: BTreeMap<DateTime<Utc>, (Option<usize>, Option<usize>)> = BTreeMap::new();
        for (i, ts) in self.datetime.iter().enumerate() {
            rows.entry(*ts).or_default().0 = Some(i);
        }
        for (i, ts) in other.datetime.iter().enumerate() {
            rows.entry(*ts).or_default().1 = Some(i);
        }

        let datetime: Vec<DateTime<Utc>> = rows.keys().copied().collect();
        let left_rows: Vec<Option<usize>> = rows.values().map(|(l, _)| *l).collect();
        let right_rows: Vec<Option<usize>> = rows.values().map(|(_, r)| *r).collect();

        let realign = |c: &Column, src: &[Option<usize>]| Column {
            name: c.name.clone(),
            values: src
                .iter()
                .map(|row| row.and_then(|i| c.values[i]))
                .collect(),
        };

        let mut columns: Vec<Column> = self
            .columns
            .iter()
            .map(|c| realign(c, &left_rows))
            .collect();
        columns.extend(other.columns.iter().map(|c| realign(c, &right_rows)));

        Self {
            datetime: datetime.into(),
            columns,
        }
    }
}
