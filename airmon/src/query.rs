use std::sync::Arc;

use airmon_core::{
    AirmonError, DailyAverage, FeatureCollection, SeriesCollection, SeriesStatus, to_geojson,
};

use crate::Monitor;

impl Monitor {
    /// The currently loaded collection.
    #[must_use]
    pub fn collection(&self) -> &SeriesCollection {
        &self.current
    }

    /// A shared handle to the current collection that outlives later loads.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SeriesCollection> {
        Arc::clone(&self.current)
    }

    /// Replace the current collection directly, e.g. with a filtered view.
    pub fn set_collection(&mut self, c: SeriesCollection) {
        self.current = Arc::new(c);
    }

    /// Series identifiers in metadata order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.current.ids()
    }

    /// Number of loaded series.
    #[must_use]
    pub fn count(&self) -> usize {
        self.current.count()
    }

    /// NowCast for one series at every row.
    ///
    /// # Errors
    /// `UnknownSeries` if `id` is not loaded.
    pub fn nowcast(&self, id: &str) -> Result<Vec<Option<f64>>, AirmonError> {
        self.current.nowcast(id)
    }

    /// Daily averages for one series in its own timezone.
    ///
    /// # Errors
    /// `UnknownSeries`, or a timezone error from the series metadata.
    pub fn daily_average(&self, id: &str) -> Result<DailyAverage, AirmonError> {
        self.current.daily_average(id)
    }

    /// Last valid reading for every loaded series.
    #[must_use]
    pub fn current_status(&self) -> Vec<SeriesStatus> {
        self.current.current_status()
    }

    /// GeoJSON point features for every loaded series.
    #[must_use]
    pub fn to_geojson(&self) -> FeatureCollection {
        to_geojson(&self.current)
    }
}
