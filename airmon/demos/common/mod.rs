use airmon::{AirFireConnector, MonitorConnector};
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn MonitorConnector> {
    if std::env::var("AIRMON_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(airmon_mock::MockConnector::new())
    } else {
        Arc::new(AirFireConnector::new_default())
    }
}

/// Log to stderr, honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
