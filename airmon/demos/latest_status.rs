mod common;
use airmon::{Monitor, Provider};
use common::{get_connector, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Provider from the command line (default: airnow).
    let provider: Provider = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("airnow")
        .parse()?;

    // 2. Build the monitor and load the latest snapshot.
    let mut monitor = Monitor::builder()
        .with_connector(get_connector())
        .provider_timeout(std::time::Duration::from_secs(30))
        .build()?;
    monitor.load_latest(provider).await?;
    println!("Loaded {} {provider} series", monitor.count());

    // 3. Current status and latest NowCast for the first few series.
    for status in monitor.current_status().into_iter().take(5) {
        let id = status.meta.device_deployment_id.as_str();
        let nowcast = monitor.nowcast(id)?.last().copied().flatten();
        println!(
            "{id:<40} {:<24} last={:?} at {:?} nowcast={nowcast:?}",
            status.meta.location_name.as_deref().unwrap_or("-"),
            status.last_valid_pm25,
            status.last_valid_datetime,
        );
    }

    // 4. The same status as GeoJSON.
    let geojson = monitor.to_geojson().to_json()?;
    println!("GeoJSON: {} bytes", geojson.len());

    Ok(())
}
