mod common;
use airmon::{Monitor, Provider, Timespan};
use common::{get_connector, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut monitor = Monitor::builder()
        .with_connector(get_connector())
        .request_timeout(std::time::Duration::from_secs(60))
        .build()?;

    // All three providers on one time axis, in this order.
    monitor.load_many(&Provider::ALL, Timespan::Daily).await?;
    let all = monitor.snapshot();
    println!("{} series over {} hours", all.count(), all.datetime().len());

    // Drop series that never reported, then print daily averages for a few.
    let reporting = all.drop_empty();
    println!("{} series reported at least once", reporting.count());
    monitor.set_collection(reporting);

    for id in monitor.ids().into_iter().take(3) {
        let daily = monitor.daily_average(id)?;
        for (day, avg) in daily.datetime.iter().zip(&daily.avg_pm25) {
            println!("{id} {} {avg:?}", day.format("%Y-%m-%d %H:%M"));
        }
    }

    Ok(())
}
