use airmon_core::{Provider, RawResources, RawTable, Timespan};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// First row of every fixture data table.
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub const fn hours(timespan: Timespan) -> usize {
    match timespan {
        Timespan::Latest => 48,
        Timespan::Daily => 96,
    }
}

struct Site {
    id: &'static str,
    location: &'static str,
    longitude: &'static str,
    latitude: &'static str,
    timezone: &'static str,
    source: &'static str,
    reading: fn(usize) -> String,
}

fn sites(provider: Provider) -> Vec<Site> {
    match provider {
        Provider::AirNow => vec![
            Site {
                id: "a1b2c3_airnow.840300630001",
                location: "Missoula",
                longitude: "-114.0909",
                latitude: "46.8721",
                timezone: "America/Denver",
                source: "AirNow",
                reading: diurnal,
            },
            Site {
                id: "d4e5f6_airnow.840530330030",
                location: "Seattle",
                longitude: "-122.3321",
                latitude: "47.6062",
                timezone: "America/Los_Angeles",
                source: "AirNow",
                reading: flat,
            },
        ],
        Provider::Airsis => vec![Site {
            id: "0f9e8d_airsis.1012",
            location: "Bend",
            longitude: "-121.3153",
            latitude: "44.0582",
            timezone: "America/Los_Angeles",
            source: "AIRSIS",
            reading: gappy,
        }],
        Provider::Wrcc => vec![
            Site {
                id: "7c6b5a_wrcc.s139",
                location: "Boise",
                longitude: "-116.2023",
                latitude: "43.6150",
                timezone: "America/Boise",
                source: "WRCC",
                reading: diurnal,
            },
            Site {
                id: "3a2b1c_wrcc.s224",
                location: "NA",
                longitude: "NA",
                latitude: "NA",
                timezone: "America/Denver",
                source: "WRCC",
                reading: offline,
            },
        ],
    }
}

/// Low at night, peaking in the afternoon; one negative instrument glitch a day.
fn diurnal(hour: usize) -> String {
    match hour % 24 {
        3 => "-0.4".into(),
        h => format!("{:.1}", 4.0 + (h as f64) * 0.5),
    }
}

fn flat(_hour: usize) -> String {
    "8".into()
}

/// Every fifth hour missing.
fn gappy(hour: usize) -> String {
    if hour % 5 == 4 {
        "NA".into()
    } else {
        format!("{:.1}", 12.0 + (hour % 7) as f64)
    }
}

fn offline(_hour: usize) -> String {
    "NA".into()
}

pub fn snapshot(provider: Provider, timespan: Timespan) -> RawResources {
    let sites = sites(provider);

    let meta = RawTable::new(
        [
            "deviceDeploymentID",
            "deviceID",
            "locationName",
            "longitude",
            "latitude",
            "timezone",
            "dataIngestSource",
            "dataIngestUnitID",
        ],
        sites.iter().map(|s| {
            let device = s.id.split('_').nth(1).unwrap_or(s.id);
            [
                s.id, device, s.location, s.longitude, s.latitude, s.timezone, s.source, "mock",
            ]
        }),
    );

    let mut headers = vec!["datetime".to_string()];
    headers.extend(sites.iter().map(|s| s.id.to_string()));
    let base = start();
    let rows = (0..hours(timespan)).map(|i| {
        let ts = base + Duration::hours(i as i64);
        let mut row = vec![ts.format("%Y-%m-%d %H:%M:%S%z").to_string()];
        row.extend(sites.iter().map(|s| (s.reading)(i)));
        row
    });

    RawResources {
        meta,
        data: RawTable::new(headers, rows),
    }
}
