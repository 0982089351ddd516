use chrono::{Duration, TimeZone};
use tracing_subscriber::EnvFilter;

use korail::domain::{RAIL_TZ, now};
use korail::{Korail, KorailConfig, SearchOptions};

/// Seoul and Busan station codes.
const SEOUL: &str = "0001";
const BUSAN: &str = "0020";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let korail = Korail::connect(KorailConfig::new())?;

    // Tomorrow, 08:00 Seoul time.
    let tomorrow = (now() + Duration::days(1)).date_naive();
    let when = tomorrow
        .and_hms_opt(8, 0, 0)
        .and_then(|t| RAIL_TZ.from_local_datetime(&t).single())
        .ok_or("no 08:00 tomorrow")?;

    let options = SearchOptions::new().when(when).with_interval(120);
    let journeys = korail.journeys(SEOUL, BUSAN, &options).await?;
    eprintln!("Found {} journeys", journeys.len());
    println!("{}", serde_json::to_string_pretty(&journeys)?);

    if let Some(leg) = journeys.first().and_then(|j| j.legs().first()) {
        let stops = korail.trip_stopovers(&leg.trip_id().to_string()).await?;
        println!("{}", serde_json::to_string_pretty(&stops)?);
    }

    Ok(())
}
