//! demos/dashboard.rs
//!
//! Drives the headless dashboard from the command line: loads current weather and the
//! forecast for a city, prints the metrics and the displayed forecast table, and exports
//! the full forecast to CSV.
//!
//! To run this demo:
//! OPENWEATHER_API_KEY=... RUST_LOG=info cargo run --example dashboard -- "Tokyo" imperial 8

use clima::{Clima, Dashboard, DashboardEvent, DisplayCount, Units};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Set RUST_LOG=info (or debug) to see requests and cache hits.
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let city = args.next().unwrap_or_else(|| "Tokyo".to_string());
    let units: Units = args.next().as_deref().unwrap_or("metric").parse()?;
    let count: u32 = args.next().map(|c| c.parse()).transpose()?.unwrap_or(10);

    let mut dashboard = Dashboard::new(Clima::from_env()?)
        .with_location(city)
        .with_units(units)
        .with_display_count(DisplayCount::new(count));
    let view = dashboard.handle(DashboardEvent::Submit).await?;

    for notice in &view.notices {
        eprintln!("[{:?}] {}", notice.level, notice.message);
    }

    if let Some(current) = &view.current {
        println!("Current weather in {}", current.place);
        for metric in &current.metrics {
            println!("  {:<12} {}", metric.label, metric.value);
        }
        println!(
            "  Map point    {:.4}, {:.4}",
            current.map_point.0, current.map_point.1
        );
    }

    if let Some(forecast) = &view.forecast {
        println!(
            "\nForecast ({} of {} points):",
            forecast.shown.len(),
            forecast.series.len()
        );
        println!("{}", forecast.frame);
    }

    if let Some(path) = dashboard.export(None).await? {
        println!("\nForecast exported to {}", path.display());
    }

    Ok(())
}
