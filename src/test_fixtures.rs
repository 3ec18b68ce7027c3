//! Canned response bodies shaped like the OpenWeatherMap 2.5 API, shared by unit tests.

use crate::{ClimaConfig, Credential};
use serde_json::{json, Value};
use std::time::Duration;

pub(crate) const FIRST_FORECAST_DT: i64 = 1_743_508_800;

pub(crate) fn current_body(name: &str, temp: f64, humidity: u8, description: &str) -> Value {
    json!({
        "coord": { "lon": 139.6917, "lat": 35.6895 },
        "weather": [{ "id": 800, "main": "Clear", "description": description, "icon": "01d" }],
        "main": {
            "temp": temp,
            "feels_like": 14.1,
            "temp_min": temp - 1.0,
            "temp_max": temp + 1.0,
            "pressure": 1013,
            "humidity": humidity
        },
        "wind": { "speed": 3.6, "deg": 220 },
        "sys": { "country": "JP", "sunrise": 1743453287, "sunset": 1743498436 },
        "name": name,
        "cod": 200
    })
}

pub(crate) fn forecast_entry(dt: i64, temp: f64, humidity: u8, description: &str) -> Value {
    json!({
        "dt": dt,
        "main": { "temp": temp, "feels_like": temp - 0.8, "pressure": 1012, "humidity": humidity },
        "weather": [{ "id": 500, "main": "Rain", "description": description, "icon": "10d" }],
        "wind": { "speed": 4.2, "deg": 180 },
        "dt_txt": "2025-04-01 12:00:00"
    })
}

/// Forecast body with `count` entries, three hours apart.
pub(crate) fn forecast_body(count: usize) -> Value {
    let list: Vec<Value> = (0..count as i64)
        .map(|i| {
            forecast_entry(
                FIRST_FORECAST_DT + i * 10_800,
                12.0 + (i % 8) as f64,
                (50 + i % 40) as u8,
                "nubes dispersas",
            )
        })
        .collect();
    json!({ "cod": "200", "message": 0, "cnt": count, "list": list })
}

pub(crate) fn test_config(base_url: &str) -> ClimaConfig {
    ClimaConfig::builder()
        .credential(Credential::new("test-key").expect("static key is non-empty"))
        .base_url(base_url)
        .timeout(Duration::from_secs(5))
        .build()
}
