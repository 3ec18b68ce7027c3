use crate::types::current_weather::CurrentWeather;
use crate::types::forecast::{ForecastSample, ForecastSeries};
use crate::weather_data::error::FetchError;
use crate::weather_data::fetcher::Endpoint;
use crate::LatLon;
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawCurrent {
    name: String,
    #[serde(default)]
    sys: Option<RawSys>,
    coord: RawCoord,
    main: RawCurrentMain,
    wind: RawWind,
    #[serde(default)]
    weather: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct RawCurrentMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    list: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    dt: i64,
    main: RawEntryMain,
    weather: Vec<RawCondition>,
    wind: RawWind,
}

#[derive(Debug, Deserialize)]
struct RawEntryMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> FetchError {
    FetchError::MalformedResponse {
        endpoint,
        reason: reason.into(),
    }
}

/// Parses a `/weather` response body.
///
/// `sys.country` and the condition description are optional; every other documented
/// field must be present.
pub fn parse_current_weather(body: &Value) -> Result<CurrentWeather, FetchError> {
    let raw = RawCurrent::deserialize(body)
        .map_err(|e| malformed(Endpoint::Current, e.to_string()))?;

    Ok(CurrentWeather {
        place: raw.name,
        country: raw.sys.and_then(|sys| sys.country),
        coordinates: LatLon(raw.coord.lat, raw.coord.lon),
        temperature: raw.main.temp,
        feels_like: raw.main.feels_like,
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        wind_speed: raw.wind.speed,
        description: raw
            .weather
            .into_iter()
            .next()
            .and_then(|condition| condition.description),
    })
}

/// Projects every entry of a `/forecast` response's `list` into a [`ForecastSample`].
///
/// Either the whole list converts or the call fails: an entry with a missing field, an
/// empty `weather` array or an out-of-range `dt` yields [`FetchError::MalformedResponse`]
/// naming the offending index.
///
/// # Examples
///
/// ```
/// let body = serde_json::json!({
///     "list": [{
///         "dt": 1_743_508_800,
///         "main": { "temp": 15.0, "feels_like": 14.1, "humidity": 60 },
///         "weather": [{ "description": "cielo claro" }],
///         "wind": { "speed": 3.6 }
///     }]
/// });
/// let series = clima::normalize_forecast(&body).unwrap();
/// assert_eq!(series.len(), 1);
/// assert_eq!(series.samples()[0].description, "cielo claro");
/// ```
pub fn normalize_forecast(body: &Value) -> Result<ForecastSeries, FetchError> {
    let raw = RawForecast::deserialize(body)
        .map_err(|e| malformed(Endpoint::Forecast, e.to_string()))?;

    let samples = raw
        .list
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let timestamp = DateTime::from_timestamp(entry.dt, 0).ok_or_else(|| {
                malformed(
                    Endpoint::Forecast,
                    format!("entry {idx}: timestamp {} out of range", entry.dt),
                )
            })?;
            let description = entry
                .weather
                .into_iter()
                .next()
                .and_then(|condition| condition.description)
                .ok_or_else(|| {
                    malformed(
                        Endpoint::Forecast,
                        format!("entry {idx}: missing weather description"),
                    )
                })?;

            Ok(ForecastSample {
                timestamp,
                temperature: entry.main.temp,
                feels_like: entry.main.feels_like,
                humidity: entry.main.humidity,
                description,
                wind_speed: entry.wind.speed,
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    Ok(ForecastSeries::new(samples))
}
