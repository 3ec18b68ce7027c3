use crate::types::current_weather::CurrentWeather;
use crate::types::forecast::ForecastSeries;
use crate::types::location::{Credential, LocationQuery};
use crate::types::units::Units;
use crate::weather_data::error::FetchError;
use crate::weather_data::normalizer::{normalize_forecast, parse_current_weather};
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;

/// The two weather-service resources this crate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/weather`: a single current-conditions object.
    Current,
    /// `/forecast`: 5 days of 3-hour samples under `list`.
    Forecast,
}

impl Endpoint {
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// Issues the HTTP calls against the weather service and maps responses to [`FetchError`]s.
///
/// Holds no state besides its configuration, performs no retries and does no caching.
pub struct WeatherFetcher {
    client: Client,
    base_url: String,
    credential: Credential,
    language: String,
}

impl WeatherFetcher {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        credential: Credential,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
            language: language.into(),
        }
    }

    /// Performs one GET request and returns the parsed JSON body.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        location: &LocationQuery,
        units: Units,
    ) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint.path_segment());
        info!("Requesting {} data for '{}' from {}", endpoint, location, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location.as_str()),
                ("appid", self.credential.expose()),
                ("units", units.api_code()),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                let source = e.without_url();
                warn!("Request to {} failed: {}", url, source);
                FetchError::Transport {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => {
                warn!("{} lookup for '{}' returned 404", endpoint, location);
                return Err(FetchError::NotFound {
                    location: location.to_string(),
                });
            }
            StatusCode::UNAUTHORIZED => {
                warn!("{} request for '{}' was unauthorized", endpoint, location);
                return Err(FetchError::Unauthorized);
            }
            s if !s.is_success() => {
                let message = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("message").and_then(Value::as_str).map(String::from));
                warn!("{} request for '{}' failed with status {}", endpoint, location, s);
                return Err(FetchError::Upstream { status: s, message });
            }
            _ => {}
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            source: e.without_url(),
        })?;
        debug!("Received {} bytes from {}", bytes.len(), url);

        serde_json::from_slice(&bytes).map_err(|e| FetchError::MalformedResponse {
            endpoint,
            reason: e.to_string(),
        })
    }

    pub async fn current(
        &self,
        location: &LocationQuery,
        units: Units,
    ) -> Result<CurrentWeather, FetchError> {
        let body = self.fetch(Endpoint::Current, location, units).await?;
        parse_current_weather(&body)
    }

    pub async fn forecast(
        &self,
        location: &LocationQuery,
        units: Units,
    ) -> Result<ForecastSeries, FetchError> {
        let body = self.fetch(Endpoint::Forecast, location, units).await?;
        let series = normalize_forecast(&body)?;
        info!(
            "Normalized {} forecast samples for '{}'",
            series.len(),
            location
        );
        Ok(series)
    }
}
