//! This module provides the main entry point for talking to the OpenWeatherMap API.
//! It fetches current weather and 5-day forecasts for a free-text location, caches
//! successful responses for a bounded time, and exports forecasts as CSV.

use crate::error::ClimaError;
use crate::types::current_weather::CurrentWeather;
use crate::types::forecast::ForecastSeries;
use crate::types::forecast_frame::export_file_name;
use crate::types::location::{Credential, LocationQuery};
use crate::types::report::WeatherReport;
use crate::types::units::Units;
use crate::utils::{default_export_dir, ensure_dir_exists};
use crate::weather_data::error::FetchError;
use crate::weather_data::fetcher::WeatherFetcher;
use crate::weather_data::response_cache::{CacheKey, TtlCache};
use bon::{bon, Builder};
use log::{info, warn};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_LANGUAGE: &str = "es";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use clima::LatLon;
///
/// let tokyo = LatLon(35.6895, 139.6917);
/// assert_eq!(tokyo.0, 35.6895); // Latitude
/// assert_eq!(tokyo.1, 139.6917); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Settings for a [`Clima`] client.
///
/// Only the credential is required; everything else falls back to the defaults
/// exported from this module.
///
/// # Examples
///
/// ```
/// use clima::{ClimaConfig, Credential};
/// use std::time::Duration;
///
/// let config = ClimaConfig::builder()
///     .credential(Credential::new("my-api-key").unwrap())
///     .language("en")
///     .cache_ttl(Duration::from_secs(30 * 60))
///     .build();
/// assert_eq!(config.language(), "en");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClimaConfig {
    credential: Credential,
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    base_url: String,
    #[builder(into, default = DEFAULT_LANGUAGE.to_string())]
    language: String,
    /// How long a successful response is served from memory.
    #[builder(default = DEFAULT_CACHE_TTL)]
    cache_ttl: Duration,
    /// Per-request timeout, covering connect and body.
    #[builder(default = DEFAULT_TIMEOUT)]
    timeout: Duration,
    /// Directory for CSV exports. Falls back to the user's download directory.
    export_dir: Option<PathBuf>,
}

impl ClimaConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }
}

/// The main client struct for fetching weather data.
///
/// Both calls of a query go through a time-to-live cache keyed by location and unit
/// system, so re-running the same query within the window costs no network traffic.
///
/// # Examples
///
/// ```no_run
/// # use clima::{Clima, ClimaError, Credential, Units};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ClimaError> {
/// let client = Clima::new(Credential::from_env()?)?;
///
/// let now = client
///     .current()
///     .location("Tokyo")
///     .units(Units::Metric)
///     .call()
///     .await?;
/// println!("{}: {:.1}°C", now.place_label(), now.temperature);
/// # Ok(())
/// # }
/// ```
pub struct Clima {
    fetcher: WeatherFetcher,
    current_cache: TtlCache<CurrentWeather>,
    forecast_cache: TtlCache<ForecastSeries>,
    export_dir: Option<PathBuf>,
}

#[bon]
impl Clima {
    /// Creates a client with default settings for the given credential.
    ///
    /// # Errors
    ///
    /// Returns [`ClimaError::HttpClient`] if the HTTP client cannot be initialized.
    pub fn new(credential: Credential) -> Result<Self, ClimaError> {
        Self::with_config(ClimaConfig::builder().credential(credential).build())
    }

    /// Creates a client reading the credential from `OPENWEATHER_API_KEY`.
    pub fn from_env() -> Result<Self, ClimaError> {
        Self::new(Credential::from_env()?)
    }

    pub fn with_config(config: ClimaConfig) -> Result<Self, ClimaError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClimaError::HttpClient)?;
        Ok(Self {
            fetcher: WeatherFetcher::new(
                client,
                config.base_url,
                config.credential,
                config.language,
            ),
            current_cache: TtlCache::new(config.cache_ttl),
            forecast_cache: TtlCache::new(config.cache_ttl),
            export_dir: config.export_dir,
        })
    }

    /// Fetches the current weather for a location.
    ///
    /// # Arguments
    ///
    /// * `.location(&str)`: **Required.** City name, optionally with a country code (`"Paris,FR"`).
    /// * `.units(Units)`: Optional. Defaults to [`Units::Metric`].
    ///
    /// # Errors
    ///
    /// Returns [`ClimaError::EmptyLocation`] for a blank location and [`ClimaError::Fetch`]
    /// for any failure of the call itself.
    #[builder]
    pub async fn current(
        &self,
        location: &str,
        units: Option<Units>,
    ) -> Result<CurrentWeather, ClimaError> {
        let location = LocationQuery::new(location)?;
        Ok(self
            .current_for(&location, units.unwrap_or_default())
            .await?)
    }

    /// Fetches and normalizes the 5-day / 3-hour forecast for a location.
    ///
    /// Takes the same arguments as [`Clima::current`].
    #[builder]
    pub async fn forecast(
        &self,
        location: &str,
        units: Option<Units>,
    ) -> Result<ForecastSeries, ClimaError> {
        let location = LocationQuery::new(location)?;
        Ok(self
            .forecast_for(&location, units.unwrap_or_default())
            .await?)
    }

    /// Fetches both current weather and forecast, one after the other.
    ///
    /// The two halves of the returned [`WeatherReport`] fail independently. Only a blank
    /// location fails the call as a whole.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use clima::{Clima, ClimaError, Units};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ClimaError> {
    /// let client = Clima::from_env()?;
    /// let report = client.report().location("Lima").call().await?;
    /// if let Ok(series) = &report.forecast {
    ///     println!("{} forecast points", series.len());
    /// }
    /// for err in report.errors() {
    ///     eprintln!("{}", err.user_message());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn report(
        &self,
        location: &str,
        units: Option<Units>,
    ) -> Result<WeatherReport, ClimaError> {
        let location = LocationQuery::new(location)?;
        Ok(self.report_for(location, units.unwrap_or_default()).await)
    }

    /// Writes `series` as CSV and returns the path of the written file.
    ///
    /// The file is named after the location (see [`crate::export_file_name`]) and placed in
    /// `.directory(..)` if given, else the configured export directory, else the default one.
    #[builder]
    pub async fn export_forecast(
        &self,
        series: &ForecastSeries,
        location: &str,
        directory: Option<PathBuf>,
    ) -> Result<PathBuf, ClimaError> {
        let directory = directory
            .or_else(|| self.export_dir.clone())
            .unwrap_or_else(default_export_dir);
        ensure_dir_exists(&directory).await?;

        let path = directory.join(export_file_name(location));
        let csv = series.to_csv()?;
        tokio::fs::write(&path, &csv)
            .await
            .map_err(|e| ClimaError::ExportIo(path.clone(), e))?;
        info!(
            "Exported {} forecast rows ({} bytes) to {}",
            series.len(),
            csv.len(),
            path.display()
        );
        Ok(path)
    }

    /// Drops every cached response.
    pub async fn clear_cache(&self) {
        self.current_cache.clear().await;
        self.forecast_cache.clear().await;
    }

    /// Number of cached responses. Expired entries are dropped on the next insert or lookup.
    pub async fn cached_responses(&self) -> usize {
        self.current_cache.len().await + self.forecast_cache.len().await
    }

    pub(crate) async fn report_for(&self, location: LocationQuery, units: Units) -> WeatherReport {
        let current = self.current_for(&location, units).await;
        let forecast = self.forecast_for(&location, units).await;
        WeatherReport {
            location,
            units,
            current,
            forecast,
        }
    }

    async fn current_for(
        &self,
        location: &LocationQuery,
        units: Units,
    ) -> Result<CurrentWeather, FetchError> {
        let key = CacheKey::new(location, units);
        if let Some(hit) = self.current_cache.get(&key).await {
            info!("Cache hit for current weather of '{}' ({})", location, units);
            return Ok(hit);
        }

        let weather = self.fetcher.current(location, units).await.inspect_err(|e| {
            warn!("Current weather for '{}' unavailable: {}", location, e);
        })?;
        self.current_cache.insert(key, weather.clone()).await;
        Ok(weather)
    }

    async fn forecast_for(
        &self,
        location: &LocationQuery,
        units: Units,
    ) -> Result<ForecastSeries, FetchError> {
        let key = CacheKey::new(location, units);
        if let Some(hit) = self.forecast_cache.get(&key).await {
            info!("Cache hit for forecast of '{}' ({})", location, units);
            return Ok(hit);
        }

        let series = self.fetcher.forecast(location, units).await.inspect_err(|e| {
            warn!("Forecast for '{}' unavailable: {}", location, e);
        })?;
        self.forecast_cache.insert(key, series.clone()).await;
        Ok(series)
    }
}
