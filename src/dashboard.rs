//! Headless dashboard controller.
//!
//! A UI forwards each input change (location edit, unit toggle, display-count slider,
//! submit button) as a [`DashboardEvent`]. Every event re-runs the fetch pipeline and
//! replaces the previous [`DashboardView`], which carries everything a front end draws:
//! metric strings, a map point, the chart/table frame and user-facing notices. Repeated
//! identical queries are absorbed by the client's response cache.

use crate::clima::{Clima, LatLon};
use crate::error::ClimaError;
use crate::types::current_weather::CurrentWeather;
use crate::types::forecast::{DisplayCount, ForecastSeries};
use crate::types::forecast_frame::export_file_name;
use crate::types::location::LocationQuery;
use crate::types::units::Units;
use log::{debug, warn};
use polars::prelude::DataFrame;
use std::path::PathBuf;

pub const DEFAULT_LOCATION: &str = "Tokyo";

pub const TEMPERATURE_LABEL: &str = "Temperature";
pub const FEELS_LIKE_LABEL: &str = "Feels like";
pub const HUMIDITY_LABEL: &str = "Humidity";
pub const PRESSURE_LABEL: &str = "Pressure";
pub const WIND_LABEL: &str = "Wind";
pub const CONDITIONS_LABEL: &str = "Conditions";

const MISSING_VALUE: &str = "n/a";

/// One change coming from an input control.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    LocationChanged(String),
    UnitsChanged(Units),
    DisplayCountChanged(u32),
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// Current-conditions block: formatted metrics plus the point to put on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPanel {
    pub place: String,
    pub metrics: Vec<Metric>,
    pub map_point: LatLon,
}

impl CurrentPanel {
    pub fn new(weather: &CurrentWeather, units: Units) -> Self {
        let temperature_suffix = units.temperature_suffix();
        let description = weather
            .description
            .as_deref()
            .map(capitalize_first)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| MISSING_VALUE.to_string());

        let metrics = vec![
            Metric {
                label: TEMPERATURE_LABEL,
                value: format!("{:.1}{}", weather.temperature, temperature_suffix),
            },
            Metric {
                label: FEELS_LIKE_LABEL,
                value: format!("{:.1}{}", weather.feels_like, temperature_suffix),
            },
            Metric {
                label: HUMIDITY_LABEL,
                value: format!("{}%", weather.humidity),
            },
            Metric {
                label: PRESSURE_LABEL,
                value: format!("{:.0} hPa", weather.pressure),
            },
            Metric {
                label: WIND_LABEL,
                value: format!("{:.1} {}", weather.wind_speed, units.speed_suffix()),
            },
            Metric {
                label: CONDITIONS_LABEL,
                value: description,
            },
        ];

        Self {
            place: weather.place_label(),
            metrics,
            map_point: weather.coordinates,
        }
    }

    pub fn metric(&self, label: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.value.as_str())
    }
}

/// Forecast block: the full series, the displayed prefix and its frame.
#[derive(Debug, Clone)]
pub struct ForecastPanel {
    pub series: ForecastSeries,
    pub shown: ForecastSeries,
    /// Chart and table input for `shown`.
    pub frame: DataFrame,
    pub export_name: String,
}

impl ForecastPanel {
    pub fn new(
        series: ForecastSeries,
        count: &DisplayCount,
        location: &LocationQuery,
    ) -> Result<Self, ClimaError> {
        let shown = series.head(count.value() as usize);
        let frame = shown.to_frame()?;
        Ok(Self {
            series,
            shown,
            frame,
            export_name: export_file_name(location.as_str()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything one render of the dashboard shows.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub location: String,
    pub units: Units,
    pub current: Option<CurrentPanel>,
    pub forecast: Option<ForecastPanel>,
    pub notices: Vec<Notice>,
}

impl DashboardView {
    fn awaiting_input(location: &str, units: Units) -> Self {
        Self {
            location: location.to_string(),
            units,
            current: None,
            forecast: None,
            notices: vec![Notice::info(
                "Enter a city and submit to see the current weather and forecast.",
            )],
        }
    }

    /// Charts are only drawn when the forecast loaded.
    pub fn has_chart(&self) -> bool {
        self.forecast.is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
    }
}

pub struct Dashboard {
    client: Clima,
    location: String,
    units: Units,
    display_count: DisplayCount,
    view: DashboardView,
}

impl Dashboard {
    pub fn new(client: Clima) -> Self {
        Self {
            client,
            location: DEFAULT_LOCATION.to_string(),
            units: Units::default(),
            display_count: DisplayCount::default(),
            view: DashboardView::awaiting_input(DEFAULT_LOCATION, Units::default()),
        }
    }

    /// Presets the location input without running the pipeline.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Presets the unit toggle without running the pipeline.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Replaces the display-count control, e.g. to use the `8..=40` slider range.
    pub fn with_display_count(mut self, display_count: DisplayCount) -> Self {
        self.display_count = display_count;
        self
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn display_count(&self) -> &DisplayCount {
        &self.display_count
    }

    pub fn client(&self) -> &Clima {
        &self.client
    }

    /// Applies an input change, re-runs the pipeline and returns the new view.
    ///
    /// Fetch failures never surface here: they become [`Notice`]s in the view so the
    /// dashboard stays ready for the next query.
    ///
    /// # Errors
    ///
    /// Returns [`ClimaError::Frame`] if the forecast frame cannot be built.
    pub async fn handle(&mut self, event: DashboardEvent) -> Result<&DashboardView, ClimaError> {
        debug!("Dashboard event: {:?}", event);
        match event {
            DashboardEvent::LocationChanged(location) => self.location = location,
            DashboardEvent::UnitsChanged(units) => self.units = units,
            DashboardEvent::DisplayCountChanged(count) => self.display_count.set(count),
            DashboardEvent::Submit => {}
        }
        self.refresh().await?;
        Ok(&self.view)
    }

    /// Writes the loaded forecast as CSV. Returns `None` when no forecast is shown.
    pub async fn export(&self, directory: Option<PathBuf>) -> Result<Option<PathBuf>, ClimaError> {
        let Some(panel) = &self.view.forecast else {
            return Ok(None);
        };
        let path = self
            .client
            .export_forecast()
            .series(&panel.series)
            .location(&self.view.location)
            .maybe_directory(directory)
            .call()
            .await?;
        Ok(Some(path))
    }

    async fn refresh(&mut self) -> Result<(), ClimaError> {
        let location = match LocationQuery::new(&self.location) {
            Ok(location) => location,
            Err(ClimaError::EmptyLocation) => {
                self.view = DashboardView::awaiting_input(&self.location, self.units);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let report = self.client.report_for(location, self.units).await;
        let mut notices: Vec<Notice> = Vec::new();
        for err in report.errors() {
            let notice = Notice::error(err.user_message());
            if !notices.contains(&notice) {
                notices.push(notice);
            }
        }

        let current = report
            .current
            .as_ref()
            .ok()
            .map(|weather| CurrentPanel::new(weather, self.units));
        let forecast = match report.forecast {
            Ok(series) => Some(ForecastPanel::new(
                series,
                &self.display_count,
                &report.location,
            )?),
            Err(_) => None,
        };
        if !notices.is_empty() {
            warn!(
                "Dashboard for '{}' rendered with {} error notice(s)",
                report.location,
                notices.len()
            );
        }

        self.view = DashboardView {
            location: report.location.to_string(),
            units: self.units,
            current,
            forecast,
            notices,
        };
        Ok(())
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{current_body, forecast_entry, test_config, FIRST_FORECAST_DT};
    use crate::ClimaConfig;
    use crate::Credential;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn three_entry_forecast() -> serde_json::Value {
        let t = FIRST_FORECAST_DT;
        json!({
            "list": [
                forecast_entry(t, 15.0, 60, "cielo claro"),
                forecast_entry(t + 10_800, 14.0, 62, "nubes"),
                forecast_entry(t + 21_600, 13.0, 64, "nubes"),
            ]
        })
    }

    async fn mount_tokyo(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(current_body("Tokyo", 15.0, 60, "clear sky")),
            )
            .mount(mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(three_entry_forecast()))
            .mount(mock_server)
            .await;
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("clear sky"), "Clear sky");
        assert_eq!(capitalize_first("ñublado"), "Ñublado");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_current_panel_imperial_and_missing_description() {
        let weather = CurrentWeather {
            place: "Chicago".to_string(),
            country: Some("US".to_string()),
            coordinates: LatLon(41.8781, -87.6298),
            temperature: 41.0,
            feels_like: 35.456,
            humidity: 81,
            pressure: 1009.0,
            wind_speed: 12.66,
            description: None,
        };
        let panel = CurrentPanel::new(&weather, Units::Imperial);

        assert_eq!(panel.place, "Chicago, US");
        assert_eq!(panel.metric(TEMPERATURE_LABEL), Some("41.0°F"));
        assert_eq!(panel.metric(FEELS_LIKE_LABEL), Some("35.5°F"));
        assert_eq!(panel.metric(PRESSURE_LABEL), Some("1009 hPa"));
        assert_eq!(panel.metric(WIND_LABEL), Some("12.7 mph"));
        assert_eq!(panel.metric(CONDITIONS_LABEL), Some("n/a"));
        assert_eq!(panel.map_point, LatLon(41.8781, -87.6298));
    }

    #[tokio::test]
    async fn test_tokyo_metrics() -> Result<(), ClimaError> {
        let mock_server = MockServer::start().await;
        mount_tokyo(&mock_server).await;

        let client = Clima::with_config(test_config(&mock_server.uri()))?;
        let mut dashboard = Dashboard::new(client);
        let view = dashboard
            .handle(DashboardEvent::LocationChanged("Tokyo".to_string()))
            .await?;

        let current = view.current.as_ref().expect("current panel");
        assert_eq!(current.metric(TEMPERATURE_LABEL), Some("15.0°C"));
        assert_eq!(current.metric(HUMIDITY_LABEL), Some("60%"));
        assert_eq!(current.metric(CONDITIONS_LABEL), Some("Clear sky"));
        assert!(view.notices.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_display_count_prefix() -> Result<(), ClimaError> {
        let mock_server = MockServer::start().await;
        mount_tokyo(&mock_server).await;

        let client = Clima::with_config(test_config(&mock_server.uri()))?;
        let mut dashboard =
            Dashboard::new(client).with_display_count(DisplayCount::with_range(10, 1..=40));

        let view = dashboard.handle(DashboardEvent::Submit).await?;
        let panel = view.forecast.as_ref().expect("forecast panel");
        assert_eq!(panel.series.len(), 3);
        assert_eq!(panel.shown.len(), 3);

        let view = dashboard
            .handle(DashboardEvent::DisplayCountChanged(2))
            .await?;
        let panel = view.forecast.as_ref().expect("forecast panel");
        assert_eq!(panel.shown.samples(), &panel.series.samples()[..2]);
        assert_eq!(panel.frame.height(), 2);
        assert_eq!(panel.export_name, "forecast_tokyo.csv");
        Ok(())
    }

    #[tokio::test]
    async fn test_display_count_is_clamped_by_control() -> Result<(), ClimaError> {
        let client = Clima::with_config(test_config("http://127.0.0.1:1"))?;
        let mut dashboard = Dashboard::new(client);
        dashboard
            .handle(DashboardEvent::DisplayCountChanged(500))
            .await?;
        assert_eq!(dashboard.display_count().value(), 20);
        Ok(())
    }

    #[tokio::test]
    async fn test_unit_toggle_changes_suffix() -> Result<(), ClimaError> {
        let mock_server = MockServer::start().await;
        mount_tokyo(&mock_server).await;

        let client = Clima::with_config(test_config(&mock_server.uri()))?;
        let mut dashboard = Dashboard::new(client);
        let view = dashboard
            .handle(DashboardEvent::UnitsChanged(Units::Imperial))
            .await?;

        assert_eq!(view.units, Units::Imperial);
        let current = view.current.as_ref().expect("current panel");
        assert_eq!(current.metric(TEMPERATURE_LABEL), Some("15.0°F"));
        assert_eq!(current.metric(WIND_LABEL), Some("3.6 mph"));
        Ok(())
    }

    #[tokio::test]
    async fn test_preset_inputs_fetch_once_on_submit() -> Result<(), ClimaError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("units", "imperial"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(current_body("Lima", 68.0, 70, "mist")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(three_entry_forecast()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Clima::with_config(test_config(&mock_server.uri()))?;
        let mut dashboard = Dashboard::new(client)
            .with_location("Lima")
            .with_units(Units::Imperial)
            .with_display_count(DisplayCount::new(5));
        assert!(dashboard.view().current.is_none());

        let view = dashboard.handle(DashboardEvent::Submit).await?;
        assert_eq!(view.location, "Lima");
        let current = view.current.as_ref().expect("current panel");
        assert_eq!(current.metric(TEMPERATURE_LABEL), Some("68.0°F"));
        assert!(view.has_chart());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_location_shows_prompt() -> Result<(), ClimaError> {
        let client = Clima::with_config(test_config("http://127.0.0.1:1"))?;
        let mut dashboard = Dashboard::new(client);
        let view = dashboard
            .handle(DashboardEvent::LocationChanged("   ".to_string()))
            .await?;

        assert!(view.current.is_none());
        assert!(!view.has_chart());
        assert_eq!(view.notices.len(), 1);
        assert_eq!(view.notices[0].level, NoticeLevel::Info);
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_key_shows_single_notice() -> Result<(), ClimaError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = Clima::with_config(test_config(&mock_server.uri()))?;
        let mut dashboard = Dashboard::new(client);
        let view = dashboard.handle(DashboardEvent::Submit).await?;

        assert!(view.current.is_none());
        assert!(!view.has_chart());
        assert_eq!(view.errors().count(), 1);
        assert!(view.notices[0].message.contains("API key"));
        Ok(())
    }

    #[tokio::test]
    async fn test_forecast_failure_still_shows_metrics() -> Result<(), ClimaError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(current_body("Tokyo", 15.0, 60, "clear sky")),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cod": "200" })))
            .mount(&mock_server)
            .await;

        let client = Clima::with_config(test_config(&mock_server.uri()))?;
        let mut dashboard = Dashboard::new(client);
        let view = dashboard.handle(DashboardEvent::Submit).await?;

        assert!(view.current.is_some());
        assert!(!view.has_chart());
        assert_eq!(view.errors().count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_connection_failure_then_resubmit() -> Result<(), Box<dyn std::error::Error>> {
        // Reserve a port, then release it so the first attempt is refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let address = listener.local_addr()?;
        drop(listener);

        let config = ClimaConfig::builder()
            .credential(Credential::new("test-key")?)
            .base_url(format!("http://{address}"))
            .build();
        let mut dashboard = Dashboard::new(Clima::with_config(config)?);

        let view = dashboard.handle(DashboardEvent::Submit).await?;
        assert!(view.current.is_none());
        assert!(!view.has_chart());
        assert!(view.notices[0].message.contains("connection"));

        let listener = std::net::TcpListener::bind(address)?;
        let mock_server = MockServer::builder().listener(listener).start().await;
        mount_tokyo(&mock_server).await;

        let view = dashboard.handle(DashboardEvent::Submit).await?;
        assert!(view.current.is_some());
        assert!(view.has_chart());
        assert!(view.notices.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_export_current_forecast() -> Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;
        mount_tokyo(&mock_server).await;
        let export_root = tempfile::tempdir()?;

        let client = Clima::with_config(test_config(&mock_server.uri()))?;
        let mut dashboard = Dashboard::new(client);
        assert_eq!(dashboard.export(None).await?, None);

        dashboard.handle(DashboardEvent::Submit).await?;
        let path = dashboard
            .export(Some(export_root.path().to_path_buf()))
            .await?
            .expect("forecast was loaded");
        let exported = ForecastSeries::from_csv(&std::fs::read(path)?)?;
        assert_eq!(exported.len(), 3);
        Ok(())
    }
}
