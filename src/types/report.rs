use crate::types::current_weather::CurrentWeather;
use crate::types::forecast::ForecastSeries;
use crate::types::location::LocationQuery;
use crate::types::units::Units;
use crate::weather_data::error::FetchError;

/// Outcome of one query: current weather and forecast, fetched independently.
///
/// A failed forecast does not discard a successful current-weather result and vice versa;
/// callers decide per half what to show.
#[derive(Debug)]
pub struct WeatherReport {
    pub location: LocationQuery,
    pub units: Units,
    pub current: Result<CurrentWeather, FetchError>,
    pub forecast: Result<ForecastSeries, FetchError>,
}

impl WeatherReport {
    /// True when both calls succeeded.
    pub fn is_complete(&self) -> bool {
        self.current.is_ok() && self.forecast.is_ok()
    }

    /// Errors of the failed calls, current weather first.
    pub fn errors(&self) -> impl Iterator<Item = &FetchError> {
        self.current
            .as_ref()
            .err()
            .into_iter()
            .chain(self.forecast.as_ref().err())
    }
}
