mod clima;
mod dashboard;
mod error;
#[cfg(test)]
mod test_fixtures;
mod types;
mod utils;
mod weather_data;

pub use clima::*;
pub use dashboard::*;
pub use error::ClimaError;

pub use types::current_weather::CurrentWeather;
pub use types::forecast::{
    DisplayCount, ForecastSample, ForecastSeries, DEFAULT_DISPLAY_COUNT, DEFAULT_DISPLAY_RANGE,
};
pub use types::forecast_frame::{export_file_name, COLUMN_NAMES};
pub use types::location::{Credential, LocationQuery, CREDENTIAL_ENV_VAR};
pub use types::report::WeatherReport;
pub use types::units::Units;

pub use utils::default_export_dir;
pub use weather_data::error::{FetchError, FetchErrorKind};
pub use weather_data::fetcher::{Endpoint, WeatherFetcher};
pub use weather_data::normalizer::{normalize_forecast, parse_current_weather};
