//! Polars views of a [`ForecastSeries`] for charting and tables, plus CSV export and re-import.

use crate::types::forecast::{ForecastSample, ForecastSeries};
use crate::ClimaError;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::io::Cursor;

pub const TIMESTAMP: &str = "timestamp";
pub const TEMPERATURE: &str = "temperature";
pub const FEELS_LIKE: &str = "feels_like";
pub const HUMIDITY: &str = "humidity";
pub const DESCRIPTION: &str = "description";
pub const WIND_SPEED: &str = "wind_speed";

/// Column order of both the frame and the CSV export.
pub const COLUMN_NAMES: [&str; 6] = [
    TIMESTAMP,
    TEMPERATURE,
    FEELS_LIKE,
    HUMIDITY,
    DESCRIPTION,
    WIND_SPEED,
];

// Same layout as the service's own `dt_txt` field.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl ForecastSeries {
    /// Builds a `DataFrame` with one row per sample, in series order.
    ///
    /// The `timestamp` column is `Datetime(Milliseconds)` without a time zone and holds UTC
    /// wall-clock values; `humidity` is `Int64`.
    pub fn to_frame(&self) -> Result<DataFrame, ClimaError> {
        let samples = self.samples();
        let timestamps: Vec<i64> = samples
            .iter()
            .map(|s| s.timestamp.timestamp_millis())
            .collect();
        let timestamp = Series::new(TIMESTAMP.into(), timestamps)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        let temperature: Vec<f64> = samples.iter().map(|s| s.temperature).collect();
        let feels_like: Vec<f64> = samples.iter().map(|s| s.feels_like).collect();
        let humidity: Vec<i64> = samples.iter().map(|s| i64::from(s.humidity)).collect();
        let description: Vec<&str> = samples.iter().map(|s| s.description.as_str()).collect();
        let wind_speed: Vec<f64> = samples.iter().map(|s| s.wind_speed).collect();

        let frame = DataFrame::new(vec![
            timestamp.into(),
            Column::new(TEMPERATURE.into(), temperature),
            Column::new(FEELS_LIKE.into(), feels_like),
            Column::new(HUMIDITY.into(), humidity),
            Column::new(DESCRIPTION.into(), description),
            Column::new(WIND_SPEED.into(), wind_speed),
        ])?;
        Ok(frame)
    }

    /// Serializes the series as CSV with a header row of [`COLUMN_NAMES`].
    pub fn to_csv(&self) -> Result<Vec<u8>, ClimaError> {
        let mut frame = self.to_frame()?;
        let stamps: Vec<String> = self
            .samples()
            .iter()
            .map(|s| s.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .collect();
        frame.with_column(Column::new(TIMESTAMP.into(), stamps))?;

        let mut buffer = Vec::new();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(buffer)
    }

    /// Parses CSV produced by [`ForecastSeries::to_csv`].
    ///
    /// # Errors
    ///
    /// Returns [`ClimaError::CsvColumn`] when a column is missing or has an empty cell,
    /// [`ClimaError::CsvTimestamp`] for an unparseable timestamp, and
    /// [`ClimaError::Frame`] when Polars cannot read the data at all.
    pub fn from_csv(bytes: &[u8]) -> Result<ForecastSeries, ClimaError> {
        // Every column is read as text; numeric columns are cast explicitly below so a
        // description such as "007" keeps its exact spelling.
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;

        let timestamp = column_as(&frame, TIMESTAMP, &DataType::String)?;
        let temperature = column_as(&frame, TEMPERATURE, &DataType::Float64)?;
        let feels_like = column_as(&frame, FEELS_LIKE, &DataType::Float64)?;
        let humidity = column_as(&frame, HUMIDITY, &DataType::Int64)?;
        let description = column_as(&frame, DESCRIPTION, &DataType::String)?;
        let wind_speed = column_as(&frame, WIND_SPEED, &DataType::Float64)?;

        let (timestamp, description) = (timestamp.str()?, description.str()?);
        let (temperature, feels_like, wind_speed) =
            (temperature.f64()?, feels_like.f64()?, wind_speed.f64()?);
        let humidity = humidity.i64()?;

        let samples = (0..frame.height())
            .map(|idx| {
                Ok(ForecastSample {
                    timestamp: parse_timestamp(get_value(timestamp.get(idx), TIMESTAMP)?)?,
                    temperature: get_value(temperature.get(idx), TEMPERATURE)?,
                    feels_like: get_value(feels_like.get(idx), FEELS_LIKE)?,
                    humidity: u8::try_from(get_value(humidity.get(idx), HUMIDITY)?).map_err(
                        |_| ClimaError::CsvColumn {
                            column: HUMIDITY.to_string(),
                        },
                    )?,
                    description: get_value(description.get(idx), DESCRIPTION)?.to_string(),
                    wind_speed: get_value(wind_speed.get(idx), WIND_SPEED)?,
                })
            })
            .collect::<Result<Vec<_>, ClimaError>>()?;

        Ok(ForecastSeries::new(samples))
    }
}

/// File name for a CSV export of the forecast for `location`, e.g. `forecast_paris_fr.csv`.
///
/// # Examples
///
/// ```
/// assert_eq!(clima::export_file_name("Paris,FR"), "forecast_paris_fr.csv");
/// assert_eq!(clima::export_file_name("New York"), "forecast_new_york.csv");
/// ```
pub fn export_file_name(location: &str) -> String {
    let mut slug = String::with_capacity(location.len());
    for ch in location.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "forecast.csv".to_string()
    } else {
        format!("forecast_{slug}.csv")
    }
}

fn column_as(frame: &DataFrame, name: &str, dtype: &DataType) -> Result<Series, ClimaError> {
    let column = frame.column(name).map_err(|_| ClimaError::CsvColumn {
        column: name.to_string(),
    })?;
    Ok(column.as_materialized_series().cast(dtype)?)
}

fn get_value<T>(value: Option<T>, column: &str) -> Result<T, ClimaError> {
    value.ok_or_else(|| ClimaError::CsvColumn {
        column: column.to_string(),
    })
}

fn parse_timestamp(value: &str) -> Result<chrono::DateTime<chrono::Utc>, ClimaError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ClimaError::CsvTimestamp {
            value: value.to_string(),
        })
}
