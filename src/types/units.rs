//! Defines the unit system passed to the weather service and used for display suffixes.

use crate::ClimaError;
use std::fmt;
use std::str::FromStr;

/// Measurement convention applied by the weather service to every returned value.
///
/// The service converts temperatures and wind speeds itself, so the same
/// value selects both the `units` request parameter and the suffixes a UI
/// appends to the numbers it shows.
///
/// # Examples
///
/// ```
/// use clima::Units;
///
/// assert_eq!(Units::default(), Units::Metric);
/// assert_eq!(Units::Imperial.temperature_suffix(), "°F");
/// assert_eq!("metric".parse::<Units>().unwrap(), Units::Metric);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    /// Celsius and meters per second.
    #[default]
    Metric,
    /// Fahrenheit and miles per hour.
    Imperial,
}

impl Units {
    pub(crate) fn api_code(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_code())
    }
}

impl FromStr for Units {
    type Err = ClimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(ClimaError::UnknownUnits(s.to_string())),
        }
    }
}
