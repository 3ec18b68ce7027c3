use crate::LatLon;

/// Snapshot of the weather at one place, as reported by the `/weather` endpoint.
///
/// All numeric values are already expressed in the [`crate::Units`] the request was made with.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Place name as resolved by the service (may differ from the query text).
    pub place: String,
    /// ISO country code, when the service reports one.
    pub country: Option<String>,
    pub coordinates: LatLon,
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
    pub wind_speed: f64,
    /// Short condition text in the request language, e.g. `"cielo claro"`.
    pub description: Option<String>,
}

impl CurrentWeather {
    /// `"Tokyo, JP"`, or just the place name when no country is known.
    pub fn place_label(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.place, country),
            _ => self.place.clone(),
        }
    }
}
