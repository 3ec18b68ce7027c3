//! Inputs identifying what to ask the weather service for, and with which key.

use crate::ClimaError;
use std::fmt;

pub const CREDENTIAL_ENV_VAR: &str = "OPENWEATHER_API_KEY";

/// Free-text location understood by the weather service, e.g. `"Tokyo"` or `"Paris,FR"`.
///
/// The text is passed through as-is apart from trimming surrounding whitespace;
/// the service decides whether it recognizes the place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// # Errors
    ///
    /// Returns [`ClimaError::EmptyLocation`] if the text is empty after trimming.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ClimaError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ClimaError::EmptyLocation);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used to share cache entries between `"Tokyo"` and `"tokyo"`.
    pub(crate) fn cache_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// API key for the weather service. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// # Errors
    ///
    /// Returns [`ClimaError::EmptyCredential`] for an empty or blank key.
    pub fn new(key: impl Into<String>) -> Result<Self, ClimaError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ClimaError::EmptyCredential);
        }
        Ok(Self(key.trim().to_string()))
    }

    /// Reads the key from the `OPENWEATHER_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ClimaError> {
        let key = std::env::var(CREDENTIAL_ENV_VAR)
            .map_err(|_| ClimaError::MissingCredential(CREDENTIAL_ENV_VAR))?;
        Self::new(key)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
