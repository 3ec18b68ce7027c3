use crate::weather_data::fetcher::Endpoint;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call to the weather service.
///
/// Each variant maps to one user-facing message via [`FetchError::user_message`], so a
/// dashboard can tell a typo in the city name apart from a dead connection.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Location '{location}' was not recognized by the weather service")]
    NotFound { location: String },

    #[error("The weather service rejected the API credential")]
    Unauthorized,

    // The source is stripped of its URL so the credential never ends up in logs.
    #[error("Network request failed for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Weather service returned status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Unexpected {endpoint} response: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },
}

/// Copyable discriminant of [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    NotFound,
    Unauthorized,
    Transport,
    Upstream,
    MalformedResponse,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::NotFound { .. } => FetchErrorKind::NotFound,
            FetchError::Unauthorized => FetchErrorKind::Unauthorized,
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::Upstream { .. } => FetchErrorKind::Upstream,
            FetchError::MalformedResponse { .. } => FetchErrorKind::MalformedResponse,
        }
    }

    /// Message suitable for showing to the person who typed the query.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NotFound { location } => {
                format!("Could not find '{location}'. Check the city name and try again.")
            }
            FetchError::Unauthorized => {
                "The API key was rejected. Check your credential and try again.".to_string()
            }
            FetchError::Transport { .. } => {
                "Could not reach the weather service. Check your connection and try again."
                    .to_string()
            }
            FetchError::Upstream { status, .. } => format!(
                "The weather service is unavailable right now (status {}). Try again later.",
                status.as_u16()
            ),
            FetchError::MalformedResponse { .. } => {
                "The weather service sent an unexpected response. Try again later.".to_string()
            }
        }
    }
}
