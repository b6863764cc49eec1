use thiserror::Error;

/// Failures reported by a [`crate::WeatherProvider`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No weather data found for '{0}'")]
    NotFound(String),

    #[error("Request to weather service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Weather service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid weather service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to set up HTTP client: {0}")]
    Client(String),
}

/// What went wrong with a lookup, as far as the user is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("location not found")]
    NotFound,

    #[error("weather service unavailable")]
    Unavailable,

    #[error("location access denied")]
    LocationDenied,

    #[error("location unsupported")]
    LocationUnsupported,
}

impl ErrorKind {
    /// Short message shown in the error view.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "City not found. Please try again.",
            ErrorKind::Unavailable => "Failed to fetch weather data. Try again later.",
            ErrorKind::LocationDenied => "Location access was denied.",
            ErrorKind::LocationUnsupported => "Location is not available on this device.",
        }
    }
}

impl From<&FetchError> for ErrorKind {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Unavailable,
        }
    }
}

impl From<FetchError> for ErrorKind {
    fn from(err: FetchError) -> Self {
        ErrorKind::from(&err)
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
