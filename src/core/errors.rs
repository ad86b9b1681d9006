use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("The api method '{0}' isn't currently supported by this client")]
    UnsupportedMethod(String),

    #[error("Missing credentials: private method '{0}' requires both an API key and secret")]
    MissingCredentials(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String, body: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("HTTP error: {status} - {body}")]
    HttpError { status: u16, body: String },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    /// Raw response body attached to the error, when one was received
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { body, .. } | Self::HttpError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True for errors raised before any network I/O took place
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMethod(_) | Self::MissingCredentials(_)
        )
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::NetworkError(format!("Request timed out: {}", err))
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}
