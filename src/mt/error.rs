use thiserror::Error;

/// Error types for the machine translation providers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    /// Provider is misconfigured (missing API key, rejected request)
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Transport-level failure talking to the provider
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Locale code the provider cannot accept
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// Provider answered but the translation itself failed
    #[error("Translation error: {0}")]
    TranslationError(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
