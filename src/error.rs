use thiserror::Error;

#[derive(Error, Debug)]
pub enum PsnError {
    /// Raised locally, before any request is issued.
    #[error("Error: Unknown PSN message kind: {0}")]
    UnknownMessageKind(i64),

    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for PsnError {
    fn from(err: serde_json::Error) -> Self {
        PsnError::JsonError(err.to_string())
    }
}
