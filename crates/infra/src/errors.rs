//! Transport error taxonomy
//!
//! Errors raised below the port boundary; adapters convert them into
//! `VoiceError` before results cross into core.

use thiserror::Error;

use positivevoice_domain::VoiceError;

/// HTTP transport errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("malformed response: {0}")]
    InvalidResponse(String),

    #[error("request body could not be serialized: {0}")]
    Encode(String),

    /// 401 that survived the refresh-and-retry cycle
    #[error("unauthorized")]
    Unauthorized,

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<ApiError> for VoiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => VoiceError::Auth("session expired".into()),
            ApiError::Http(404) => VoiceError::NotFound("resource not found".into()),
            ApiError::Http(409) => VoiceError::Conflict("conflicting update".into()),
            ApiError::Http(code) if (400..500).contains(&code) => {
                VoiceError::InvalidInput(format!("request rejected with status {code}"))
            }
            ApiError::InvalidUrl(msg) => VoiceError::Config(msg),
            ApiError::Timeout => VoiceError::Network("request timed out".into()),
            ApiError::Http(_) | ApiError::Network(_) => VoiceError::Network(err.to_string()),
            ApiError::InvalidResponse(_) | ApiError::Decode(_) | ApiError::Encode(_) => {
                VoiceError::Internal(err.to_string())
            }
        }
    }
}
