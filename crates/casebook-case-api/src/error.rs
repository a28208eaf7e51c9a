use casebook_common_http::{HttpError, ResponseError};
use casebook_history_types::IngestError;
use casebook_session::SessionError;
use thiserror::Error;

/// Case API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("malformed input: {0}")]
    MalformedInput(#[from] IngestError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("invalid API configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether the failure is about who is asking rather than what was asked.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Session(_) | Self::Http(HttpError::Unauthorized { .. })
        )
    }
}
