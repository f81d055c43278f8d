use http::StatusCode;
use petstore_core::ValidationError;

/// A non-success response from the API
#[derive(Debug, thiserror::Error)]
#[error("HTTP {status}: {body}")]
pub struct HttpError {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// arguments failed the local contract check; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("request failed")]
    Transport(#[from] reqwest::Error),
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("could not encode request body")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// status code of the response, if the server answered with an error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => Some(e.status),
            _ => None,
        }
    }
}
