use domain::envelope::DecodeError;
use thiserror::Error;

/// Errors surfaced by the API client and normalized by the polling store.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Not authenticated: no bearer token stored")]
    Auth,

    #[error("Token storage error: {0}")]
    TokenStorage(String),
}

impl ClientError {
    /// Non-2xx helper used by the HTTP client.
    pub fn status(endpoint: &'static str, status: u16) -> Self {
        ClientError::Status { endpoint, status }
    }
}
