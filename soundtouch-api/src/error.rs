use soundtouch_parser::DecodeError;
use thiserror::Error;

/// Errors from the low-level control surface client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("network error: {0}")]
    Network(String),

    /// The device answered with a non-success HTTP status.
    #[error("device returned HTTP {0}")]
    Http(u16),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, ApiError>;
