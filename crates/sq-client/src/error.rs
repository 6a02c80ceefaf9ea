//! Data-access errors.

use sq_core::CoreError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Bad credentials or client setup, caught before any request is made.
    #[error("Configuration error: {what}")]
    Config { what: String },

    /// Connection-level failure (DNS, TLS, timeouts).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API request failed with status {status} for {url}")]
    Api { status: u16, url: String },

    #[error("Unexpected response payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Problems inside a downloaded container file.
    #[error("Container error: {what}")]
    Container { what: String },

    /// A container-backed operation was called with no format configured.
    #[error("No container backend configured for {what}")]
    NoContainerBackend { what: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_pass_through_unchanged() {
        let core = CoreError::UnknownField {
            field: "Masses".into(),
            catalog: "halo",
        };
        let wrapped: ClientError = core.clone().into();
        assert_eq!(wrapped.to_string(), core.to_string());
    }

    #[test]
    fn api_error_names_status_and_url() {
        let err = ClientError::Api {
            status: 403,
            url: "http://example.org/api/Illustris-1/".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("Illustris-1"));
    }
}
