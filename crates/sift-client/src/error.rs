//! Error types for the client crate.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while talking to the record service.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error(transparent)]
    #[diagnostic(
        code(sift_client::http),
        help("Check your network connection and the service domain")
    )]
    Http(#[from] Box<ureq::Error>),

    #[error("service returned {status}: {detail}")]
    #[diagnostic(
        code(sift_client::api),
        help("Verify the project name, your token, and the submitted filter")
    )]
    Api { status: u16, detail: String },

    #[error(transparent)]
    #[diagnostic(
        code(sift_client::json),
        help("The service response was not in the expected format")
    )]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    #[diagnostic(
        code(sift_client::invalid_url),
        help("Ensure the domain is a valid absolute URL")
    )]
    InvalidUrl(String),
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Api {
            status: 403,
            detail: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "service returned 403: permission denied");

        let err = ClientError::InvalidUrl("not a url".to_string());
        assert_eq!(err.to_string(), "Invalid URL: not a url");
    }
}
