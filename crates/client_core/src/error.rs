use reqwest::StatusCode;
use shared::error::ErrorBody;
use thiserror::Error;

/// Failure of a single round trip to the commitments service.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The service answered outside the 2xx range.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The connection failed or a 2xx body was not the expected JSON.
    #[error("request transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// A company name or id that cannot stand as a single path segment.
    #[error("'{segment}' cannot be used as a request path segment")]
    InvalidPathSegment { segment: String },
}

impl RequestError {
    /// Builds the error for a non-2xx response, preferring the service's own
    /// `{"error": "..."}` message over a synthesized one.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("Request failed ({})", status.as_u16()));
        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// The message to show a user, when the service (or its status code)
    /// produced one. Transport-class failures return `None`.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => Some(message),
            Self::Transport(_) | Self::InvalidBaseUrl { .. } | Self::InvalidPathSegment { .. } => {
                None
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_service_error_field_when_present() {
        let err = RequestError::from_status(StatusCode::NOT_FOUND, br#"{"error":"Unknown company"}"#);
        assert_eq!(err.server_message(), Some("Unknown company"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn synthesizes_message_when_error_field_missing_or_not_a_string() {
        let missing = RequestError::from_status(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(missing.server_message(), Some("Request failed (502)"));

        let wrong_type = RequestError::from_status(StatusCode::BAD_REQUEST, br#"{"error":42}"#);
        assert_eq!(wrong_type.server_message(), Some("Request failed (400)"));
    }

    #[test]
    fn invalid_base_url_has_no_server_message() {
        let err = RequestError::InvalidBaseUrl {
            url: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(err.server_message(), None);
        assert!(err.to_string().contains("not a url"));
    }
}
