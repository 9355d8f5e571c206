use reqwest::StatusCode;
use thiserror::Error;

/// Transport and HTTP failures from PokeAPI.
///
/// Anything that is not a transport problem (a malformed body, for instance)
/// is not wrapped and reaches the caller as its original error.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API Error: {status} - {message}")]
    Status { status: StatusCode, message: String },

    #[error("API Error: request timed out - {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("API Error: {0}")]
    Network(#[source] reqwest::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut = (0..=MAX_ERROR_BODY_LENGTH)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
        }
    }

    /// Build an error for a non-2xx response.
    /// Falls back to the canonical reason phrase when the body is empty.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            Self::truncate_body(body)
        };
        ApiError::Status { status, message }
    }

    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Timeout(e) | ApiError::Network(e) => e.status(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else {
            ApiError::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_body() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "Not Found");
        assert_eq!(err.to_string(), "API Error: 404 Not Found - Not Found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_status_empty_body_uses_reason() {
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, "  ");
        assert_eq!(
            err.to_string(),
            "API Error: 503 Service Unavailable - Service Unavailable"
        );
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 100);
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ApiError::Status { message, .. } => {
                assert!(message.contains("truncated"));
                assert!(message.contains(&format!("{} total bytes", body.len())));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }
}
