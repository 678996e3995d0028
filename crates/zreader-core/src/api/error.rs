use thiserror::Error;

use super::codes;
use crate::auth::StorageError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Request rejected [{code}]: {message}")]
    Business { code: String, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Business code carried by this error, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Business { code, .. } => Some(code.as_str()),
            ApiError::SessionExpired => Some(codes::SESSION_EXPIRED),
            _ => None,
        }
    }

    /// Text suitable for showing to a user, drawn from the error code table.
    pub fn user_message(&self) -> &'static str {
        match self.code() {
            Some(code) => codes::message_for(code),
            None => codes::FALLBACK_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let short = "short body";
        assert_eq!(ApiError::truncate_body(short), short);

        let long = "é".repeat(400);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.ends_with("(truncated, 800 total bytes)"));
        assert!(truncated.starts_with("éé"));
    }

    #[test]
    fn test_user_message_uses_code_table() {
        let err = ApiError::Business {
            code: codes::INVALID_CREDENTIALS.to_string(),
            message: "server text".to_string(),
        };
        assert_eq!(err.user_message(), codes::message_for(codes::INVALID_CREDENTIALS));
        assert_eq!(
            ApiError::SessionExpired.user_message(),
            codes::message_for(codes::SESSION_EXPIRED)
        );
        assert_eq!(
            ApiError::InvalidResponse("garbage".to_string()).user_message(),
            codes::FALLBACK_MESSAGE
        );
    }
}
