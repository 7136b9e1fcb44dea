//! Backend API errors.

use storefront::admin::DraftError;
use thiserror::Error;

/// Errors returned by the storefront backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response: network unreachable, timeout,
    /// TLS failure.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with `success: false` or a non-2xx status.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Message supplied by the backend, if any
        message: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response body")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be built from the form.
    #[error(transparent)]
    Draft(#[from] DraftError),
}

impl ApiError {
    /// Message supplied by the backend, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            Self::Transport(_) | Self::Rejected { .. } | Self::Decode(_) | Self::Draft(_) => None,
        }
    }

    /// Server message, or `fallback` when there is none.
    pub fn message_or<'e>(&'e self, fallback: &'e str) -> &'e str {
        self.server_message().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_preferred() {
        let error = ApiError::Rejected {
            status: 200,
            message: Some("Product not found".to_owned()),
        };

        assert_eq!(error.message_or("fallback"), "Product not found");
    }

    #[test]
    fn blank_message_falls_back() {
        let error = ApiError::Rejected {
            status: 500,
            message: Some("  ".to_owned()),
        };

        assert_eq!(error.message_or("fallback"), "fallback");
    }

    #[test]
    fn decode_errors_fall_back() -> testresult::TestResult {
        let source = serde_json::from_str::<u8>("x")
            .err()
            .ok_or("Expected a decode failure")?;

        assert_eq!(ApiError::Decode(source).message_or("fallback"), "fallback");

        Ok(())
    }
}
