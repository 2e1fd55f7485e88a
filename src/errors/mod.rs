//! Error types for the BrandIntel client.
//!
//! Covers every failure mode of the AI endpoints: configuration problems,
//! HTTP-level failures, mid-stream transport errors, and errors the server
//! reports in-band inside a stream. A malformed payload on an individual
//! `data:` line is deliberately *not* represented here: it is recovered
//! locally by the stream loop (logged and skipped) and never reaches the
//! caller.

use thiserror::Error;

/// Result type alias for BrandIntel operations.
pub type BrandIntelResult<T> = Result<T, BrandIntelError>;

/// Error type for BrandIntel client operations.
#[derive(Debug, Error)]
pub enum BrandIntelError {
    /// Configuration error (invalid base URL, malformed env vars, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The request completed but the response status was not success.
    #[error("HTTP error! status: {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// The request failed to complete (DNS, connect, TLS, timeout).
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// The transport raised an error while reading the streamed body.
    ///
    /// `on_chunk` deliveries made before the error stand; there is no
    /// rollback.
    #[error("Stream error: {message}")]
    Stream {
        /// Error message.
        message: String,
    },

    /// The server reported an error in-band (a stream event or response
    /// body carrying an `error`/`message` field).
    ///
    /// Displays the server's message verbatim so callers can surface it
    /// to users unchanged.
    #[error("{message}")]
    Server {
        /// The server-provided error message.
        message: String,
    },

    /// A response body that should have been well-formed JSON was not.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Another single-flight request of the same kind is already running.
    #[error("Request already in progress")]
    InFlight,
}

impl BrandIntelError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        BrandIntelError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a server-reported error.
    pub fn server(message: impl Into<String>) -> Self {
        BrandIntelError::Server {
            message: message.into(),
        }
    }

    /// Returns true if this error came from the server in-band rather
    /// than from the transport.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, BrandIntelError::Server { .. })
    }
}

impl From<reqwest::Error> for BrandIntelError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            BrandIntelError::Http {
                status: status.as_u16(),
            }
        } else {
            BrandIntelError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for BrandIntelError {
    fn from(err: serde_json::Error) -> Self {
        BrandIntelError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for BrandIntelError {
    fn from(err: url::ParseError) -> Self {
        BrandIntelError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_names_status() {
        let error = BrandIntelError::Http { status: 500 };
        assert_eq!(error.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_server_error_display_is_verbatim_message() {
        let error = BrandIntelError::server("quota exceeded");
        assert_eq!(error.to_string(), "quota exceeded");
        assert!(error.is_server_reported());
    }

    #[test]
    fn test_network_error_is_not_server_reported() {
        let error = BrandIntelError::Network {
            message: "connection refused".to_string(),
        };
        assert!(!error.is_server_reported());
    }

    #[test]
    fn test_serde_error_converts_to_serialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: BrandIntelError = parse_err.into();
        assert!(matches!(error, BrandIntelError::Serialization { .. }));
    }

    #[test]
    fn test_in_flight_display() {
        assert_eq!(
            BrandIntelError::InFlight.to_string(),
            "Request already in progress"
        );
    }
}
