//! Error types for OpenAgenda API operations.
//!
//! This module defines the error type returned by the client: a code
//! classifying the failure, a message, and optionally the endpoint path
//! that produced it.

use std::fmt;
use thiserror::Error;

/// The category of a client error.
///
/// This enum provides a high-level classification of errors for use in
/// caller branching and retry logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientErrorCode {
    /// Configuration error - missing or invalid config.
    ConfigurationError,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// Authentication failed - the API key is invalid or lacks access.
    AuthenticationFailed,
    /// Rate limit exceeded - too many requests.
    RateLimited,
    /// Server returned an error (5xx status codes).
    ServerError,
    /// Invalid response from the server - parse error, unexpected format.
    InvalidResponse,
    /// Resource not found (404, or an absent event in the envelope).
    NotFound,
    /// Request was invalid (400) - bad parameters, malformed request.
    BadRequest,
}

impl ClientErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns a human-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigurationError => "configuration_error",
            Self::NetworkError => "network_error",
            Self::AuthenticationFailed => "authentication_failed",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
        }
    }
}

impl fmt::Display for ClientErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while talking to the OpenAgenda API.
#[derive(Debug, Error)]
pub struct ClientError {
    /// The error code categorizing this error.
    code: ClientErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The endpoint path that produced this error (e.g. "agendas/123/events").
    endpoint: Option<String>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClientError {
    /// Creates a new client error with the given code and message.
    pub fn new(code: ClientErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            endpoint: None,
            source: None,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::ConfigurationError, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::NetworkError, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::AuthenticationFailed, message)
    }

    /// Creates a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::RateLimited, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::ServerError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::InvalidResponse, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::NotFound, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ClientErrorCode::BadRequest, message)
    }

    /// Sets the endpoint path for this error.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ClientErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the endpoint path, if set.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref endpoint) = self.endpoint {
            write!(f, "[{}] ", endpoint)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_retryable() {
        assert!(ClientErrorCode::NetworkError.is_retryable());
        assert!(ClientErrorCode::RateLimited.is_retryable());
        assert!(ClientErrorCode::ServerError.is_retryable());
        assert!(!ClientErrorCode::AuthenticationFailed.is_retryable());
        assert!(!ClientErrorCode::NotFound.is_retryable());
        assert!(!ClientErrorCode::ConfigurationError.is_retryable());
    }

    #[test]
    fn error_code_display() {
        assert_eq!(
            ClientErrorCode::AuthenticationFailed.as_str(),
            "authentication_failed"
        );
        assert_eq!(ClientErrorCode::RateLimited.as_str(), "rate_limited");
        assert_eq!(ClientErrorCode::NotFound.as_str(), "not_found");
    }

    #[test]
    fn client_error_creation() {
        let err = ClientError::authentication("invalid API key");
        assert_eq!(err.code(), ClientErrorCode::AuthenticationFailed);
        assert_eq!(err.message(), "invalid API key");
        assert!(err.endpoint().is_none());
        assert!(!err.is_retryable());
    }

    #[test]
    fn client_error_with_endpoint() {
        let err = ClientError::network("connection timeout").with_endpoint("agendas/123/events");
        assert_eq!(err.code(), ClientErrorCode::NetworkError);
        assert_eq!(err.endpoint(), Some("agendas/123/events"));
        assert!(err.is_retryable());
    }

    #[test]
    fn client_error_display() {
        let err = ClientError::rate_limited("too many requests").with_endpoint("agendas");
        let display = format!("{}", err);
        assert!(display.contains("[agendas]"));
        assert!(display.contains("rate_limited"));
        assert!(display.contains("too many requests"));
    }

    #[test]
    fn client_error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("connection reset");
        let err = ClientError::network("request failed").with_source(io_err);
        assert!(err.source().is_some());
    }
}
