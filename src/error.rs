//! Error types for the Lantern MCP server.
//!
//! This module defines `LanternError`, the unified error type used throughout
//! the application for consistent error handling and propagation.
//!
//! # Security
//!
//! All error messages are sanitized to ensure API tokens are never leaked
//! in logs or error responses. Use `sanitize_message()` when constructing
//! error messages from external sources.

use std::time::Duration;
use thiserror::Error;

use crate::models::Transition;

/// Unified error type for all Lantern operations.
///
/// Each variant provides specific context about the failure, enabling
/// meaningful error messages without leaking sensitive information
/// like API tokens.
#[derive(Error, Debug)]
pub enum LanternError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// Rate limited by the server (HTTP 429).
    #[error("rate limited by server - please wait before retrying")]
    RateLimited {
        /// Suggested retry delay, if provided by server.
        retry_after: Option<Duration>,
    },

    /// Server temporarily unavailable (HTTP 502/503/504).
    #[error("service temporarily unavailable ({status}) - will retry automatically")]
    ServiceUnavailable {
        /// The specific status code.
        status: reqwest::StatusCode,
    },

    /// Jira rejected the request with an error body.
    #[error("Jira API error ({status}): {message}")]
    JiraApi {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// Messages collected from `errorMessages` and `errors`.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// Authentication failed - likely an invalid email or API token.
    #[error("authentication failed - check JIRA_EMAIL and JIRA_API_TOKEN")]
    Authentication,

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The configured service desk key matches no service desk.
    #[error("no service desk with project key '{key}'")]
    ServiceDeskNotFound {
        /// The configured key.
        key: String,
    },

    /// No request type with the given name exists on the service desk.
    #[error("request type '{name}' not found")]
    RequestTypeNotFound {
        /// The requested type name.
        name: String,
    },

    /// No assignable user has the given display name.
    #[error("no assignable user named '{display_name}'")]
    UserNotFound {
        /// The display name that was looked up.
        display_name: String,
    },

    /// Jira refused a status transition.
    #[error("transition {transition_id} is not allowed for this request")]
    TransitionRejected {
        /// The transition that was attempted.
        transition_id: String,
        /// Transitions currently available on the request.
        allowed: Vec<Transition>,
    },

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl LanternError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        LanternError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        LanternError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        LanternError::Validation(message.into())
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        LanternError::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        LanternError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a Jira API error.
    pub fn jira_api(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        LanternError::JiraApi {
            status,
            message: message.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        LanternError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and the operation should be retried.
    ///
    /// Retryable errors include:
    /// - Rate limiting (HTTP 429)
    /// - Service unavailable (HTTP 502, 503, 504)
    /// - Timeouts (may succeed on retry)
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            LanternError::RateLimited { .. } => true,
            LanternError::ServiceUnavailable { .. } => true,
            LanternError::Timeout { .. } => true,
            LanternError::Http(e) => e.is_timeout() || e.is_connect(),
            LanternError::HttpStatus { status, .. } => {
                status.as_u16() == 429 || status.is_server_error()
            }
            _ => false,
        }
    }

    /// Returns true if this is a rate limit error, indicating we should back off.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LanternError::RateLimited { .. })
            || matches!(self, LanternError::HttpStatus { status, .. } if status.as_u16() == 429)
    }

    /// Returns the suggested delay before retry, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LanternError::RateLimited { retry_after } => *retry_after,
            LanternError::ServiceUnavailable { .. } => Some(Duration::from_millis(500)),
            LanternError::Timeout { .. } => Some(Duration::from_millis(100)),
            _ => None,
        }
    }

    /// Sanitizes an error message to remove any occurrence of the API token.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `secret` - The token to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the token replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
