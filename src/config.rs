//! Configuration management for the Lantern MCP server.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;
use std::fmt;

use url::Url;

use crate::error::LanternError;

/// Configuration for connecting to Jira Service Management.
///
/// The API token is stored but never logged or exposed in error messages;
/// the `Debug` output redacts it.
#[derive(Clone)]
pub struct Config {
    /// Site URL (e.g., `https://example.atlassian.net`), without trailing slash.
    pub base_url: String,

    /// Account email used for basic authentication.
    pub email: String,

    /// API token paired with `email`.
    /// This value must never be logged or included in error messages.
    pub api_token: String,

    /// Service desk id (`"4"`) or project key (`"SUP"`).
    pub service_desk: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `JIRA_BASE_URL`: The Jira site URL
    /// - `JIRA_EMAIL`: Account email for basic auth
    /// - `JIRA_API_TOKEN`: API token for that account
    /// - `JIRA_SERVICE_DESK`: Service desk id or project key
    ///
    /// # Errors
    ///
    /// Returns `LanternError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, LanternError> {
        let base_url = Self::get_required_env("JIRA_BASE_URL")?;
        let email = Self::get_required_env("JIRA_EMAIL")?;
        let api_token = Self::get_required_env("JIRA_API_TOKEN")?;
        let service_desk = Self::get_required_env("JIRA_SERVICE_DESK")?;

        let base_url = Self::validate_base_url(base_url)?;
        let email = Self::validate_email(email)?;
        Self::validate_api_token(&api_token)?;

        Ok(Config {
            base_url,
            email,
            api_token,
            service_desk: service_desk.trim().to_string(),
        })
    }

    /// Returns the API token. Only for building requests and sanitizing errors.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, LanternError> {
        env::var(name)
            .map_err(|_| LanternError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(LanternError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, LanternError> {
        let url = url.trim().trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LanternError::invalid_config(
                "JIRA_BASE_URL must start with http:// or https://",
            ));
        }

        let parsed = Url::parse(&url)
            .map_err(|e| LanternError::invalid_config(format!("JIRA_BASE_URL is invalid: {}", e)))?;
        if parsed.host().is_none() {
            return Err(LanternError::invalid_config("JIRA_BASE_URL has no host"));
        }

        Ok(url)
    }

    fn validate_email(email: String) -> Result<String, LanternError> {
        let email = email.trim().to_string();
        if !email.contains('@') {
            return Err(LanternError::invalid_config(
                "JIRA_EMAIL must be an email address",
            ));
        }
        Ok(email)
    }

    /// Validates the API token is not a placeholder value.
    ///
    /// The whole token is compared, so real tokens that happen to contain
    /// a placeholder word are accepted.
    fn validate_api_token(token: &str) -> Result<(), LanternError> {
        let token_lower = token.trim().to_lowercase();
        let placeholder_values = ["placeholder", "changeme", "token", "api_token"];

        let is_placeholder = placeholder_values.contains(&token_lower.as_str())
            || token_lower.starts_with("your_")
            || token_lower.starts_with("your-")
            || token_lower.bytes().all(|b| b == b'x');

        if is_placeholder {
            return Err(LanternError::invalid_config(
                "JIRA_API_TOKEN appears to be a placeholder value",
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"[REDACTED]")
            .field("service_desk", &self.service_desk)
            .finish()
    }
}
