//! HTTP client for the Jira and Jira Service Management REST APIs.
//!
//! This module provides the `JiraClient` struct for making authenticated
//! requests against a Jira Cloud site. Two API roots are used: the platform
//! API (`/rest/api/3/`) for issues, comments, transitions and users, and the
//! service desk API (`/rest/servicedeskapi/`) for queues, request types and
//! request creation.
//!
//! # Retry Logic
//!
//! The client automatically retries transient failures:
//! - HTTP 429 (rate limit): Exponential backoff starting at 100ms
//! - HTTP 502/503/504: Retry after 500ms
//! - Timeouts: Retry after 100ms
//!
//! Client errors (4xx except 429) are not retried.
//!
//! # Security
//!
//! The API token is never logged. All error messages are sanitized before logging.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::OnceCell;

use crate::adf::markdown_to_doc;
use crate::config::Config;
use crate::error::LanternError;
use crate::models::{
    CreatedComment, CreatedRequest, IssuePayload, JiraErrorBody, PagedResponse,
    Priority, Queue, Request, RequestType, ServiceDesk, Transition, TransitionsResponse, User,
};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retry attempts for transient failures.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Initial delay for exponential backoff (milliseconds).
const INITIAL_BACKOFF_MS: u64 = 100;

/// Delay before retrying after server error (milliseconds).
const SERVER_ERROR_DELAY_MS: u64 = 500;

/// Maximum length for HTTP error response bodies.
const MAX_ERROR_BODY_LEN: usize = 500;

/// The two REST roots a Jira Service Management site exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    /// Jira platform API.
    Platform,
    /// Jira Service Management API.
    ServiceDesk,
}

impl Api {
    /// Path prefix for this API, with leading and trailing slash.
    pub fn root(self) -> &'static str {
        match self {
            Api::Platform => "/rest/api/3/",
            Api::ServiceDesk => "/rest/servicedeskapi/",
        }
    }
}

/// HTTP client for Jira Service Management.
///
/// Handles authentication, request formatting, and response parsing
/// for all operations the MCP tools expose.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = JiraClient::new(&config)?;
///
/// let queues = client.list_queues().await?;
/// ```
#[derive(Clone)]
pub struct JiraClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Site URL (e.g., `https://example.atlassian.net`), without trailing slash.
    base_url: String,

    /// Account email for basic auth.
    email: String,

    /// API token for basic auth.
    /// SECURITY: Never log this value!
    api_token: String,

    /// Configured service desk id or project key.
    service_desk: String,

    /// Numeric service desk id, resolved on first use.
    service_desk_id: Arc<OnceCell<String>>,
}

impl JiraClient {
    /// Creates a new Jira client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, LanternError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(LanternError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_token: config.api_token().to_string(),
            service_desk: config.service_desk.clone(),
            service_desk_id: Arc::new(OnceCell::new()),
        })
    }

    /// Returns a reference to the API token for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn api_token_for_sanitization(&self) -> &str {
        &self.api_token
    }

    /// Validates a numeric id (queues, transitions, attachments).
    fn validate_id(id: &str, field_name: &str) -> Result<(), LanternError> {
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LanternError::validation(format!(
                "{} must be a numeric string, got: {:?}",
                field_name,
                id.chars().take(50).collect::<String>()
            )));
        }
        Ok(())
    }

    /// Validates an issue id or key (`10001`, `SUP-12`).
    ///
    /// Only ASCII alphanumerics and `-` are accepted, so the value can be
    /// interpolated into a URL path as-is.
    fn validate_issue_ref(id: &str, field_name: &str) -> Result<(), LanternError> {
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Err(LanternError::validation(format!(
                "{} must be an issue id or key, got: {:?}",
                field_name,
                id.chars().take(50).collect::<String>()
            )));
        }
        Ok(())
    }

    /// Returns the web URL for viewing an issue in Jira.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, urlencoding::encode(key))
    }

    /// Tests connectivity to the Jira site.
    ///
    /// Fetches the authenticated user, which verifies both reachability
    /// and credentials.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::ConnectionTest` if the connection fails,
    /// with details about the failure reason.
    pub async fn test_connection(&self) -> Result<User, LanternError> {
        tracing::debug!("Testing connection to Jira");

        match self.get::<User>(Api::Platform, "myself", &[]).await {
            Ok(user) => {
                tracing::info!(user = %user.display(), "Connection test successful");
                Ok(user)
            }
            Err(LanternError::Authentication) => Err(LanternError::connection_test(
                "Authentication failed - verify JIRA_EMAIL and JIRA_API_TOKEN",
            )),
            Err(LanternError::Timeout { duration, .. }) => {
                Err(LanternError::connection_test(format!(
                    "Connection timed out after {:?} - verify JIRA_BASE_URL is correct and the site is reachable",
                    duration
                )))
            }
            Err(LanternError::Http(e)) => {
                let message = LanternError::sanitize_message(&e.to_string(), &self.api_token);
                Err(LanternError::connection_test(format!(
                    "HTTP error: {} - verify JIRA_BASE_URL is correct",
                    message
                )))
            }
            Err(e) => Err(LanternError::connection_test(
                e.sanitized_display(&self.api_token),
            )),
        }
    }

    /// Executes an operation with retry logic for transient failures.
    ///
    /// Retries on:
    /// - HTTP 429 (rate limit) with exponential backoff
    /// - HTTP 502/503/504 with fixed delay
    /// - Timeouts with fixed delay
    ///
    /// Does not retry on client errors (4xx except 429).
    async fn with_retry<T, F, Fut>(&self, operation: &str, f: F) -> Result<T, LanternError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, LanternError>>,
    {
        let mut delay = Duration::from_millis(INITIAL_BACKOFF_MS);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match f().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempts < MAX_RETRY_ATTEMPTS => {
                    let actual_delay = if e.is_rate_limit() {
                        e.retry_after().unwrap_or(delay)
                    } else if matches!(e, LanternError::ServiceUnavailable { .. }) {
                        Duration::from_millis(SERVER_ERROR_DELAY_MS)
                    } else {
                        e.retry_after().unwrap_or(delay)
                    };

                    tracing::debug!(
                        operation = operation,
                        attempt = attempts,
                        max_attempts = MAX_RETRY_ATTEMPTS,
                        delay_ms = actual_delay.as_millis() as u64,
                        error = %e.sanitized_display(&self.api_token),
                        "Retrying after transient error"
                    );

                    tokio::time::sleep(actual_delay).await;

                    if e.is_rate_limit() {
                        delay *= 2;
                    }
                }
                Err(e) => {
                    if attempts > 1 {
                        tracing::debug!(
                            operation = operation,
                            attempts = attempts,
                            "All retry attempts exhausted"
                        );
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Sends one request and returns the raw response body.
    ///
    /// This is the low-level request method without retry logic.
    async fn send_inner(
        &self,
        method: Method,
        api: Api,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<String, LanternError> {
        let url = format!("{}{}{}", self.base_url, api.root(), path);

        tracing::debug!(
            method = %method,
            path = %path,
            "Making Jira API request"
        );

        let mut req = self
            .http
            .request(method.clone(), &url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
            .header("X-ExperimentalApi", "opt-in");

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                return LanternError::timeout(
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                    format!("{} {}", method, path),
                );
            }
            LanternError::Http(e)
        })?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let body = response.text().await.map_err(LanternError::Http)?;

        tracing::trace!(body = %body, "Jira API response");

        Ok(body)
    }

    /// Sends a request with automatic retry for transient failures.
    async fn send(
        &self,
        method: Method,
        api: Api,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<String, LanternError> {
        let operation = format!("{} {}", method, path);
        self.with_retry(&operation, || {
            self.send_inner(method.clone(), api, path, query, body.as_ref())
        })
        .await
    }

    /// Sends a request and parses the JSON response.
    async fn request<T>(
        &self,
        method: Method,
        api: Api,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T, LanternError>
    where
        T: DeserializeOwned,
    {
        let text = self.send(method, api, path, query, body).await?;
        serde_json::from_str(&text).map_err(LanternError::Serialization)
    }

    /// Makes a GET request and parses the JSON response.
    async fn get<T>(&self, api: Api, path: &str, query: &[(&str, &str)]) -> Result<T, LanternError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, api, path, query, None).await
    }

    /// Makes a POST request and parses the JSON response.
    async fn post<T>(&self, api: Api, path: &str, body: Value) -> Result<T, LanternError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::POST, api, path, &[], Some(body)).await
    }

    /// Makes a request whose success response has no body (HTTP 204).
    async fn send_no_content(
        &self,
        method: Method,
        api: Api,
        path: &str,
        body: Value,
    ) -> Result<(), LanternError> {
        self.send(method, api, path, &[], Some(body)).await.map(|_| ())
    }

    /// Handles HTTP-level errors and converts to LanternError.
    ///
    /// Classifies errors into specific types for proper retry handling.
    async fn handle_http_error(&self, status: StatusCode, response: reqwest::Response) -> LanternError {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = response.text().await.unwrap_or_default();
        let body = LanternError::sanitize_message(&body, &self.api_token);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LanternError::Authentication,
            StatusCode::NOT_FOUND => LanternError::not_found("resource"),
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Rate limited by Jira");
                LanternError::RateLimited { retry_after }
            }
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                tracing::warn!(status = %status, "Jira temporarily unavailable");
                LanternError::ServiceUnavailable { status }
            }
            _ if status.is_client_error() => {
                match serde_json::from_str::<JiraErrorBody>(&body)
                    .ok()
                    .and_then(|parsed| parsed.summary())
                {
                    Some(message) => LanternError::jira_api(status, truncate_body(message)),
                    None => LanternError::HttpStatus {
                        status,
                        body: truncate_body(body),
                    },
                }
            }
            _ => LanternError::HttpStatus {
                status,
                body: truncate_body(body),
            },
        }
    }

    /// Maps the generic `NotFound` from `handle_http_error` to a named resource.
    fn name_not_found(e: LanternError, resource: impl FnOnce() -> String) -> LanternError {
        if matches!(e, LanternError::NotFound { .. }) {
            LanternError::not_found(resource())
        } else {
            e
        }
    }

    /// Logs a failed enrichment lookup and yields an empty list.
    fn degrade<T>(&self, request_id: &str, what: &str, e: LanternError) -> Vec<T> {
        tracing::warn!(
            request_id = %request_id,
            lookup = what,
            error = %e.sanitized_display(&self.api_token),
            "Failed to load request details, continuing without them"
        );
        Vec::new()
    }

    /// Returns the numeric service desk id.
    ///
    /// A numeric configuration value is used as-is. A project key (`"SUP"`)
    /// is looked up among the site's service desks, case-insensitively.
    /// The result is cached for the lifetime of the client.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::ServiceDeskNotFound` if no service desk has
    /// the configured project key.
    pub async fn service_desk_id(&self) -> Result<String, LanternError> {
        self.service_desk_id
            .get_or_try_init(|| async {
                if !self.service_desk.is_empty()
                    && self.service_desk.bytes().all(|b| b.is_ascii_digit())
                {
                    return Ok(self.service_desk.clone());
                }

                let desks: PagedResponse<ServiceDesk> =
                    self.get(Api::ServiceDesk, "servicedesk", &[]).await?;
                let id = desks
                    .values
                    .into_iter()
                    .find(|desk| desk.project_key.eq_ignore_ascii_case(&self.service_desk))
                    .map(|desk| desk.id)
                    .ok_or_else(|| LanternError::ServiceDeskNotFound {
                        key: self.service_desk.clone(),
                    })?;

                tracing::debug!(key = %self.service_desk, id = %id, "Resolved service desk id");
                Ok::<_, LanternError>(id)
            })
            .await
            .cloned()
    }

    /// Lists the queues of the configured service desk.
    pub async fn list_queues(&self) -> Result<Vec<Queue>, LanternError> {
        let sd = self.service_desk_id().await?;
        let path = format!("servicedesk/{}/queue", sd);

        let page: PagedResponse<Queue> = self.get(Api::ServiceDesk, &path, &[]).await?;

        Ok(page.values)
    }

    /// Lists the requests in a queue.
    ///
    /// Issues are mapped as returned by the queue endpoint; transitions,
    /// assignable users and attachment bytes are only loaded by
    /// [`JiraClient::get_request`].
    pub async fn list_queue_requests(&self, queue_id: &str) -> Result<Vec<Request>, LanternError> {
        Self::validate_id(queue_id, "queue_id")?;
        let sd = self.service_desk_id().await?;
        let path = format!("servicedesk/{}/queue/{}/issue", sd, queue_id);

        let page: PagedResponse<IssuePayload> = self
            .get(Api::ServiceDesk, &path, &[])
            .await
            .map_err(|e| Self::name_not_found(e, || format!("queue {}", queue_id)))?;

        Ok(page.values.into_iter().map(Request::from).collect())
    }

    /// Gets full details of a single request.
    ///
    /// Loads the issue, then its available transitions, its assignable
    /// users and the bytes of each attachment. Those extras are best effort:
    /// a failure there is logged and leaves the field empty.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::NotFound` if the issue doesn't exist.
    pub async fn get_request(&self, id: &str) -> Result<Request, LanternError> {
        Self::validate_issue_ref(id, "request_id")?;
        let path = format!("issue/{}", id);

        let payload: IssuePayload = self
            .get(Api::Platform, &path, &[])
            .await
            .map_err(|e| Self::name_not_found(e, || format!("request {}", id)))?;

        let mut request = Request::from(payload);
        let issue_id = request.id.clone();
        request.transitions = self
            .list_transitions(&issue_id)
            .await
            .unwrap_or_else(|e| self.degrade(&issue_id, "transitions", e));
        request.assignable_users = self
            .list_assignable_users(&issue_id)
            .await
            .unwrap_or_else(|e| self.degrade(&issue_id, "assignable users", e));

        for attachment in &mut request.attachments {
            attachment.content = self.fetch_attachment_content(&attachment.id).await;
        }

        Ok(request)
    }

    /// Creates a request on the configured service desk.
    ///
    /// The description is markdown and is sent as an ADF document.
    ///
    /// # Returns
    ///
    /// The id of the new issue.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::RequestTypeNotFound` if no request type has
    /// the given name.
    pub async fn create_request(
        &self,
        queue_name: &str,
        request_type: &str,
        summary: &str,
        description: &str,
    ) -> Result<CreatedRequest, LanternError> {
        let sd = self.service_desk_id().await?;

        let request_type_id = self
            .list_request_types()
            .await?
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(request_type))
            .map(|t| t.id)
            .ok_or_else(|| LanternError::RequestTypeNotFound {
                name: request_type.to_string(),
            })?;

        tracing::debug!(
            queue = %queue_name,
            request_type_id = %request_type_id,
            "Creating service desk request"
        );

        let body = json!({
            "serviceDeskId": sd,
            "requestTypeId": request_type_id,
            "isAdfRequest": true,
            "requestFieldValues": {
                "summary": summary,
                "description": markdown_to_doc(description),
            }
        });

        self.post(Api::ServiceDesk, "request", body).await
    }

    /// Replaces the summary and description of a request.
    pub async fn update_request(
        &self,
        id: &str,
        summary: &str,
        description: &str,
    ) -> Result<(), LanternError> {
        Self::validate_issue_ref(id, "request_id")?;
        let path = format!("issue/{}", id);

        let body = json!({
            "fields": {
                "summary": summary,
                "description": markdown_to_doc(description),
            }
        });

        self.send_no_content(Method::PUT, Api::Platform, &path, body)
            .await
            .map_err(|e| Self::name_not_found(e, || format!("request {}", id)))
    }

    /// Adds a comment to a request.
    ///
    /// Internal comments carry the `sd.public.comment` property with
    /// `internal: true` and are hidden from the customer.
    ///
    /// # Returns
    ///
    /// The id of the new comment.
    pub async fn add_comment(
        &self,
        id: &str,
        text: &str,
        is_public: bool,
    ) -> Result<String, LanternError> {
        Self::validate_issue_ref(id, "request_id")?;
        let path = format!("issue/{}/comment", id);

        let body = json!({
            "body": markdown_to_doc(text),
            "properties": [
                {
                    "key": "sd.public.comment",
                    "value": { "internal": !is_public }
                }
            ]
        });

        let created: CreatedComment = self
            .post(Api::Platform, &path, body)
            .await
            .map_err(|e| Self::name_not_found(e, || format!("request {}", id)))?;

        Ok(created.id)
    }

    /// Moves a request through a workflow transition.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::TransitionRejected` with the transitions that
    /// are currently allowed when Jira refuses the transition.
    pub async fn transition_request(&self, id: &str, transition_id: &str) -> Result<(), LanternError> {
        Self::validate_issue_ref(id, "request_id")?;
        Self::validate_id(transition_id, "transition_id")?;
        let path = format!("issue/{}/transitions", id);

        let body = json!({ "transition": { "id": transition_id } });

        match self.send_no_content(Method::POST, Api::Platform, &path, body).await {
            Ok(()) => Ok(()),
            Err(LanternError::JiraApi { .. }) | Err(LanternError::HttpStatus { .. }) => {
                let allowed = self.list_transitions(id).await?;
                tracing::warn!(
                    request_id = %id,
                    transition_id = %transition_id,
                    allowed = allowed.len(),
                    "Transition rejected"
                );
                Err(LanternError::TransitionRejected {
                    transition_id: transition_id.to_string(),
                    allowed,
                })
            }
            Err(e) => Err(Self::name_not_found(e, || format!("request {}", id))),
        }
    }

    /// Sets the priority of a request by priority name.
    pub async fn change_priority(&self, id: &str, priority_name: &str) -> Result<(), LanternError> {
        Self::validate_issue_ref(id, "request_id")?;
        let path = format!("issue/{}", id);

        let body = json!({ "fields": { "priority": { "name": priority_name } } });

        self.send_no_content(Method::PUT, Api::Platform, &path, body)
            .await
            .map_err(|e| Self::name_not_found(e, || format!("request {}", id)))
    }

    /// Assigns a request to the assignable user with the given display name.
    ///
    /// # Returns
    ///
    /// The user the request was assigned to.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::UserNotFound` if no assignable user has
    /// exactly that display name.
    pub async fn assign_user(&self, id: &str, display_name: &str) -> Result<User, LanternError> {
        Self::validate_issue_ref(id, "request_id")?;

        let user = self
            .list_assignable_users(id)
            .await?
            .into_iter()
            .find(|u| u.display_name == display_name)
            .ok_or_else(|| LanternError::UserNotFound {
                display_name: display_name.to_string(),
            })?;

        let path = format!("issue/{}", id);
        let body = json!({ "fields": { "assignee": { "accountId": user.account_id } } });

        self.send_no_content(Method::PUT, Api::Platform, &path, body)
            .await
            .map_err(|e| Self::name_not_found(e, || format!("request {}", id)))?;

        Ok(user)
    }

    /// Lists the transitions currently available on a request.
    pub async fn list_transitions(&self, id: &str) -> Result<Vec<Transition>, LanternError> {
        Self::validate_issue_ref(id, "request_id")?;
        let path = format!("issue/{}/transitions", id);

        let response: TransitionsResponse = self
            .get(Api::Platform, &path, &[])
            .await
            .map_err(|e| Self::name_not_found(e, || format!("request {}", id)))?;

        Ok(response.transitions)
    }

    /// Lists the users a request can be assigned to.
    pub async fn list_assignable_users(&self, id: &str) -> Result<Vec<User>, LanternError> {
        Self::validate_issue_ref(id, "request_id")?;

        let param = if id.bytes().all(|b| b.is_ascii_digit()) {
            "issueId"
        } else {
            "issueKey"
        };

        self.get(Api::Platform, "user/assignable/search", &[(param, id)])
            .await
    }

    /// Lists the request types of the configured service desk.
    pub async fn list_request_types(&self) -> Result<Vec<RequestType>, LanternError> {
        let sd = self.service_desk_id().await?;
        let path = format!("servicedesk/{}/requesttype", sd);

        let page: PagedResponse<RequestType> = self.get(Api::ServiceDesk, &path, &[]).await?;

        Ok(page.values)
    }

    /// Lists the priorities defined on the site.
    pub async fn list_priorities(&self) -> Result<Vec<Priority>, LanternError> {
        self.get(Api::Platform, "priority", &[]).await
    }

    /// Downloads the bytes of an attachment.
    ///
    /// Failures are logged and yield `None`, so one unreadable attachment
    /// does not fail the whole request lookup.
    pub async fn fetch_attachment_content(&self, attachment_id: &str) -> Option<Vec<u8>> {
        let result = match Self::validate_id(attachment_id, "attachment_id") {
            Ok(()) => {
                let operation = format!("GET attachment/content/{}", attachment_id);
                self.with_retry(&operation, || self.fetch_attachment_content_inner(attachment_id))
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(
                    attachment_id = %attachment_id,
                    error = %e.sanitized_display(&self.api_token),
                    "Failed to fetch attachment content"
                );
                None
            }
        }
    }

    /// Inner implementation of attachment download (without retry wrapper).
    async fn fetch_attachment_content_inner(&self, attachment_id: &str) -> Result<Vec<u8>, LanternError> {
        let url = format!(
            "{}{}attachment/content/{}",
            self.base_url,
            Api::Platform.root(),
            attachment_id
        );

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "*/*")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    return LanternError::timeout(
                        Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                        format!("GET attachment/content/{}", attachment_id),
                    );
                }
                LanternError::Http(e)
            })?;

        if !response.status().is_success() {
            return Err(self.handle_http_error(response.status(), response).await);
        }

        let bytes = response.bytes().await.map_err(LanternError::Http)?;
        Ok(bytes.to_vec())
    }
}

/// Truncates an error body to avoid leaking verbose server internals.
fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
