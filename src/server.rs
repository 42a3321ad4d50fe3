//! MCP server implementation for Lantern.
//!
//! This module defines the `LanternServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Jira Service Management operations as tools.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData, ServerHandler,
};

use crate::error::LanternError;
use crate::jira_client::JiraClient;
use crate::models::{CreatedRequest, Priority, Queue, Request, RequestType, Transition, User};
use crate::tools::{
    AddCommentInput, AssignUserInput, ChangePriorityInput, ChangeStatusInput, CreateRequestInput,
    GetRequestInput, ListQueueRequestsInput, UpdateRequestInput,
};

/// Maximum length of a request summary, in characters.
const MAX_SUMMARY_LENGTH: usize = 255;

/// The Lantern MCP server.
///
/// This server exposes Jira Service Management operations as MCP tools.
#[derive(Clone)]
pub struct LanternServer {
    /// Jira client for API operations.
    jira: JiraClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LanternServer {
    /// Creates a new Lantern server instance.
    pub fn new(jira: JiraClient) -> Self {
        Self {
            jira,
            tool_router: Self::tool_router(),
        }
    }

    /// A simple ping tool to verify the server is running.
    #[tool(description = "Test connectivity to the Lantern MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    #[tool(description = "List all queues on the configured Jira service desk. Returns queue IDs and names.")]
    async fn list_queues(&self) -> Result<String, String> {
        tracing::debug!("list_queues tool called");

        let queues = self.jira.list_queues().await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to list queues");
            format!("Failed to list queues: {}", sanitized)
        })?;

        Ok(format_queue_list(&queues))
    }

    #[tool(description = "List all requests in a service desk queue. Returns key, summary, status and assignee for each request.")]
    async fn list_queue_requests(
        &self,
        Parameters(input): Parameters<ListQueueRequestsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(queue_id = %input.queue_id, "list_queue_requests tool called");

        let requests = self
            .jira
            .list_queue_requests(&input.queue_id)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, queue_id = %input.queue_id, "Failed to list queue requests");
                format!("Failed to list requests in queue {}: {}", input.queue_id, sanitized)
            })?;

        Ok(format_request_list(&requests))
    }

    /// Get full details of a single request.
    ///
    /// Image attachments whose bytes could be downloaded are returned as
    /// additional image content after the text.
    #[tool(description = "Get full details of a service desk request: description, comments, attachments, available status transitions and assignable users. Image attachments are included as images.")]
    async fn get_request(
        &self,
        Parameters(input): Parameters<GetRequestInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let input = input.sanitize();
        tracing::debug!(request_id = %input.request_id, "get_request tool called");

        match self.jira.get_request(&input.request_id).await {
            Ok(request) => {
                let url = (!request.key.is_empty()).then(|| self.jira.browse_url(&request.key));
                Ok(CallToolResult::success(request_contents(&request, url.as_deref())))
            }
            Err(e) => {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, request_id = %input.request_id, "Failed to get request");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Failed to get request {}: {}",
                    input.request_id, sanitized
                ))]))
            }
        }
    }

    /// Create a new service desk request.
    ///
    /// The description is markdown and is stored as a formatted document.
    #[tool(description = "Create a new service desk request. Requires the queue name, the request type name (see list_request_types), a summary and a markdown description. Supported markdown: '#' to '###' headings, '-' or '*' bullet items, **bold** or __bold__.")]
    async fn create_request(
        &self,
        Parameters(input): Parameters<CreateRequestInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(request_type = %input.request_type, "create_request tool called");

        validate_summary(&input.summary)?;
        if input.request_type.is_empty() {
            return Err("Request type is required and cannot be empty.".to_string());
        }

        let created = self
            .jira
            .create_request(
                &input.queue_name,
                &input.request_type,
                &input.summary,
                &input.description,
            )
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, "Failed to create request");
                format!("Failed to create request: {}", sanitized)
            })?;

        let url = created.issue_key.as_deref().map(|key| self.jira.browse_url(key));
        Ok(format_create_result(&created, &input.summary, url.as_deref()))
    }

    #[tool(description = "Replace the summary and markdown description of an existing request.")]
    async fn update_request(
        &self,
        Parameters(input): Parameters<UpdateRequestInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(request_id = %input.request_id, "update_request tool called");

        validate_summary(&input.summary)?;

        self.jira
            .update_request(&input.request_id, &input.summary, &input.description)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, request_id = %input.request_id, "Failed to update request");
                format!("Failed to update request {}: {}", input.request_id, sanitized)
            })?;

        Ok(format!(
            "Successfully updated request {}.\n\nSummary: {}\n",
            input.request_id, input.summary
        ))
    }

    /// Add a comment to a request.
    ///
    /// Comments are either public (visible to the customer) or internal.
    #[tool(description = "Add a markdown comment to a request. Set is_public to true for a reply the customer can see, false for an internal note.")]
    async fn add_comment(
        &self,
        Parameters(input): Parameters<AddCommentInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(request_id = %input.request_id, is_public = input.is_public, "add_comment tool called");

        if input.text.is_empty() {
            return Err("Comment text is required and cannot be empty.".to_string());
        }

        let comment_id = self
            .jira
            .add_comment(&input.request_id, &input.text, input.is_public)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, request_id = %input.request_id, "Failed to add comment");
                format!("Failed to add comment to request {}: {}", input.request_id, sanitized)
            })?;

        let visibility = if input.is_public {
            "Public (visible to the customer)"
        } else {
            "Internal (agents only)"
        };
        Ok(format!(
            "Successfully added comment #{} to request {}.\n\nVisibility: {}\n",
            comment_id, input.request_id, visibility
        ))
    }

    /// Change the status of a request through a workflow transition.
    ///
    /// When the transition is not allowed, the available ones are listed.
    #[tool(description = "Change the status of a request by applying a workflow transition. Use get_request to see the transition IDs that are currently allowed.")]
    async fn change_status(
        &self,
        Parameters(input): Parameters<ChangeStatusInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(request_id = %input.request_id, transition_id = %input.transition_id, "change_status tool called");

        match self
            .jira
            .transition_request(&input.request_id, &input.transition_id)
            .await
        {
            Ok(()) => Ok(format!(
                "Successfully applied transition {} to request {}.\n",
                input.transition_id, input.request_id
            )),
            Err(LanternError::TransitionRejected { transition_id, allowed }) => Err(format!(
                "Transition {} is not allowed for request {}. Only the following transitions are allowed:\n{}",
                transition_id,
                input.request_id,
                format_transition_list(&allowed)
            )),
            Err(e) => {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, request_id = %input.request_id, "Failed to change status");
                Err(format!(
                    "Failed to change status of request {}: {}",
                    input.request_id, sanitized
                ))
            }
        }
    }

    #[tool(description = "Change the priority of a request by priority name (see list_priorities).")]
    async fn change_priority(
        &self,
        Parameters(input): Parameters<ChangePriorityInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(request_id = %input.request_id, priority = %input.priority_name, "change_priority tool called");

        if input.priority_name.is_empty() {
            return Err("Priority name is required and cannot be empty.".to_string());
        }

        self.jira
            .change_priority(&input.request_id, &input.priority_name)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, request_id = %input.request_id, "Failed to change priority");
                format!("Failed to change priority of request {}: {}", input.request_id, sanitized)
            })?;

        Ok(format!(
            "Successfully changed priority of request {} to {}.\n",
            input.request_id, input.priority_name
        ))
    }

    #[tool(description = "Assign a request to a user by exact display name. Use get_request to see the assignable users.")]
    async fn assign_user(
        &self,
        Parameters(input): Parameters<AssignUserInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(request_id = %input.request_id, "assign_user tool called");

        if input.display_name.is_empty() {
            return Err("Display name is required and cannot be empty.".to_string());
        }

        let user = self
            .jira
            .assign_user(&input.request_id, &input.display_name)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, request_id = %input.request_id, "Failed to assign request");
                format!("Failed to assign request {}: {}", input.request_id, sanitized)
            })?;

        Ok(format!(
            "Successfully assigned request {} to {}.\n",
            input.request_id,
            user.display()
        ))
    }

    #[tool(description = "List the request types of the configured service desk. Use a name from this list when creating requests.")]
    async fn list_request_types(&self) -> Result<String, String> {
        tracing::debug!("list_request_types tool called");

        let types = self.jira.list_request_types().await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to list request types");
            format!("Failed to list request types: {}", sanitized)
        })?;

        Ok(format_request_type_list(&types))
    }

    #[tool(description = "List the priorities that can be set on requests.")]
    async fn list_priorities(&self) -> Result<String, String> {
        tracing::debug!("list_priorities tool called");

        let priorities = self.jira.list_priorities().await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to list priorities");
            format!("Failed to list priorities: {}", sanitized)
        })?;

        Ok(format_priority_list(&priorities))
    }

    /// Sanitizes an error message to remove the API token.
    fn sanitize_error(&self, error: &LanternError) -> String {
        error.sanitized_display(self.jira.api_token_for_sanitization())
    }
}

#[tool_handler]
impl ServerHandler for LanternServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Lantern provides access to a Jira Service Management service desk. \
                 Use list_queues and list_queue_requests to find requests, and \
                 get_request for details, comments, transitions and assignable users. \
                 Create requests with create_request (see list_request_types), edit them \
                 with update_request, reply with add_comment, and use change_status, \
                 change_priority (see list_priorities) and assign_user to triage. \
                 Descriptions and comments accept markdown headings, bullet lists and bold. \
                 Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Response formatting helpers
// ============================================================================

/// Maximum length for description and comment text before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 2000;

const TRUNCATION_MARKER: &str = "... [truncated]";

/// Truncates a string if it exceeds the maximum length.
///
/// If truncated, appends "... [truncated]" to indicate the content was cut.
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }

    let mut end = max_length.saturating_sub(TRUNCATION_MARKER.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    // Prefer a word boundary
    if let Some(space_pos) = text[..end].rfind(char::is_whitespace) {
        end = space_pos;
    }
    format!("{}{}", &text[..end], TRUNCATION_MARKER)
}

/// Checks a summary is present and within Jira's length limit.
fn validate_summary(summary: &str) -> Result<(), String> {
    if summary.is_empty() {
        return Err("Summary is required and cannot be empty.".to_string());
    }
    let length = summary.chars().count();
    if length > MAX_SUMMARY_LENGTH {
        return Err(format!(
            "Summary exceeds maximum length of {} characters (got {} characters).",
            MAX_SUMMARY_LENGTH, length
        ));
    }
    Ok(())
}

fn format_queue_list(queues: &[Queue]) -> String {
    if queues.is_empty() {
        return "No queues found on this service desk.".to_string();
    }

    let mut output = format!("Found {} queue(s):\n\n", queues.len());
    for queue in queues {
        output.push_str(&format!("ID: {} | Name: {}\n", queue.id, queue.name));
    }
    output
}

/// Formats a list of requests as human-readable text.
fn format_request_list(requests: &[Request]) -> String {
    if requests.is_empty() {
        return "No requests found in this queue.".to_string();
    }

    let mut output = format!("Found {} request(s):\n\n", requests.len());

    for req in requests {
        let label = if req.key.is_empty() { &req.id } else { &req.key };
        output.push_str(&format!("{} (ID {}) - {}\n", label, req.id, req.display_summary()));
        output.push_str(&format!(
            "   Status: {} | Priority: {} | Assignee: {}\n",
            req.display_status(),
            req.priority.as_deref().unwrap_or("None"),
            req.display_assignee()
        ));
        output.push_str(&format!("   Reporter: {}\n", req.display_reporter()));
        if !req.created.is_empty() {
            output.push_str(&format!("   Created: {}\n", req.created));
        }
        output.push('\n');
    }

    output
}

/// Builds the tool result for `get_request`: the text details followed by
/// one image per image attachment with downloaded bytes.
fn request_contents(request: &Request, url: Option<&str>) -> Vec<Content> {
    let mut contents = vec![Content::text(format_request_details(request, url))];

    for attachment in &request.attachments {
        if let Some(bytes) = attachment.content.as_deref().filter(|_| attachment.is_image()) {
            contents.push(Content::image(STANDARD.encode(bytes), attachment.mime_type.clone()));
        }
    }

    contents
}

/// Formats full request details as human-readable text.
fn format_request_details(request: &Request, url: Option<&str>) -> String {
    let mut output = String::new();

    let label = if request.key.is_empty() {
        &request.id
    } else {
        &request.key
    };
    output.push_str(&format!("Request {}: {}\n", label, request.display_summary()));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    output.push_str(&format!("\nID: {}\n", request.id));
    if let Some(url) = url {
        output.push_str(&format!("URL: {}\n", url));
    }
    output.push_str(&format!("Status: {}\n", request.display_status()));
    if let Some(priority) = &request.priority {
        output.push_str(&format!("Priority: {}\n", priority));
    }

    output.push_str(&format!("\nReporter: {}\n", request.display_reporter()));
    output.push_str(&format!("Assigned to: {}\n", request.display_assignee()));
    if !request.created.is_empty() {
        output.push_str(&format!("Created: {}\n", request.created));
    }

    if !request.description.is_empty() {
        output.push_str("\n--- Description ---\n");
        output.push_str(&truncate_text(&request.description, MAX_DESCRIPTION_LENGTH));
        output.push('\n');
    }

    if !request.attachments.is_empty() {
        output.push_str("\n--- Attachments ---\n");
        for attachment in &request.attachments {
            output.push_str(&format!(
                "#{} {} ({}, {} bytes)",
                attachment.id, attachment.filename, attachment.mime_type, attachment.size
            ));
            if attachment.content.is_none() {
                output.push_str(" [content unavailable]");
            }
            output.push('\n');
        }
    }

    if !request.comments.is_empty() {
        output.push_str(&format!("\n--- Comments ({}) ---\n", request.comments.len()));
        for comment in &request.comments {
            let visibility = if comment.is_public { "public" } else { "internal" };
            output.push_str(&format!(
                "\n#{} by {} on {} [{}]\n",
                comment.id,
                comment.author.display(),
                comment.created,
                visibility
            ));
            output.push_str(&truncate_text(&comment.body_text, MAX_DESCRIPTION_LENGTH));
            output.push('\n');
            for file in &comment.attachments {
                output.push_str(&format!("  Embedded file: {}\n", file.filename));
            }
        }
    }

    if !request.transitions.is_empty() {
        output.push_str("\n--- Available Transitions ---\n");
        output.push_str(&format_transition_list(&request.transitions));
    }

    if !request.assignable_users.is_empty() {
        output.push_str("\n--- Assignable Users ---\n");
        output.push_str(&format_user_list(&request.assignable_users));
    }

    output
}

/// Formats transitions as `ID: 11 | Start progress -> In Progress` lines.
fn format_transition_list(transitions: &[Transition]) -> String {
    if transitions.is_empty() {
        return "No transitions available.\n".to_string();
    }

    let mut output = String::new();
    for transition in transitions {
        output.push_str(&format!("ID: {} | {}", transition.id, transition.name));
        if let Some(to) = &transition.to_status {
            output.push_str(&format!(" -> {}", to));
        }
        output.push('\n');
    }
    output
}

fn format_user_list(users: &[User]) -> String {
    let mut output = String::new();
    for user in users {
        output.push_str(user.display());
        if !user.email_address.is_empty() {
            output.push_str(&format!(" <{}>", user.email_address));
        }
        if !user.active {
            output.push_str(" [INACTIVE]");
        }
        output.push('\n');
    }
    output
}

fn format_request_type_list(types: &[RequestType]) -> String {
    if types.is_empty() {
        return "No request types found on this service desk.".to_string();
    }

    let mut output = format!("Found {} request type(s):\n\n", types.len());
    for request_type in types {
        output.push_str(&format!("ID: {} | Name: {}", request_type.id, request_type.name));
        if !request_type.description.is_empty() {
            output.push_str(&format!(" | {}", request_type.description));
        }
        output.push('\n');
    }
    output
}

fn format_priority_list(priorities: &[Priority]) -> String {
    if priorities.is_empty() {
        return "No priorities found.".to_string();
    }

    let mut output = format!("Found {} priorit(ies):\n\n", priorities.len());
    for priority in priorities {
        output.push_str(&format!("ID: {} | Name: {}\n", priority.id, priority.name));
    }
    output
}

/// Formats the result of a create request operation.
fn format_create_result(created: &CreatedRequest, summary: &str, url: Option<&str>) -> String {
    let reference = created.issue_key.as_deref().unwrap_or(&created.issue_id);

    let mut output = format!(
        "Successfully created request {} (ID {}): {}\n",
        reference, created.issue_id, summary
    );
    if let Some(url) = url {
        output.push_str(&format!("URL: {}\n", url));
    }

    output.push_str("\nNext steps:\n");
    output.push_str(&format!(
        "  - View details: use get_request with request_id=\"{}\"\n",
        reference
    ));
    output.push_str(&format!(
        "  - Add comments: use add_comment with request_id=\"{}\"\n",
        reference
    ));

    output
}
