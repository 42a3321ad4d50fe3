//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace
//! from identifier fields. Markdown bodies are only trimmed at the ends,
//! since inner line structure carries meaning.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

/// Input parameters for the list_queue_requests tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListQueueRequestsInput {
    /// The ID of the queue (use list_queues to find IDs).
    pub queue_id: String,
}

impl ListQueueRequestsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            queue_id: self.queue_id.trim().to_string(),
        }
    }
}

/// Input parameters for the get_request tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRequestInput {
    /// The ID or key of the request to retrieve (e.g., "10001" or "SUP-12").
    pub request_id: String,
}

impl GetRequestInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
        }
    }
}

/// Input parameters for the create_request tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateRequestInput {
    /// Name of the queue the request is meant for.
    pub queue_name: String,

    /// Request type name (use list_request_types to see the options).
    pub request_type: String,

    /// Summary of the request (required, max 255 characters).
    pub summary: String,

    /// Description in markdown: '#'-'###' headings, '-' or '*' bullet items, **bold** or __bold__.
    pub description: String,
}

impl CreateRequestInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            queue_name: self.queue_name.trim().to_string(),
            request_type: self.request_type.trim().to_string(),
            summary: self.summary.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Input parameters for the update_request tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateRequestInput {
    /// The ID or key of the request to update.
    pub request_id: String,

    /// New summary (max 255 characters).
    pub summary: String,

    /// New description in markdown (replaces the current one).
    pub description: String,
}

impl UpdateRequestInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
            summary: self.summary.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Input parameters for the add_comment tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddCommentInput {
    /// The ID or key of the request to comment on.
    pub request_id: String,

    /// Comment text in markdown.
    pub text: String,

    /// True for a comment the customer can see, false for an internal note.
    pub is_public: bool,
}

impl AddCommentInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
            text: self.text.trim().to_string(),
            is_public: self.is_public,
        }
    }
}

/// Input parameters for the change_status tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChangeStatusInput {
    /// The ID or key of the request to transition.
    pub request_id: String,

    /// The transition ID (get_request lists the available transitions).
    pub transition_id: String,
}

impl ChangeStatusInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
            transition_id: self.transition_id.trim().to_string(),
        }
    }
}

/// Input parameters for the change_priority tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChangePriorityInput {
    /// The ID or key of the request.
    pub request_id: String,

    /// The new priority name (use list_priorities to see the options).
    pub priority_name: String,
}

impl ChangePriorityInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
            priority_name: self.priority_name.trim().to_string(),
        }
    }
}

/// Input parameters for the assign_user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AssignUserInput {
    /// The ID or key of the request to assign.
    pub request_id: String,

    /// Exact display name of the user (get_request lists assignable users).
    pub display_name: String,
}

impl AssignUserInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_request_input_sanitize() {
        let input = GetRequestInput {
            request_id: "  SUP-12  ".to_string(),
        };
        assert_eq!(input.sanitize().request_id, "SUP-12");
    }

    #[test]
    fn test_create_request_input_keeps_inner_lines() {
        let input = CreateRequestInput {
            queue_name: " All open ".to_string(),
            request_type: " Get IT help ".to_string(),
            summary: "  Laptop broken ".to_string(),
            description: "\n# Details\n- screen\n- keyboard\n\n".to_string(),
        };
        let sanitized = input.sanitize();
        assert_eq!(sanitized.queue_name, "All open");
        assert_eq!(sanitized.request_type, "Get IT help");
        assert_eq!(sanitized.summary, "Laptop broken");
        assert_eq!(sanitized.description, "# Details\n- screen\n- keyboard");
    }

    #[test]
    fn test_add_comment_input_deserialize() {
        let json = r#"{"request_id": "SUP-1", "text": "On it", "is_public": false}"#;
        let input: AddCommentInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.request_id, "SUP-1");
        assert_eq!(input.text, "On it");
        assert!(!input.is_public);
    }

    #[test]
    fn test_add_comment_input_requires_visibility() {
        let json = r#"{"request_id": "SUP-1", "text": "On it"}"#;
        assert!(serde_json::from_str::<AddCommentInput>(json).is_err());
    }

    #[test]
    fn test_change_status_input_sanitize() {
        let input: ChangeStatusInput =
            serde_json::from_str(r#"{"request_id": " 10001 ", "transition_id": " 31 "}"#).unwrap();
        let input = input.sanitize();
        assert_eq!(input.request_id, "10001");
        assert_eq!(input.transition_id, "31");
    }

    #[test]
    fn test_assign_user_input_deserialize() {
        let json = r#"{"request_id": "SUP-3", "display_name": "Mia Krystof"}"#;
        let input: AssignUserInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.display_name, "Mia Krystof");
    }

    #[test]
    fn test_list_queue_requests_input_sanitize() {
        let input = ListQueueRequestsInput {
            queue_id: " 3 ".to_string(),
        };
        assert_eq!(input.sanitize().queue_id, "3");
    }

    #[test]
    fn test_change_priority_input_sanitize() {
        let input = ChangePriorityInput {
            request_id: "SUP-4".to_string(),
            priority_name: " Highest ".to_string(),
        };
        assert_eq!(input.sanitize().priority_name, "Highest");
    }

    #[test]
    fn test_update_request_input_deserialize() {
        let json = r#"{"request_id": "SUP-4", "summary": "New", "description": "**Now** urgent"}"#;
        let input: UpdateRequestInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.summary, "New");
        assert_eq!(input.description, "**Now** urgent");
    }
}
