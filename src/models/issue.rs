//! Issue (request) models for the Jira API.
//!
//! Jira returns issues as `{ id, key, fields: {...} }`. `IssuePayload`
//! mirrors that shape; `Request` is the flattened record the tools work with.

use serde::Deserialize;

use super::comment::CommentPage;
use super::common::deserialize_id;
use super::{Attachment, Comment, Transition, User};
use crate::adf::{decode_simple_text, Document};

/// A service desk request with its description flattened to text.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Issue id.
    pub id: String,

    /// Issue key (e.g., "SUP-12").
    pub key: String,

    /// Summary line.
    pub summary: String,

    /// Description text (top-level paragraphs only).
    pub description: String,

    /// Current status name.
    pub status: String,

    /// Current priority name, if set.
    pub priority: Option<String>,

    /// Who raised the request.
    pub reporter: Option<User>,

    /// Who the request is assigned to.
    pub assignee: Option<User>,

    /// Creation timestamp as sent by Jira.
    pub created: String,

    /// Attached files.
    pub attachments: Vec<Attachment>,

    /// Comments in creation order.
    pub comments: Vec<Comment>,

    /// Transitions available from the current status.
    pub transitions: Vec<Transition>,

    /// Users the request can be assigned to.
    pub assignable_users: Vec<User>,
}

impl Request {
    /// Returns the summary or a placeholder.
    pub fn display_summary(&self) -> &str {
        if self.summary.is_empty() {
            "(No summary)"
        } else {
            &self.summary
        }
    }

    /// Returns the status or a placeholder.
    pub fn display_status(&self) -> &str {
        if self.status.is_empty() {
            "Unknown"
        } else {
            &self.status
        }
    }

    /// Returns the assignee name or "Unassigned".
    pub fn display_assignee(&self) -> &str {
        self.assignee.as_ref().map_or("Unassigned", User::display)
    }

    /// Returns the reporter name or "Unknown".
    pub fn display_reporter(&self) -> &str {
        self.reporter.as_ref().map_or("Unknown", User::display)
    }
}

/// An issue as returned by `GET issue/{id}` and the queue listing.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    /// Issue id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Issue key.
    #[serde(default)]
    pub key: Option<String>,

    /// Field values.
    #[serde(default)]
    pub fields: IssueFields,
}

/// The subset of issue fields Lantern reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    /// Summary line.
    #[serde(default)]
    pub summary: Option<String>,

    /// ADF description, or null.
    #[serde(default)]
    pub description: Option<serde_json::Value>,

    /// Status object.
    #[serde(default)]
    pub status: Option<NamedField>,

    /// Priority object.
    #[serde(default)]
    pub priority: Option<NamedField>,

    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,

    /// Reporter.
    #[serde(default)]
    pub reporter: Option<User>,

    /// Assignee, null when unassigned.
    #[serde(default)]
    pub assignee: Option<User>,

    /// Attachments.
    #[serde(default)]
    pub attachment: Option<Vec<Attachment>>,

    /// Comment page.
    #[serde(default)]
    pub comment: Option<CommentPage>,
}

/// A `{"name": ...}` reference such as a status or priority.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedField {
    /// The name.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<IssuePayload> for Request {
    fn from(issue: IssuePayload) -> Self {
        let fields = issue.fields;
        let description = fields
            .description
            .as_ref()
            .and_then(Document::from_value);

        Self {
            id: issue.id,
            key: issue.key.unwrap_or_default(),
            summary: fields.summary.unwrap_or_default(),
            description: decode_simple_text(description.as_ref()),
            status: fields.status.and_then(|s| s.name).unwrap_or_default(),
            priority: fields.priority.and_then(|p| p.name),
            reporter: fields.reporter,
            assignee: fields.assignee,
            created: fields.created.unwrap_or_default(),
            attachments: fields.attachment.unwrap_or_default(),
            comments: fields
                .comment
                .and_then(|page| page.comments)
                .unwrap_or_default()
                .into_iter()
                .map(Comment::from)
                .collect(),
            transitions: Vec::new(),
            assignable_users: Vec::new(),
        }
    }
}

/// Response of `POST request` on the service desk API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRequest {
    /// Id of the new issue.
    #[serde(deserialize_with = "deserialize_id")]
    pub issue_id: String,

    /// Key of the new issue.
    #[serde(default)]
    pub issue_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE_JSON: &str = r#"{
        "id": "10001",
        "key": "SUP-1",
        "fields": {
            "summary": "Printer on floor 2",
            "description": {"type": "doc", "version": 1, "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "It jams "},
                    {"type": "text", "text": "every", "marks": [{"type": "strong"}]},
                    {"type": "text", "text": " time."}
                ]},
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "tray 2"}]}
                    ]}
                ]}
            ]},
            "status": {"name": "Waiting for support"},
            "priority": {"name": "High"},
            "created": "2024-02-01T09:00:00.000+0000",
            "reporter": {"accountId": "r1", "displayName": "Rae"},
            "assignee": null,
            "attachment": [{"id": "500", "filename": "jam.jpg", "mimeType": "image/jpeg"}],
            "comment": {"comments": [{"id": "900", "body": {"type": "doc", "content": []}}]}
        }
    }"#;

    #[test]
    fn test_issue_maps_to_request() {
        let issue: IssuePayload = serde_json::from_str(ISSUE_JSON).unwrap();
        let request = Request::from(issue);

        assert_eq!(request.id, "10001");
        assert_eq!(request.key, "SUP-1");
        assert_eq!(request.summary, "Printer on floor 2");
        assert_eq!(request.description, "It jams every time.");
        assert_eq!(request.status, "Waiting for support");
        assert_eq!(request.priority.as_deref(), Some("High"));
        assert_eq!(request.display_reporter(), "Rae");
        assert_eq!(request.display_assignee(), "Unassigned");
        assert_eq!(request.attachments.len(), 1);
        assert_eq!(request.attachments[0].filename, "jam.jpg");
        assert_eq!(request.comments.len(), 1);
        assert!(request.transitions.is_empty());
    }

    #[test]
    fn test_issue_without_fields() {
        let issue: IssuePayload = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let request = Request::from(issue);
        assert_eq!(request.id, "42");
        assert_eq!(request.description, "");
        assert_eq!(request.display_summary(), "(No summary)");
        assert_eq!(request.display_status(), "Unknown");
    }

    #[test]
    fn test_null_description_is_empty() {
        let issue: IssuePayload =
            serde_json::from_str(r#"{"id": "1", "fields": {"description": null}}"#).unwrap();
        assert_eq!(Request::from(issue).description, "");
    }

    #[test]
    fn test_created_request_deserialize() {
        let created: CreatedRequest =
            serde_json::from_str(r#"{"issueId": "10010", "issueKey": "SUP-10"}"#).unwrap();
        assert_eq!(created.issue_id, "10010");
        assert_eq!(created.issue_key.as_deref(), Some("SUP-10"));
    }
}
