//! Comment models for the Jira API.
//!
//! Comment bodies arrive as ADF documents. Mapping flattens them to text
//! and turns embedded media into placeholder attachments.

use serde::Deserialize;

use super::common::deserialize_id;
use super::{Attachment, User};
use crate::adf::{decode_body, Document};

/// A comment on a request, with its body flattened to text.
#[derive(Debug, Clone, Default)]
pub struct Comment {
    /// Comment id.
    pub id: String,

    /// Who wrote the comment.
    pub author: User,

    /// Who last edited the comment.
    pub update_author: User,

    /// Body text, one paragraph per line.
    pub body_text: String,

    /// Files embedded in the body.
    pub attachments: Vec<Attachment>,

    /// Creation timestamp as sent by Jira.
    pub created: String,

    /// Last update timestamp as sent by Jira.
    pub updated: String,

    /// Whether the customer can see the comment.
    pub is_public: bool,
}

/// Comment as returned by the platform API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    /// Comment id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Author.
    #[serde(default)]
    pub author: Option<User>,

    /// Last editor.
    #[serde(default)]
    pub update_author: Option<User>,

    /// ADF body. Anything other than a document object is ignored.
    #[serde(default)]
    pub body: Option<serde_json::Value>,

    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated: Option<String>,

    /// Customer visibility flag set by Jira Service Management.
    #[serde(default)]
    pub jsd_public: Option<bool>,
}

/// The `fields.comment` wrapper on an issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPage {
    /// Comments in creation order.
    #[serde(default)]
    pub comments: Option<Vec<CommentPayload>>,
}

impl From<CommentPayload> for Comment {
    fn from(payload: CommentPayload) -> Self {
        let body = payload
            .body
            .as_ref()
            .and_then(Document::from_value)
            .map(|doc| decode_body(&doc))
            .unwrap_or_default();

        Self {
            id: payload.id,
            author: payload.author.unwrap_or_default(),
            update_author: payload.update_author.unwrap_or_default(),
            body_text: body.text,
            attachments: body.media.iter().map(Attachment::embedded).collect(),
            created: payload.created.unwrap_or_default(),
            updated: payload.updated.unwrap_or_default(),
            is_public: payload.jsd_public.unwrap_or(false),
        }
    }
}

/// Response of `POST issue/{id}/comment`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedComment {
    /// Id of the new comment.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> CommentPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_comment_body_is_flattened() {
        let comment: Comment = payload(
            r#"{
                "id": "10100",
                "author": {"accountId": "a1", "displayName": "Mia"},
                "updateAuthor": {"accountId": "a1", "displayName": "Mia"},
                "body": {"type": "doc", "version": 1, "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Rebooted it."}]},
                    {"type": "bulletList", "content": [
                        {"type": "listItem", "content": [
                            {"type": "paragraph", "content": [{"type": "text", "text": "still slow"}]}
                        ]}
                    ]},
                    {"type": "mediaSingle", "content": [
                        {"type": "media", "attrs": {"id": "abc", "type": "file"}}
                    ]}
                ]},
                "created": "2024-02-01T10:00:00.000+0000",
                "updated": "2024-02-01T10:05:00.000+0000",
                "jsdPublic": true
            }"#,
        )
        .into();

        assert_eq!(comment.id, "10100");
        assert_eq!(comment.author.display_name, "Mia");
        assert_eq!(comment.body_text, "Rebooted it.\nstill slow");
        assert_eq!(comment.attachments.len(), 1);
        assert_eq!(comment.attachments[0].filename, "embedded-file-abc");
        assert!(comment.is_public);
    }

    #[test]
    fn test_comment_without_body_or_flags() {
        let comment: Comment = payload(r#"{"id": 5}"#).into();
        assert_eq!(comment.id, "5");
        assert_eq!(comment.body_text, "");
        assert!(comment.attachments.is_empty());
        assert!(!comment.is_public);
        assert_eq!(comment.author.display(), "Unknown");
    }

    #[test]
    fn test_plain_string_body_is_ignored() {
        let comment: Comment = payload(r#"{"id": "1", "body": "wiki markup"}"#).into();
        assert_eq!(comment.body_text, "");
    }
}
