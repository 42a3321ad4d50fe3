//! Attachment models for the Jira API.

use serde::Deserialize;

use super::common::deserialize_id;
use super::User;
use crate::adf::MediaRef;

/// A file attached to an issue, or embedded in a comment body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// File name.
    #[serde(default)]
    pub filename: String,

    /// Uploader, if known.
    #[serde(default)]
    pub author: Option<User>,

    /// Upload timestamp as sent by Jira.
    #[serde(default)]
    pub created: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// MIME type (e.g., "image/png").
    #[serde(default)]
    pub mime_type: String,

    /// URL of the file content.
    #[serde(default, rename = "content")]
    pub content_url: String,

    /// URL of the thumbnail, for images.
    #[serde(default, rename = "thumbnail")]
    pub thumbnail_url: String,

    /// Downloaded bytes, filled in by the client after mapping.
    #[serde(skip)]
    pub content: Option<Vec<u8>>,
}

impl Attachment {
    /// Placeholder record for a file embedded in a document body.
    ///
    /// Only the id is known; the name is synthesized from it.
    pub fn embedded(media: &MediaRef) -> Self {
        Self {
            id: media.id.clone(),
            filename: media.filename(),
            ..Default::default()
        }
    }

    /// Returns true for image MIME types.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_deserialize() {
        let json = r#"{
            "id": 10000,
            "filename": "screenshot.png",
            "author": {"accountId": "a1", "displayName": "Mia"},
            "created": "2024-02-01T10:00:00.000+0000",
            "size": 23123,
            "mimeType": "image/png",
            "content": "https://example.atlassian.net/rest/api/3/attachment/content/10000",
            "thumbnail": "https://example.atlassian.net/rest/api/3/attachment/thumbnail/10000"
        }"#;
        let attachment: Attachment = serde_json::from_str(json).unwrap();
        assert_eq!(attachment.id, "10000");
        assert_eq!(attachment.size, 23123);
        assert!(attachment.content_url.ends_with("/content/10000"));
        assert_eq!(attachment.author.unwrap().display_name, "Mia");
        assert!(attachment.content.is_none());
    }

    #[test]
    fn test_embedded_attachment() {
        let attachment = Attachment::embedded(&MediaRef::new("f-9"));
        assert_eq!(attachment.id, "f-9");
        assert_eq!(attachment.filename, "embedded-file-f-9");
        assert!(attachment.author.is_none());
        assert_eq!(attachment.size, 0);
        assert!(!attachment.is_image());
    }
}
