//! Document tree types and their JSON mapping.
//!
//! The tree mirrors the Atlassian Document Format (ADF) nodes Lantern
//! produces and consumes. Serialization emits the exact wire shape the
//! Jira API expects; [`Document::from_value`] reads whatever Jira sends
//! back without failing on node kinds it does not know.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Wire version of the document format.
pub const DOC_VERSION: u64 = 1;

/// Root node of a rich-text document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A heading with inline text.
    ///
    /// `blocks` only carries nested non-text children found on the wire;
    /// the encoder never produces any.
    Heading {
        /// Heading level, 1 to 3.
        level: HeadingLevel,
        /// Inline text runs.
        spans: Vec<Span>,
        /// Nested block children.
        blocks: Vec<Block>,
    },

    /// A paragraph of inline text.
    Paragraph {
        /// Inline text runs.
        spans: Vec<Span>,
    },

    /// An unordered list.
    BulletList {
        /// List items in order.
        items: Vec<ListItem>,
    },

    /// A `mediaSingle` container holding embedded files.
    MediaContainer {
        /// Media references in order.
        children: Vec<MediaRef>,
    },

    /// Any node kind without dedicated handling (tables, panels, code blocks, ...).
    Other {
        /// The raw `type` tag.
        kind: String,
        /// Nested children.
        blocks: Vec<Block>,
    },
}

/// One entry of a [`Block::BulletList`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    /// Item content, usually a single paragraph.
    pub blocks: Vec<Block>,
}

/// A run of text sharing the same marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The text. Never empty.
    pub text: String,
    /// Formatting marks.
    pub marks: BTreeSet<Mark>,
}

/// Inline formatting mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    /// Bold text, `strong` on the wire.
    Bold,
}

/// Reference to an embedded file. No binary content travels in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef {
    /// Attachment identifier as given by Jira.
    pub id: String,
}

/// Heading level restricted to 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Deepest heading level the markdown dialect supports.
    pub const MAX: u8 = 3;

    /// Returns the level if it lies within 1..=3.
    pub fn new(level: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// The numeric level.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Span {
    /// A span without marks.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: BTreeSet::new(),
        }
    }

    /// A bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: BTreeSet::from([Mark::Bold]),
        }
    }

    /// Returns true if the span carries the bold mark.
    pub fn is_bold(&self) -> bool {
        self.marks.contains(&Mark::Bold)
    }
}

impl MediaRef {
    /// Creates a media reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Placeholder filename used for embedded files.
    pub fn filename(&self) -> String {
        format!("embedded-file-{}", self.id)
    }
}

impl Mark {
    fn wire_name(self) -> &'static str {
        match self {
            Mark::Bold => "strong",
        }
    }

    fn from_wire(name: &str) -> Option<Self> {
        match name {
            "strong" => Some(Mark::Bold),
            _ => None,
        }
    }
}

// ============================================================================
// Wire encoding
// ============================================================================

impl Document {
    /// Creates a document from its top-level blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Returns true if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Renders the document as the JSON payload Jira expects.
    pub fn to_value(&self) -> Value {
        json!({
            "type": "doc",
            "version": DOC_VERSION,
            "content": self.blocks.iter().map(Block::to_value).collect::<Vec<_>>(),
        })
    }

    /// Reads a document from a JSON payload.
    ///
    /// Returns `None` unless the root is an object tagged `doc`. Everything
    /// below the root is read leniently.
    pub fn from_value(value: &Value) -> Option<Self> {
        let root = value.as_object()?;
        if root.get("type").and_then(Value::as_str) != Some("doc") {
            return None;
        }
        Some(Self {
            blocks: children(root).iter().map(Block::from_value).collect(),
        })
    }
}

impl Block {
    /// The wire `type` tag of this block.
    pub fn kind(&self) -> &str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletList { .. } => "bulletList",
            Block::MediaContainer { .. } => "mediaSingle",
            Block::Other { kind, .. } => kind,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Block::Heading {
                level,
                spans,
                blocks,
            } => {
                let content: Vec<Value> = spans
                    .iter()
                    .map(Span::to_value)
                    .chain(blocks.iter().map(Block::to_value))
                    .collect();
                json!({
                    "type": "heading",
                    "attrs": { "level": level.get() },
                    "content": content,
                })
            }
            Block::Paragraph { spans } => json!({
                "type": "paragraph",
                "content": spans.iter().map(Span::to_value).collect::<Vec<_>>(),
            }),
            Block::BulletList { items } => json!({
                "type": "bulletList",
                "content": items.iter().map(ListItem::to_value).collect::<Vec<_>>(),
            }),
            Block::MediaContainer { children } => json!({
                "type": "mediaSingle",
                "content": children.iter().map(MediaRef::to_value).collect::<Vec<_>>(),
            }),
            Block::Other { kind, blocks } => json!({
                "type": kind,
                "content": blocks.iter().map(Block::to_value).collect::<Vec<_>>(),
            }),
        }
    }

    fn from_value(value: &Value) -> Self {
        let Some(node) = value.as_object() else {
            return Block::Other {
                kind: String::new(),
                blocks: Vec::new(),
            };
        };
        let kind = node_type(node);
        let content = children(node);

        match kind {
            "paragraph" => Block::Paragraph {
                spans: content.iter().filter_map(Span::from_value).collect(),
            },
            "heading" => match heading_level(node) {
                Some(level) => Block::Heading {
                    level,
                    spans: content.iter().filter_map(Span::from_value).collect(),
                    blocks: content
                        .iter()
                        .filter(|child| !is_text_node(child))
                        .map(Block::from_value)
                        .collect(),
                },
                None => Block::Other {
                    kind: kind.to_string(),
                    blocks: content.iter().map(Block::from_value).collect(),
                },
            },
            "bulletList" => Block::BulletList {
                items: content.iter().map(ListItem::from_value).collect(),
            },
            "mediaSingle" => Block::MediaContainer {
                children: content.iter().filter_map(MediaRef::from_value).collect(),
            },
            _ => Block::Other {
                kind: kind.to_string(),
                blocks: content.iter().map(Block::from_value).collect(),
            },
        }
    }
}

impl ListItem {
    /// An item holding a single paragraph.
    pub fn paragraph(spans: Vec<Span>) -> Self {
        Self {
            blocks: vec![Block::Paragraph { spans }],
        }
    }

    fn to_value(&self) -> Value {
        json!({
            "type": "listItem",
            "content": self.blocks.iter().map(Block::to_value).collect::<Vec<_>>(),
        })
    }

    fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(node) if node_type(node) == "listItem" => Self {
                blocks: children(node).iter().map(Block::from_value).collect(),
            },
            // Stray non-item children keep their content reachable.
            _ => Self {
                blocks: vec![Block::from_value(value)],
            },
        }
    }
}

impl Span {
    fn to_value(&self) -> Value {
        let mut node = Map::new();
        node.insert("type".to_string(), json!("text"));
        node.insert("text".to_string(), json!(self.text));
        if !self.marks.is_empty() {
            let marks: Vec<Value> = self
                .marks
                .iter()
                .map(|mark| json!({ "type": mark.wire_name() }))
                .collect();
            node.insert("marks".to_string(), Value::Array(marks));
        }
        Value::Object(node)
    }

    fn from_value(value: &Value) -> Option<Self> {
        let node = value.as_object()?;
        if node_type(node) != "text" {
            return None;
        }
        let text = node.get("text").and_then(Value::as_str)?;
        if text.is_empty() {
            return None;
        }
        let marks = node
            .get("marks")
            .and_then(Value::as_array)
            .map(|marks| {
                marks
                    .iter()
                    .filter_map(|m| m.get("type").and_then(Value::as_str))
                    .filter_map(Mark::from_wire)
                    .collect()
            })
            .unwrap_or_default();
        Some(Self {
            text: text.to_string(),
            marks,
        })
    }
}

impl MediaRef {
    fn to_value(&self) -> Value {
        json!({
            "type": "media",
            "attrs": { "id": self.id, "type": "file" },
        })
    }

    fn from_value(value: &Value) -> Option<Self> {
        let node = value.as_object()?;
        if node_type(node) != "media" {
            return None;
        }
        let id = match node.get("attrs").and_then(|attrs| attrs.get("id")) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        };
        Some(Self { id })
    }
}

fn node_type(node: &Map<String, Value>) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or_default()
}

fn children(node: &Map<String, Value>) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn is_text_node(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("text")
}

fn heading_level(node: &Map<String, Value>) -> Option<HeadingLevel> {
    let level = node.get("attrs")?.get("level")?.as_u64()?;
    HeadingLevel::new(u8::try_from(level).ok()?)
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("expected a document node of type \"doc\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_level_bounds() {
        assert!(HeadingLevel::new(0).is_none());
        assert_eq!(HeadingLevel::new(1).map(HeadingLevel::get), Some(1));
        assert_eq!(HeadingLevel::new(3).map(HeadingLevel::get), Some(3));
        assert!(HeadingLevel::new(4).is_none());
    }

    #[test]
    fn test_empty_document_wire_shape() {
        let doc = Document::default();
        assert_eq!(
            doc.to_value(),
            json!({ "type": "doc", "version": 1, "content": [] })
        );
    }

    #[test]
    fn test_bold_span_wire_shape() {
        let doc = Document::new(vec![Block::Paragraph {
            spans: vec![Span::plain("a "), Span::bold("b")],
        }]);
        assert_eq!(
            doc.to_value(),
            json!({
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [
                        { "type": "text", "text": "a " },
                        { "type": "text", "text": "b", "marks": [{ "type": "strong" }] }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_list_wire_shape() {
        let doc = Document::new(vec![Block::BulletList {
            items: vec![ListItem::paragraph(vec![Span::plain("one")])],
        }]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["content"][0]["type"], "bulletList");
        assert_eq!(value["content"][0]["content"][0]["type"], "listItem");
        assert_eq!(
            value["content"][0]["content"][0]["content"][0]["type"],
            "paragraph"
        );
    }

    #[test]
    fn test_from_value_rejects_non_doc_roots() {
        assert!(Document::from_value(&Value::Null).is_none());
        assert!(Document::from_value(&json!("plain text")).is_none());
        assert!(Document::from_value(&json!({ "type": "paragraph" })).is_none());
    }

    #[test]
    fn test_from_value_tolerates_missing_content() {
        let doc = Document::from_value(&json!({ "type": "doc", "version": 1 })).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_from_value_reads_media_ids() {
        let doc = Document::from_value(&json!({
            "type": "doc",
            "content": [{
                "type": "mediaSingle",
                "attrs": { "layout": "center" },
                "content": [
                    { "type": "media", "attrs": { "id": "abc-123", "type": "file" } },
                    { "type": "media", "attrs": { "id": 10042 } },
                    { "type": "caption", "content": [] }
                ]
            }]
        }))
        .unwrap();

        assert_eq!(
            doc.blocks,
            vec![Block::MediaContainer {
                children: vec![MediaRef::new("abc-123"), MediaRef::new("10042")],
            }]
        );
    }

    #[test]
    fn test_from_value_unknown_kind_becomes_other() {
        let doc = Document::from_value(&json!({
            "type": "doc",
            "content": [{
                "type": "panel",
                "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "hi" }] }]
            }]
        }))
        .unwrap();

        assert_eq!(
            doc.blocks,
            vec![Block::Other {
                kind: "panel".to_string(),
                blocks: vec![Block::Paragraph {
                    spans: vec![Span::plain("hi")],
                }],
            }]
        );
    }

    #[test]
    fn test_from_value_deep_heading_becomes_other() {
        let doc = Document::from_value(&json!({
            "type": "doc",
            "content": [{
                "type": "heading",
                "attrs": { "level": 5 },
                "content": [{ "type": "text", "text": "Deep" }]
            }]
        }))
        .unwrap();
        assert_eq!(doc.blocks[0].kind(), "heading");
        assert!(matches!(doc.blocks[0], Block::Other { .. }));
    }

    #[test]
    fn test_from_value_drops_empty_text_and_foreign_marks() {
        let doc = Document::from_value(&json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "content": [
                    { "type": "text", "text": "" },
                    { "type": "text", "text": "x", "marks": [{ "type": "em" }, { "type": "strong" }] },
                    { "type": "hardBreak" }
                ]
            }]
        }))
        .unwrap();
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                spans: vec![Span::bold("x")],
            }]
        );
    }

    #[test]
    fn test_deserialize_rejects_non_doc() {
        let result: Result<Document, _> = serde_json::from_value(json!({ "type": "text" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_media_filename() {
        assert_eq!(MediaRef::new("77").filename(), "embedded-file-77");
    }
}
