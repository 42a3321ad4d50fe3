//! Document tree to plain text and media references.
//!
//! Both entry points share one walker. [`decode_simple_text`] only looks at
//! top-level paragraphs, which is what short single-paragraph fields carry.
//! [`decode_body`] descends into every container.

use super::node::{Block, Document, MediaRef, Span};

/// Text and embedded media extracted from a document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBody {
    /// Paragraph texts joined by `\n`.
    pub text: String,
    /// Media references in document order. The same id may appear twice.
    pub media: Vec<MediaRef>,
}

/// How far the walker descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    TopLevel,
    Recursive,
}

#[derive(Debug, Default)]
struct Collected {
    lines: Vec<String>,
    media: Vec<MediaRef>,
}

/// Concatenates the text of top-level paragraphs, without separators.
///
/// Lists, headings and other containers are not visited. A missing tree
/// yields an empty string.
pub fn decode_simple_text(doc: Option<&Document>) -> String {
    let Some(doc) = doc else {
        return String::new();
    };
    collect(doc, Reach::TopLevel).lines.concat()
}

/// Extracts every paragraph's text and every embedded media reference.
///
/// ```
/// use lantern::adf::{decode_body, markdown_to_doc};
///
/// let body = decode_body(&markdown_to_doc("first\n- second"));
/// assert_eq!(body.text, "first\nsecond");
/// assert!(body.media.is_empty());
/// ```
pub fn decode_body(doc: &Document) -> DecodedBody {
    let collected = collect(doc, Reach::Recursive);
    DecodedBody {
        text: collected.lines.join("\n"),
        media: collected.media,
    }
}

fn collect(doc: &Document, reach: Reach) -> Collected {
    let mut out = Collected::default();
    for block in &doc.blocks {
        visit(block, reach, &mut out);
    }
    out
}

fn visit(block: &Block, reach: Reach, out: &mut Collected) {
    match block {
        Block::Paragraph { spans } => {
            let text = span_text(spans);
            if !text.is_empty() {
                out.lines.push(text);
            }
        }
        _ if reach == Reach::TopLevel => {}
        Block::MediaContainer { children } => {
            out.media.extend(children.iter().cloned());
        }
        Block::Heading { blocks, .. } | Block::Other { blocks, .. } => {
            for child in blocks {
                visit(child, reach, out);
            }
        }
        Block::BulletList { items } => {
            for child in items.iter().flat_map(|item| &item.blocks) {
                visit(child, reach, out);
            }
        }
    }
}

/// Span texts joined with marks ignored.
fn span_text(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}
