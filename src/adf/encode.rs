//! Markdown subset to document tree.
//!
//! Supported syntax, one construct per line:
//!
//! - `#`, `##`, `###` headings
//! - `-` and `*` bullet items (consecutive items form one list)
//! - everything else becomes a paragraph
//!
//! Inline `**bold**` / `__bold__` works in all three. Blank lines are skipped
//! and do not end a list.

use super::inline::parse_inline;
use super::node::{Block, Document, HeadingLevel, ListItem};

/// Converts markdown text into a document tree. Never fails.
///
/// ```
/// use lantern::adf::{markdown_to_doc, Block};
///
/// let doc = markdown_to_doc("# Title\n- a\n- b");
/// assert_eq!(doc.blocks.len(), 2);
/// assert!(matches!(doc.blocks[1], Block::BulletList { .. }));
/// ```
pub fn markdown_to_doc(markdown: &str) -> Document {
    trim_ascii(markdown)
        .lines()
        .fold(Builder::default(), Builder::push_line)
        .finish()
}

/// Fold state: blocks flushed so far plus the list still being collected.
#[derive(Debug, Default)]
struct Builder {
    blocks: Vec<Block>,
    pending_list: Option<Vec<ListItem>>,
}

impl Builder {
    fn push_line(mut self, line: &str) -> Self {
        let line = trim_ascii(line);
        if line.is_empty() {
            return self;
        }

        if let Some((level, text)) = heading(line) {
            self.flush_list();
            self.blocks.push(Block::Heading {
                level,
                spans: parse_inline(text),
                blocks: Vec::new(),
            });
        } else if let Some(text) = list_item(line) {
            self.pending_list
                .get_or_insert_with(Vec::new)
                .push(ListItem::paragraph(parse_inline(text)));
        } else {
            self.flush_list();
            self.blocks.push(Block::Paragraph {
                spans: parse_inline(line),
            });
        }
        self
    }

    fn flush_list(&mut self) {
        if let Some(items) = self.pending_list.take() {
            self.blocks.push(Block::BulletList { items });
        }
    }

    fn finish(mut self) -> Document {
        self.flush_list();
        Document::new(self.blocks)
    }
}

/// Matches `#{1,3}` followed by whitespace; returns the level and the rest.
fn heading(line: &str) -> Option<(HeadingLevel, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    let level = HeadingLevel::new(u8::try_from(hashes).ok()?)?;
    let text = after_separator(&line[hashes..])?;
    Some((level, text))
}

/// Matches `-` or `*` followed by whitespace; returns the item text.
fn list_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(['-', '*'])?;
    after_separator(rest)
}

/// Requires at least one leading ASCII whitespace character and skips all of them.
fn after_separator(rest: &str) -> Option<&str> {
    let text = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
    (text.len() < rest.len()).then_some(text)
}

/// Trims ASCII whitespace only; a no-break space is content.
fn trim_ascii(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace())
}
