//! Conversion between markdown and the Atlassian Document Format (ADF).
//!
//! Jira stores descriptions and comments as ADF trees. Lantern accepts a
//! small markdown dialect from tool callers and encodes it with
//! [`markdown_to_doc`]; trees read back from Jira are flattened with
//! [`decode_simple_text`] (single-paragraph fields) or [`decode_body`]
//! (full bodies, including embedded media).
//!
//! Nothing in this module performs I/O.

mod decode;
mod encode;
mod inline;
mod node;

pub use decode::{decode_body, decode_simple_text, DecodedBody};
pub use encode::markdown_to_doc;
pub use inline::parse_inline;
pub use node::{Block, Document, HeadingLevel, ListItem, Mark, MediaRef, Span, DOC_VERSION};
