//! Data models for the Jira and Jira Service Management APIs.
//!
//! Payload types mirror the JSON Jira sends; record types (`Request`,
//! `Comment`, `Attachment`, `User`) are what the tools format. Rich-text
//! fields are flattened through [`crate::adf`] during mapping.

mod attachment;
mod comment;
mod common;
mod issue;
mod user;

pub use attachment::*;
pub use comment::*;
pub use common::*;
pub use issue::*;
pub use user::*;
