//! MCP tool inputs for Lantern.
//!
//! This module contains the input types for the MCP tools that expose
//! Jira Service Management operations.

mod inputs;

pub use inputs::*;
