//! MCP tool handlers for the sheet server
//!
//! This module contains the implementation of all MCP tool handlers,
//! grouped by the level of the tree they edit.

mod persist;
mod questions;
mod sub_topics;
mod topics;
mod view;

use crate::sheet::{Sheet, SheetStore};
use crate::validation::invalid_params;
use mcp_attr::Result as McpResult;
use std::sync::Arc;

/// The working copy, or an error when nothing is loaded
pub(crate) fn require_sheet(store: &SheetStore) -> McpResult<Arc<Sheet>> {
    store
        .snapshot()
        .ok_or_else(|| invalid_params("No sheet is loaded. Use reload_sheet first.".to_string()))
}
