//! Read-only handlers: tree view, progress and question listing

use super::require_sheet;
use crate::SheetServerHandler;
use crate::formatting;
use crate::sheet::progress;
use crate::validation;
use mcp_attr::Result as McpResult;

impl SheetServerHandler {
    /// Renders the working copy as a tree.
    pub async fn handle_show_sheet(&self) -> McpResult<String> {
        let sheet = require_sheet(&self.store())?;
        Ok(formatting::format_sheet(&sheet))
    }

    /// Overall progress; an unloaded sheet counts as empty.
    pub async fn handle_progress(&self) -> McpResult<String> {
        let snapshot = self.snapshot();
        let p = progress(snapshot.as_deref());
        Ok(format!(
            "Progress: {}/{} questions done ({}%)",
            p.done, p.total, p.percent
        ))
    }

    /// Handles list/filter operations - applies filters and formats results for display.
    pub async fn handle_list_questions(
        &self,
        status: Option<String>,
        tag: Option<String>,
        keyword: Option<String>,
    ) -> McpResult<String> {
        let status_filter = if let Some(ref status_str) = status {
            Some(validation::parse_status(status_str)?)
        } else {
            None
        };

        let sheet = require_sheet(&self.store())?;
        let mut entries = sheet.questions();

        if let Some(status) = status_filter {
            formatting::apply_status_filter(&mut entries, status);
        }

        if let Some(ref tag_filter) = tag {
            formatting::apply_tag_filter(&mut entries, tag_filter);
        }

        if let Some(ref keyword_filter) = keyword {
            formatting::apply_keyword_filter(&mut entries, keyword_filter);
        }

        Ok(formatting::format_questions(&entries))
    }
}
