//! Save and reload handlers

use crate::SheetServerHandler;
use crate::sheet::progress;
use log::info;
use mcp_attr::{Result as McpResult, bail_public};

impl SheetServerHandler {
    /// Posts the working copy to the endpoint; the response replaces the working copy.
    pub async fn handle_save_sheet(&self) -> McpResult<String> {
        let saved = match self.save_to_endpoint() {
            Ok(sheet) => sheet,
            Err(e) => {
                bail_public!(_, "Failed to save: {:#}", e);
            }
        };
        info!(
            "event=save_sheet status=ok sheet_id={} questions={}",
            saved.id,
            saved.question_count()
        );
        Ok(format!(
            "Sheet '{}' saved ({} topic(s), {} question(s))",
            saved.title,
            saved.topics.len(),
            saved.question_count()
        ))
    }

    /// Reloads from the endpoint, discarding unsaved edits.
    pub async fn handle_reload_sheet(&self) -> McpResult<String> {
        let Some(sheet) = self.reload_from_endpoint() else {
            bail_public!(_, "No sheet could be loaded");
        };
        let p = progress(Some(&sheet));
        Ok(format!(
            "Sheet '{}' loaded ({} topic(s), {}/{} questions done)",
            sheet.title,
            sheet.topics.len(),
            p.done,
            p.total
        ))
    }
}
