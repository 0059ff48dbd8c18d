//! Topic handlers for the sheet MCP server

use super::require_sheet;
use crate::SheetServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl SheetServerHandler {
    /// Appends a topic at the end of the sheet.
    pub async fn handle_add_topic(&self, title: String) -> McpResult<String> {
        let title = validation::require_title(&title)?;

        let mut store = self.store();
        let Some(id) = store.add_topic(&title) else {
            drop(store);
            bail_public!(_, "No sheet is loaded. Use reload_sheet first.");
        };
        let order = require_sheet(&store)?.topics.len() - 1;
        drop(store);

        self.autosave(&format!("Add topic {}", id))?;
        Ok(format!("Topic created with ID: {} (position {})", id, order + 1))
    }

    pub async fn handle_update_topic(&self, topic_id: String, title: String) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let title = validation::require_title(&title)?;

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        validation::require_topic(&sheet, &topic_id)?;
        store.update_topic(&topic_id, &title);
        drop(store);

        self.autosave(&format!("Rename topic {}", topic_id))?;
        Ok(format!("Topic {} renamed to '{}'", topic_id, title))
    }

    /// Deletes a topic and everything under it.
    pub async fn handle_delete_topic(&self, topic_id: String) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        let (sub_topics, questions) = (topic.sub_topics.len(), topic.question_count());
        store.delete_topic(&topic_id);
        drop(store);

        self.autosave(&format!("Delete topic {}", topic_id))?;
        Ok(format!(
            "Topic {} deleted with {} sub-topic(s) and {} question(s)",
            topic_id, sub_topics, questions
        ))
    }

    /// Moves a topic onto the position of another topic.
    pub async fn handle_move_topic(
        &self,
        topic_id: String,
        over_topic_id: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let over_topic_id = validation::normalize_id(&over_topic_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        validation::require_topic(&sheet, &topic_id)?;
        validation::require_topic(&sheet, &over_topic_id)?;

        let ids = sheet.topics.iter().map(|t| t.id.as_str());
        let Some((from, to)) = validation::resolve_move(ids, &topic_id, &over_topic_id) else {
            return Ok(format!("Topic {} is already in place", topic_id));
        };
        store.reorder_topics(from, to);
        drop(store);

        self.autosave(&format!("Move topic {}", topic_id))?;
        Ok(format!(
            "Topic {} moved from position {} to {}",
            topic_id,
            from + 1,
            to + 1
        ))
    }
}
