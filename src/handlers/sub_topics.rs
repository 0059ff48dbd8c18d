//! Sub-topic handlers for the sheet MCP server

use super::require_sheet;
use crate::SheetServerHandler;
use crate::validation;
use mcp_attr::Result as McpResult;

impl SheetServerHandler {
    /// Appends a sub-topic to a topic.
    pub async fn handle_add_sub_topic(&self, topic_id: String, title: String) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let title = validation::require_title(&title)?;

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let order = validation::require_topic(&sheet, &topic_id)?.sub_topics.len();
        let id = store
            .add_sub_topic(&topic_id, &title)
            .ok_or_else(|| validation::invalid_params(format!("Topic '{}' does not exist", topic_id)))?;
        drop(store);

        self.autosave(&format!("Add sub-topic {}", id))?;
        Ok(format!(
            "Sub-topic created with ID: {} (topic {}, position {})",
            id,
            topic_id,
            order + 1
        ))
    }

    pub async fn handle_update_sub_topic(
        &self,
        topic_id: String,
        sub_topic_id: String,
        title: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_id(&sub_topic_id);
        let title = validation::require_title(&title)?;

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        validation::require_sub_topic(topic, &sub_topic_id)?;
        store.update_sub_topic(&topic_id, &sub_topic_id, &title);
        drop(store);

        self.autosave(&format!("Rename sub-topic {}", sub_topic_id))?;
        Ok(format!("Sub-topic {} renamed to '{}'", sub_topic_id, title))
    }

    /// Deletes a sub-topic and its questions.
    pub async fn handle_delete_sub_topic(
        &self,
        topic_id: String,
        sub_topic_id: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_id(&sub_topic_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        let questions = validation::require_sub_topic(topic, &sub_topic_id)?
            .questions
            .len();
        store.delete_sub_topic(&topic_id, &sub_topic_id);
        drop(store);

        self.autosave(&format!("Delete sub-topic {}", sub_topic_id))?;
        Ok(format!(
            "Sub-topic {} deleted with {} question(s)",
            sub_topic_id, questions
        ))
    }

    /// Moves a sub-topic onto the position of a sibling.
    pub async fn handle_move_sub_topic(
        &self,
        topic_id: String,
        sub_topic_id: String,
        over_sub_topic_id: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_id(&sub_topic_id);
        let over_sub_topic_id = validation::normalize_id(&over_sub_topic_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        validation::require_sub_topic(topic, &sub_topic_id)?;
        validation::require_sub_topic(topic, &over_sub_topic_id)?;

        let ids = topic.sub_topics.iter().map(|s| s.id.as_str());
        let Some((from, to)) = validation::resolve_move(ids, &sub_topic_id, &over_sub_topic_id)
        else {
            return Ok(format!("Sub-topic {} is already in place", sub_topic_id));
        };
        store.reorder_sub_topics(&topic_id, from, to);
        drop(store);

        self.autosave(&format!("Move sub-topic {}", sub_topic_id))?;
        Ok(format!(
            "Sub-topic {} moved from position {} to {}",
            sub_topic_id,
            from + 1,
            to + 1
        ))
    }
}
