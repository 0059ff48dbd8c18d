//! Question handlers for the sheet MCP server

use super::require_sheet;
use crate::SheetServerHandler;
use crate::sheet::{QuestionPatch, UNCATEGORIZED_TITLE, normalize_tag};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl SheetServerHandler {
    /// Appends a question; without a sub-topic an "Uncategorized" one is created.
    pub async fn handle_add_question(
        &self,
        topic_id: String,
        title: String,
        sub_topic_id: Option<String>,
        link: Option<String>,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_optional_id(sub_topic_id);
        let title = validation::require_title(&title)?;
        let link = link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        if let Some(ref id) = sub_topic_id {
            validation::require_sub_topic(topic, id)?;
        }

        let Some(location) =
            store.add_question(&topic_id, sub_topic_id.as_deref(), &title, link.as_deref())
        else {
            drop(store);
            bail_public!(_, "Failed to add question to topic '{}'", topic_id);
        };
        drop(store);

        self.autosave(&format!("Add question {}", location.question_id))?;
        let mut response = format!(
            "Question created with ID: {} (sub-topic {})",
            location.question_id, location.sub_topic_id
        );
        if sub_topic_id.is_none() {
            response.push_str(&format!(
                "\nNew sub-topic '{}' created with ID: {}",
                UNCATEGORIZED_TITLE,
                location.sub_topic_id
            ));
        }
        Ok(response)
    }

    /// Merges the given fields into a question.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_question(
        &self,
        topic_id: String,
        question_id: String,
        sub_topic_id: Option<String>,
        title: Option<String>,
        link: Option<String>,
        status: Option<String>,
        tags: Option<Vec<String>>,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let question_id = validation::normalize_id(&question_id);
        let sub_topic_id = validation::normalize_optional_id(sub_topic_id);

        let patch = QuestionPatch {
            title: match title {
                Some(t) => Some(validation::require_title(&t)?),
                None => None,
            },
            link: link.map(|l| l.trim().to_string()),
            status: match status {
                Some(s) => Some(validation::parse_status(&s)?),
                None => None,
            },
            tags,
        };
        if patch.is_empty() {
            bail_public!(_, "Nothing to update. Provide title, link, status or tags.");
        }

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        validation::require_question(topic, sub_topic_id.as_deref(), &question_id)?;
        store.update_question(&topic_id, sub_topic_id.as_deref(), &question_id, &patch);
        drop(store);

        self.autosave(&format!("Update question {}", question_id))?;
        Ok(format!("Question {} updated successfully", question_id))
    }

    pub async fn handle_set_question_status(
        &self,
        topic_id: String,
        sub_topic_id: String,
        question_id: String,
        status: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_id(&sub_topic_id);
        let question_id = validation::normalize_id(&question_id);
        let new_status = validation::parse_status(&status)?;

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        let (_, question) =
            validation::require_question(topic, Some(sub_topic_id.as_str()), &question_id)?;
        let old_status = question.status;
        store.set_question_status(&topic_id, &sub_topic_id, &question_id, new_status);
        drop(store);

        self.autosave(&format!("Change question {} status", question_id))?;
        Ok(format!(
            "Question {}: {} → {}",
            question_id, old_status, new_status
        ))
    }

    /// Advances a question through todo → in_progress → done → todo.
    pub async fn handle_cycle_question_status(
        &self,
        topic_id: String,
        sub_topic_id: String,
        question_id: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_id(&sub_topic_id);
        let question_id = validation::normalize_id(&question_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        let (_, question) =
            validation::require_question(topic, Some(sub_topic_id.as_str()), &question_id)?;
        let old_status = question.status;
        let new_status = old_status.next();
        store.set_question_status(&topic_id, &sub_topic_id, &question_id, new_status);
        drop(store);

        self.autosave(&format!("Change question {} status", question_id))?;
        Ok(format!(
            "Question {}: {} → {}",
            question_id, old_status, new_status
        ))
    }

    pub async fn handle_add_question_tag(
        &self,
        topic_id: String,
        sub_topic_id: String,
        question_id: String,
        tag: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_id(&sub_topic_id);
        let question_id = validation::normalize_id(&question_id);
        let Some(normalized) = normalize_tag(&tag) else {
            bail_public!(_, "Tag must not be empty");
        };

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        validation::require_question(topic, Some(sub_topic_id.as_str()), &question_id)?;
        let added = store.add_question_tag(&topic_id, &sub_topic_id, &question_id, &tag);
        drop(store);

        if !added {
            return Ok(format!(
                "Question {} already has tag '{}'",
                question_id, normalized
            ));
        }
        self.autosave(&format!("Tag question {}", question_id))?;
        Ok(format!("Tag '{}' added to question {}", normalized, question_id))
    }

    pub async fn handle_remove_question_tag(
        &self,
        topic_id: String,
        sub_topic_id: String,
        question_id: String,
        tag: String,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let sub_topic_id = validation::normalize_id(&sub_topic_id);
        let question_id = validation::normalize_id(&question_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        validation::require_question(topic, Some(sub_topic_id.as_str()), &question_id)?;
        let removed = store.remove_question_tag(&topic_id, &sub_topic_id, &question_id, &tag);
        drop(store);

        if !removed {
            bail_public!(_, "Question {} has no tag '{}'", question_id, tag);
        }
        self.autosave(&format!("Untag question {}", question_id))?;
        Ok(format!("Tag '{}' removed from question {}", tag, question_id))
    }

    pub async fn handle_delete_question(
        &self,
        topic_id: String,
        question_id: String,
        sub_topic_id: Option<String>,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let question_id = validation::normalize_id(&question_id);
        let sub_topic_id = validation::normalize_optional_id(sub_topic_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        let (_, question) =
            validation::require_question(topic, sub_topic_id.as_deref(), &question_id)?;
        let title = question.title.clone();
        store.delete_question(&topic_id, sub_topic_id.as_deref(), &question_id);
        drop(store);

        self.autosave(&format!("Delete question {}", question_id))?;
        Ok(format!("Question {} ('{}') deleted", question_id, title))
    }

    /// Moves a question onto the position of a sibling in the same sub-topic.
    pub async fn handle_move_question(
        &self,
        topic_id: String,
        question_id: String,
        over_question_id: String,
        sub_topic_id: Option<String>,
    ) -> McpResult<String> {
        let topic_id = validation::normalize_id(&topic_id);
        let question_id = validation::normalize_id(&question_id);
        let over_question_id = validation::normalize_id(&over_question_id);
        let sub_topic_id = validation::normalize_optional_id(sub_topic_id);

        let mut store = self.store();
        let sheet = require_sheet(&store)?;
        let topic = validation::require_topic(&sheet, &topic_id)?;
        let (sub_topic, _) =
            validation::require_question(topic, sub_topic_id.as_deref(), &question_id)?;
        validation::require_question(topic, Some(sub_topic.id.as_str()), &over_question_id)?;

        let ids = sub_topic.questions.iter().map(|q| q.id.as_str());
        let Some((from, to)) = validation::resolve_move(ids, &question_id, &over_question_id)
        else {
            return Ok(format!("Question {} is already in place", question_id));
        };
        // Always pinned to the resolved sub-topic so only that list moves
        store.reorder_questions(&topic_id, Some(sub_topic.id.as_str()), from, to);
        drop(store);

        self.autosave(&format!("Move question {}", question_id))?;
        Ok(format!(
            "Question {} moved from position {} to {}",
            question_id,
            from + 1,
            to + 1
        ))
    }
}
