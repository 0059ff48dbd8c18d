//! Validation helper functions for the sheet MCP server
//!
//! Input parsing and ID resolution for the tool layer. The store itself
//! ignores unknown IDs; the tools check them here first so a client gets an
//! error naming the IDs that do exist.

use crate::sheet::{Question, QuestionStatus, Sheet, SubTopic, Topic};
use mcp_attr::Result as McpResult;

/// Build a public INVALID_PARAMS error
pub fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse and validate a status parameter
///
/// # Arguments
/// * `status_str` - Status string to parse
///
/// # Returns
/// Result containing parsed QuestionStatus or error
pub fn parse_status(status_str: &str) -> McpResult<QuestionStatus> {
    status_str.parse::<QuestionStatus>().map_err(invalid_params)
}

/// Trim an ID supplied by the client
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// Trim an optional ID, treating an empty string as absent
pub fn normalize_optional_id(id: Option<String>) -> Option<String> {
    id.map(|id| normalize_id(&id)).filter(|id| !id.is_empty())
}

/// Trim a title and reject it if nothing is left
pub fn require_title(title: &str) -> McpResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(invalid_params("Title must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn format_unknown(kind: &str, id: &str, available: Vec<String>) -> String {
    if available.is_empty() {
        format!("{} '{}' does not exist. There are no {}s yet.", kind, id, kind.to_lowercase())
    } else {
        format!(
            "{} '{}' does not exist.\nAvailable: {}",
            kind,
            id,
            available.join(", ")
        )
    }
}

/// Look up a topic or fail with the list of existing topic IDs
pub fn require_topic<'a>(sheet: &'a Sheet, topic_id: &str) -> McpResult<&'a Topic> {
    sheet.topic(topic_id).ok_or_else(|| {
        let available = sheet.topics.iter().map(|t| t.id.clone()).collect();
        invalid_params(format_unknown("Topic", topic_id, available))
    })
}

/// Look up a sub-topic or fail with the list of the topic's sub-topic IDs
pub fn require_sub_topic<'a>(topic: &'a Topic, sub_topic_id: &str) -> McpResult<&'a SubTopic> {
    topic.sub_topic(sub_topic_id).ok_or_else(|| {
        let available = topic.sub_topics.iter().map(|s| s.id.clone()).collect();
        invalid_params(format_unknown("Sub-topic", sub_topic_id, available))
    })
}

/// Look up a question under a topic
///
/// With a sub-topic ID the question must be in that sub-topic; without one,
/// any sub-topic of the topic may hold it.
pub fn require_question<'a>(
    topic: &'a Topic,
    sub_topic_id: Option<&str>,
    question_id: &str,
) -> McpResult<(&'a SubTopic, &'a Question)> {
    let sub_topic = match sub_topic_id {
        Some(id) => require_sub_topic(topic, id)?,
        None => topic.sub_topic_containing(question_id).ok_or_else(|| {
            invalid_params(format!(
                "Question '{}' does not exist in topic '{}'",
                question_id, topic.id
            ))
        })?,
    };
    let question = sub_topic.question(question_id).ok_or_else(|| {
        let available = sub_topic.questions.iter().map(|q| q.id.clone()).collect();
        invalid_params(format_unknown("Question", question_id, available))
    })?;
    Ok((sub_topic, question))
}

/// Resolve a drag from `active_id` onto `over_id` into `(from, to)` indices
///
/// Mirrors a sortable list's drag-end handler: dropping onto itself or onto an
/// unknown ID yields no move.
pub fn resolve_move<'a>(
    ids: impl IntoIterator<Item = &'a str> + Clone,
    active_id: &str,
    over_id: &str,
) -> Option<(usize, usize)> {
    if active_id == over_id {
        return None;
    }
    let from = ids.clone().into_iter().position(|id| id == active_id)?;
    let to = ids.into_iter().position(|id| id == over_id)?;
    Some((from, to))
}

#[cfg(test)]
/// Extract ID from response message
///
/// Helper function for tests to extract an ID from response messages.
/// Response format: "Topic created with ID: <id> (...)"
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        let end = id_part
            .find(|c: char| c.is_whitespace() || c == ')')
            .unwrap_or(id_part.len());
        return id_part[..end].trim().to_string();
    }
    response
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_end_matches(')')
        .to_string()
}
