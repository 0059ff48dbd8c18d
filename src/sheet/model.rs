use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a new unique node ID
///
/// IDs are opaque strings; the only guarantee is uniqueness for the
/// lifetime of the process.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Question completion state
///
/// Serialized as `todo`, `in_progress` and `done` to match the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Completed
    Done,
}

impl QuestionStatus {
    /// All statuses in cycling order
    pub const ALL: [QuestionStatus; 3] = [
        QuestionStatus::Todo,
        QuestionStatus::InProgress,
        QuestionStatus::Done,
    ];

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionStatus::Todo => "todo",
            QuestionStatus::InProgress => "in_progress",
            QuestionStatus::Done => "done",
        }
    }

    /// Next status in the toggle cycle: todo → in_progress → done → todo
    pub fn next(self) -> Self {
        match self {
            QuestionStatus::Todo => QuestionStatus::InProgress,
            QuestionStatus::InProgress => QuestionStatus::Done,
            QuestionStatus::Done => QuestionStatus::Todo,
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "todo" => Ok(QuestionStatus::Todo),
            "in_progress" => Ok(QuestionStatus::InProgress),
            "done" => Ok(QuestionStatus::Done),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: todo, in_progress, done",
                s
            )),
        }
    }
}

/// A checklist document: the root of the tree
///
/// The sheet exclusively owns its topics; topics own their sub-topics and
/// sub-topics own their questions. Sibling order is kept twice: as the
/// position in the `Vec` and as each node's `order` field, which is what gets
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: String,
    pub title: String,
    /// Optional URL-friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub order: usize,
    #[serde(default)]
    pub sub_topics: Vec<SubTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    pub id: String,
    pub title: String,
    pub order: usize,
    /// Back-reference to the owning topic
    pub topic_id: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A leaf item of the checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    /// Optional problem URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub order: usize,
    /// Back-reference to the owning topic
    pub topic_id: String,
    /// Back-reference to the owning sub-topic (older snapshots may carry `null`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_topic_id: Option<String>,
    #[serde(default)]
    pub status: QuestionStatus,
    /// Lowercase, deduplicated, in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for a question; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub title: Option<String>,
    /// `Some("")` clears the link
    pub link: Option<String>,
    pub status: Option<QuestionStatus>,
    pub tags: Option<Vec<String>>,
}

impl QuestionPatch {
    /// Check whether the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.link.is_none() && self.status.is_none() && self.tags.is_none()
    }

    /// Merge the patch into a question
    pub(crate) fn apply_to(&self, question: &mut Question) {
        if let Some(title) = &self.title {
            question.title = title.clone();
        }
        if let Some(link) = &self.link {
            question.link = if link.is_empty() {
                None
            } else {
                Some(link.clone())
            };
        }
        if let Some(status) = self.status {
            question.status = status;
        }
        if let Some(tags) = &self.tags {
            question.tags = normalize_tags(tags);
        }
    }
}

/// Normalize a tag: trim and lowercase; `None` if nothing is left
pub fn normalize_tag(tag: &str) -> Option<String> {
    let normalized = tag.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Normalize a whole tag list, dropping empties and duplicates while keeping
/// first-seen order
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().filter_map(|t| normalize_tag(t)) {
        if !result.contains(&tag) {
            result.push(tag);
        }
    }
    result
}

impl Sheet {
    /// Create an empty sheet with a generated ID
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            slug: None,
            topics: Vec::new(),
        }
    }
}

impl Topic {
    pub(crate) fn new(title: &str, order: usize) -> Self {
        Self {
            id: generate_id(),
            title: title.to_string(),
            order,
            sub_topics: Vec::new(),
        }
    }
}

impl SubTopic {
    pub(crate) fn new(topic_id: &str, title: &str, order: usize) -> Self {
        Self {
            id: generate_id(),
            title: title.to_string(),
            order,
            topic_id: topic_id.to_string(),
            questions: Vec::new(),
        }
    }
}

impl Question {
    pub(crate) fn new(
        topic_id: &str,
        sub_topic_id: &str,
        title: &str,
        link: Option<&str>,
        order: usize,
    ) -> Self {
        Self {
            id: generate_id(),
            title: title.to_string(),
            link: link.filter(|l| !l.is_empty()).map(str::to_string),
            order,
            topic_id: topic_id.to_string(),
            sub_topic_id: Some(sub_topic_id.to_string()),
            status: QuestionStatus::Todo,
            tags: Vec::new(),
        }
    }

    /// Check whether the question is complete
    pub fn is_done(&self) -> bool {
        self.status == QuestionStatus::Done
    }
}
