//! Lookup and query methods for the sheet tree
//!
//! Read-only helpers plus the `_mut` finders the store uses to reach the node
//! it rewrites.

use super::model::{Question, Sheet, SubTopic, Topic};

/// A question together with the IDs of the nodes that own it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionLocation {
    pub topic_id: String,
    pub sub_topic_id: String,
    pub question_id: String,
}

/// A borrowed question with the titles of its ancestors, for listings
#[derive(Debug, Clone, Copy)]
pub struct QuestionEntry<'a> {
    pub topic: &'a Topic,
    pub sub_topic: &'a SubTopic,
    pub question: &'a Question,
}

impl Sheet {
    /// Find a topic by its ID
    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub(crate) fn topic_mut(&mut self, id: &str) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == id)
    }

    /// Position of a topic among its siblings
    pub fn topic_index(&self, id: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.id == id)
    }

    /// Total number of questions across the whole sheet
    pub fn question_count(&self) -> usize {
        self.topics.iter().map(Topic::question_count).sum()
    }

    /// Find a question anywhere in the sheet
    pub fn locate_question(&self, question_id: &str) -> Option<QuestionLocation> {
        self.topics
            .iter()
            .find_map(|t| t.locate_question(question_id))
    }

    /// Flatten all questions in display order
    pub fn questions(&self) -> Vec<QuestionEntry<'_>> {
        self.topics
            .iter()
            .flat_map(|topic| {
                topic.sub_topics.iter().flat_map(move |sub_topic| {
                    sub_topic.questions.iter().map(move |question| QuestionEntry {
                        topic,
                        sub_topic,
                        question,
                    })
                })
            })
            .collect()
    }

    /// Every distinct tag in the sheet, in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for entry in self.questions() {
            for tag in &entry.question.tags {
                if !tags.contains(&tag.as_str()) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
}

impl Topic {
    /// Find a sub-topic by its ID
    pub fn sub_topic(&self, id: &str) -> Option<&SubTopic> {
        self.sub_topics.iter().find(|s| s.id == id)
    }

    pub(crate) fn sub_topic_mut(&mut self, id: &str) -> Option<&mut SubTopic> {
        self.sub_topics.iter_mut().find(|s| s.id == id)
    }

    /// Position of a sub-topic among its siblings
    pub fn sub_topic_index(&self, id: &str) -> Option<usize> {
        self.sub_topics.iter().position(|s| s.id == id)
    }

    /// Number of questions across all sub-topics
    pub fn question_count(&self) -> usize {
        self.sub_topics.iter().map(|s| s.questions.len()).sum()
    }

    /// Find the sub-topic that currently holds a question
    pub fn sub_topic_containing(&self, question_id: &str) -> Option<&SubTopic> {
        self.sub_topics
            .iter()
            .find(|s| s.question(question_id).is_some())
    }

    pub fn locate_question(&self, question_id: &str) -> Option<QuestionLocation> {
        self.sub_topic_containing(question_id)
            .map(|sub_topic| QuestionLocation {
                topic_id: self.id.clone(),
                sub_topic_id: sub_topic.id.clone(),
                question_id: question_id.to_string(),
            })
    }
}

impl SubTopic {
    /// Find a question by its ID
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub(crate) fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }
}
