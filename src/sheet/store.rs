//! The sheet store: holds the current snapshot and rewrites it
//!
//! Every operation works on a private copy of the current sheet and swaps it
//! in only if the result differs, so a snapshot handed out earlier is never
//! mutated and a no-op keeps the same `Arc`. Unknown IDs are silently ignored.
//! The store performs no I/O and no logging.

use super::model::{Question, QuestionPatch, QuestionStatus, Sheet, SubTopic, Topic, normalize_tag};
use super::ordering::{move_item, next_order, remove_where};
use super::queries::QuestionLocation;
use std::sync::Arc;

/// Title of the sub-topic synthesized for questions added without one
pub const UNCATEGORIZED_TITLE: &str = "Uncategorized";

#[derive(Debug, Clone, Default)]
pub struct SheetStore {
    sheet: Option<Arc<Sheet>>,
}

impl SheetStore {
    /// Create a store with no sheet loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `sheet`
    pub fn with_sheet(sheet: Sheet) -> Self {
        Self {
            sheet: Some(Arc::new(sheet)),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Option<Arc<Sheet>> {
        self.sheet.clone()
    }

    /// Borrow the current sheet
    pub fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_deref()
    }

    /// Replace the whole snapshot unconditionally
    pub fn set_sheet(&mut self, sheet: Option<Sheet>) {
        self.sheet = sheet.map(Arc::new);
    }

    /// Run `edit` on a copy of the current sheet and keep the copy if it changed
    ///
    /// Returns whatever `edit` returns, or `None` when no sheet is loaded.
    fn apply<R>(&mut self, edit: impl FnOnce(&mut Sheet) -> Option<R>) -> Option<R> {
        let current = self.sheet.as_ref()?;
        let mut next = Sheet::clone(current);
        let result = edit(&mut next)?;
        if next != **current {
            self.sheet = Some(Arc::new(next));
        }
        Some(result)
    }

    /// Same as `apply` for edits that only report whether they matched
    fn apply_flag(&mut self, edit: impl FnOnce(&mut Sheet) -> bool) -> bool {
        self.apply(|sheet| edit(sheet).then_some(())).is_some()
    }

    // Topics

    /// Append a topic; returns its ID
    pub fn add_topic(&mut self, title: &str) -> Option<String> {
        self.apply(|sheet| {
            let topic = Topic::new(title, next_order(&sheet.topics));
            let id = topic.id.clone();
            sheet.topics.push(topic);
            Some(id)
        })
    }

    pub fn update_topic(&mut self, id: &str, title: &str) -> bool {
        self.apply_flag(|sheet| match sheet.topic_mut(id) {
            Some(topic) => {
                topic.title = title.to_string();
                true
            }
            None => false,
        })
    }

    /// Remove a topic with all its sub-topics and questions
    pub fn delete_topic(&mut self, id: &str) -> bool {
        self.apply_flag(|sheet| remove_where(&mut sheet.topics, |t| t.id == id))
    }

    pub fn reorder_topics(&mut self, from: usize, to: usize) -> bool {
        self.apply_flag(|sheet| move_item(&mut sheet.topics, from, to))
    }

    // Sub-topics

    /// Append a sub-topic to a topic; returns its ID
    pub fn add_sub_topic(&mut self, topic_id: &str, title: &str) -> Option<String> {
        self.apply(|sheet| {
            let topic = sheet.topic_mut(topic_id)?;
            let sub_topic = SubTopic::new(topic_id, title, next_order(&topic.sub_topics));
            let id = sub_topic.id.clone();
            topic.sub_topics.push(sub_topic);
            Some(id)
        })
    }

    pub fn update_sub_topic(&mut self, topic_id: &str, sub_topic_id: &str, title: &str) -> bool {
        self.apply_flag(|sheet| {
            match sheet
                .topic_mut(topic_id)
                .and_then(|t| t.sub_topic_mut(sub_topic_id))
            {
                Some(sub_topic) => {
                    sub_topic.title = title.to_string();
                    true
                }
                None => false,
            }
        })
    }

    pub fn delete_sub_topic(&mut self, topic_id: &str, sub_topic_id: &str) -> bool {
        self.apply_flag(|sheet| match sheet.topic_mut(topic_id) {
            Some(topic) => remove_where(&mut topic.sub_topics, |s| s.id == sub_topic_id),
            None => false,
        })
    }

    pub fn reorder_sub_topics(&mut self, topic_id: &str, from: usize, to: usize) -> bool {
        self.apply_flag(|sheet| match sheet.topic_mut(topic_id) {
            Some(topic) => move_item(&mut topic.sub_topics, from, to),
            None => false,
        })
    }

    // Questions

    /// Append a question
    ///
    /// With `sub_topic_id == None` a new "Uncategorized" sub-topic is appended
    /// to host the question.
    pub fn add_question(
        &mut self,
        topic_id: &str,
        sub_topic_id: Option<&str>,
        title: &str,
        link: Option<&str>,
    ) -> Option<QuestionLocation> {
        self.apply(|sheet| {
            let topic = sheet.topic_mut(topic_id)?;
            let sub_topic = match sub_topic_id {
                Some(id) => topic.sub_topic_mut(id)?,
                None => {
                    let order = next_order(&topic.sub_topics);
                    topic
                        .sub_topics
                        .push(SubTopic::new(topic_id, UNCATEGORIZED_TITLE, order));
                    topic.sub_topics.last_mut()?
                }
            };
            let question = Question::new(
                topic_id,
                &sub_topic.id,
                title,
                link,
                next_order(&sub_topic.questions),
            );
            let location = QuestionLocation {
                topic_id: topic_id.to_string(),
                sub_topic_id: sub_topic.id.clone(),
                question_id: question.id.clone(),
            };
            sub_topic.questions.push(question);
            Some(location)
        })
    }

    /// Merge `patch` into a question
    ///
    /// With `sub_topic_id == None` the sub-topic is whichever one currently
    /// contains the question.
    pub fn update_question(
        &mut self,
        topic_id: &str,
        sub_topic_id: Option<&str>,
        question_id: &str,
        patch: &QuestionPatch,
    ) -> bool {
        self.apply_flag(|sheet| {
            match find_question_mut(sheet, topic_id, sub_topic_id, question_id) {
                Some(question) => {
                    patch.apply_to(question);
                    true
                }
                None => false,
            }
        })
    }

    pub fn set_question_status(
        &mut self,
        topic_id: &str,
        sub_topic_id: &str,
        question_id: &str,
        status: QuestionStatus,
    ) -> bool {
        self.apply_flag(|sheet| {
            match find_question_mut(sheet, topic_id, Some(sub_topic_id), question_id) {
                Some(question) => {
                    question.status = status;
                    true
                }
                None => false,
            }
        })
    }

    /// Add a tag after trimming and lowercasing it; duplicates are ignored
    pub fn add_question_tag(
        &mut self,
        topic_id: &str,
        sub_topic_id: &str,
        question_id: &str,
        tag: &str,
    ) -> bool {
        let Some(tag) = normalize_tag(tag) else {
            return false;
        };
        self.apply_flag(|sheet| {
            match find_question_mut(sheet, topic_id, Some(sub_topic_id), question_id) {
                Some(question) if !question.tags.contains(&tag) => {
                    question.tags.push(tag);
                    true
                }
                _ => false,
            }
        })
    }

    /// Remove an exact-match tag
    pub fn remove_question_tag(
        &mut self,
        topic_id: &str,
        sub_topic_id: &str,
        question_id: &str,
        tag: &str,
    ) -> bool {
        self.apply_flag(|sheet| {
            match find_question_mut(sheet, topic_id, Some(sub_topic_id), question_id) {
                Some(question) => {
                    let before = question.tags.len();
                    question.tags.retain(|t| t != tag);
                    question.tags.len() != before
                }
                None => false,
            }
        })
    }

    /// Delete a question
    ///
    /// With `sub_topic_id == None` it is removed from whichever sub-topic of
    /// the topic contains it.
    pub fn delete_question(
        &mut self,
        topic_id: &str,
        sub_topic_id: Option<&str>,
        question_id: &str,
    ) -> bool {
        self.apply_flag(|sheet| {
            let Some(topic) = sheet.topic_mut(topic_id) else {
                return false;
            };
            let mut removed = false;
            for sub_topic in topic
                .sub_topics
                .iter_mut()
                .filter(|s| sub_topic_id.is_none_or(|id| s.id == id))
            {
                removed |= remove_where(&mut sub_topic.questions, |q| q.id == question_id);
            }
            removed
        })
    }

    /// Move a question from `from` to `to`
    ///
    /// With `sub_topic_id == None` the same move is applied to every sub-topic
    /// of the topic independently; sub-topics too short for `from` are left as
    /// they are.
    pub fn reorder_questions(
        &mut self,
        topic_id: &str,
        sub_topic_id: Option<&str>,
        from: usize,
        to: usize,
    ) -> bool {
        self.apply_flag(|sheet| {
            let Some(topic) = sheet.topic_mut(topic_id) else {
                return false;
            };
            let mut moved = false;
            for sub_topic in topic
                .sub_topics
                .iter_mut()
                .filter(|s| sub_topic_id.is_none_or(|id| s.id == id))
            {
                moved |= move_item(&mut sub_topic.questions, from, to);
            }
            moved
        })
    }
}

/// Resolve a question under a topic, optionally pinned to a sub-topic
fn find_question_mut<'a>(
    sheet: &'a mut Sheet,
    topic_id: &str,
    sub_topic_id: Option<&str>,
    question_id: &str,
) -> Option<&'a mut Question> {
    let topic = sheet.topic_mut(topic_id)?;
    let sub_topic = match sub_topic_id {
        Some(id) => topic.sub_topic_mut(id)?,
        None => topic
            .sub_topics
            .iter_mut()
            .find(|s| s.question(question_id).is_some())?,
    };
    sub_topic.question_mut(question_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::sample_sheet;

    #[test]
    fn test_no_sheet_is_noop() {
        let mut store = SheetStore::new();
        assert_eq!(store.add_topic("Graphs"), None);
        assert!(!store.reorder_topics(0, 1));
        assert!(store.sheet().is_none());
    }

    #[test]
    fn test_noop_keeps_snapshot_pointer() {
        let mut store = SheetStore::with_sheet(sample_sheet());
        let before = store.snapshot().unwrap();

        assert!(!store.update_topic("nonexistent", "Y"));
        assert!(!store.delete_sub_topic("topic-1", "nonexistent"));
        assert!(!store.add_question_tag("topic-1", "st-1", "q-1", "   "));

        let after = store.snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_edit_does_not_touch_previous_snapshot() {
        let mut store = SheetStore::with_sheet(sample_sheet());
        let before = store.snapshot().unwrap();

        assert!(store.update_topic("topic-1", "Arrays & Hashing"));
        assert_eq!(before.topic("topic-1").unwrap().title, "Arrays");
        assert_eq!(
            store.sheet().unwrap().topic("topic-1").unwrap().title,
            "Arrays & Hashing"
        );
    }

    #[test]
    fn test_same_index_reorder_keeps_snapshot_pointer() {
        let mut store = SheetStore::with_sheet(sample_sheet());
        let before = store.snapshot().unwrap();
        assert!(store.reorder_topics(1, 1));
        assert!(Arc::ptr_eq(&before, &store.snapshot().unwrap()));
    }

    #[test]
    fn test_update_question_resolves_sub_topic() {
        let mut store = SheetStore::with_sheet(sample_sheet());
        let patch = QuestionPatch {
            title: Some("3Sum (revisit)".to_string()),
            ..Default::default()
        };
        assert!(store.update_question("topic-1", None, "q-3", &patch));
        let sheet = store.sheet().unwrap();
        let sub_topic = sheet.topic("topic-1").unwrap().sub_topic("st-2").unwrap();
        assert_eq!(sub_topic.question("q-3").unwrap().title, "3Sum (revisit)");

        // Pinned to the wrong sub-topic: no match
        assert!(!store.update_question("topic-1", Some("st-1"), "q-3", &patch));
    }
}
