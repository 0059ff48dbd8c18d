use super::model::{Sheet, Topic};
use serde::Serialize;

/// Completion summary derived from question status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    /// Rounded to the nearest integer, halves round up; 0 when `total` is 0
    pub percent: usize,
}

impl Progress {
    fn from_counts(done: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            (done * 200 + total) / (total * 2)
        };
        Self {
            done,
            total,
            percent,
        }
    }

    /// Progress of a single topic
    pub fn of_topic(topic: &Topic) -> Self {
        let questions = topic.sub_topics.iter().flat_map(|s| s.questions.iter());
        let (done, total) = questions.fold((0, 0), |(done, total), q| {
            (done + usize::from(q.is_done()), total + 1)
        });
        Self::from_counts(done, total)
    }
}

/// Progress of a whole sheet; `None` counts as empty
pub fn progress(sheet: Option<&Sheet>) -> Progress {
    let Some(sheet) = sheet else {
        return Progress::default();
    };
    let (done, total) = sheet
        .topics
        .iter()
        .map(Progress::of_topic)
        .fold((0, 0), |(done, total), p| (done + p.done, total + p.total));
    Progress::from_counts(done, total)
}
