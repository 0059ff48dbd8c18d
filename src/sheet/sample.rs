//! Bundled default dataset, used when no stored sheet can be loaded

use super::model::{Question, QuestionStatus, Sheet, SubTopic, Topic};

fn question(
    id: &str,
    title: &str,
    link: &str,
    order: usize,
    (topic_id, sub_topic_id): (&str, &str),
    status: QuestionStatus,
    tags: &[&str],
) -> Question {
    Question {
        id: id.to_string(),
        title: title.to_string(),
        link: Some(link.to_string()),
        order,
        topic_id: topic_id.to_string(),
        sub_topic_id: Some(sub_topic_id.to_string()),
        status,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn sub_topic(id: &str, title: &str, order: usize, topic_id: &str, questions: Vec<Question>) -> SubTopic {
    SubTopic {
        id: id.to_string(),
        title: title.to_string(),
        order,
        topic_id: topic_id.to_string(),
        questions,
    }
}

/// The "DSA Practice Sheet" starter sheet
pub fn sample_sheet() -> Sheet {
    let arrays_easy = ("topic-1", "st-1");
    let arrays_medium = ("topic-1", "st-2");
    let lists_basics = ("topic-2", "st-3");

    Sheet {
        id: "sheet-1".to_string(),
        title: "DSA Practice Sheet".to_string(),
        slug: Some("dsa-practice-sheet".to_string()),
        topics: vec![
            Topic {
                id: "topic-1".to_string(),
                title: "Arrays".to_string(),
                order: 0,
                sub_topics: vec![
                    sub_topic(
                        "st-1",
                        "Easy",
                        0,
                        "topic-1",
                        vec![
                            question(
                                "q-1",
                                "Two Sum",
                                "https://leetcode.com/problems/two-sum/",
                                0,
                                arrays_easy,
                                QuestionStatus::Done,
                                &["hash map", "easy"],
                            ),
                            question(
                                "q-2",
                                "Best Time to Buy and Sell Stock",
                                "https://leetcode.com/problems/best-time-to-buy-and-sell-stock/",
                                1,
                                arrays_easy,
                                QuestionStatus::InProgress,
                                &["sliding window"],
                            ),
                        ],
                    ),
                    sub_topic(
                        "st-2",
                        "Medium",
                        1,
                        "topic-1",
                        vec![question(
                            "q-3",
                            "3Sum",
                            "https://leetcode.com/problems/3sum/",
                            0,
                            arrays_medium,
                            QuestionStatus::Todo,
                            &["two pointers", "medium"],
                        )],
                    ),
                ],
            },
            Topic {
                id: "topic-2".to_string(),
                title: "Linked List".to_string(),
                order: 1,
                sub_topics: vec![sub_topic(
                    "st-3",
                    "Basics",
                    0,
                    "topic-2",
                    vec![question(
                        "q-4",
                        "Reverse Linked List",
                        "https://leetcode.com/problems/reverse-linked-list/",
                        0,
                        lists_basics,
                        QuestionStatus::Todo,
                        &["recursion", "pointers"],
                    )],
                )],
            },
        ],
    }
}
