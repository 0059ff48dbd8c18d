mod common;

use common::*;
use sheet_mcp::{QuestionStatus, Sheet};

fn find_question<'a>(sheet: &'a Sheet, question_id: &str) -> &'a sheet_mcp::Question {
    let location = sheet.locate_question(question_id).unwrap();
    sheet
        .topic(&location.topic_id)
        .and_then(|t| t.sub_topic(&location.sub_topic_id))
        .and_then(|s| s.question(question_id))
        .unwrap()
}

#[tokio::test]
async fn test_add_question_to_sub_topic() {
    let handler = create_test_handler();

    let response = handler
        .handle_add_question(
            "topic-1".to_string(),
            "Container With Most Water".to_string(),
            Some("st-2".to_string()),
            Some(" https://leetcode.com/problems/container-with-most-water/ ".to_string()),
        )
        .await
        .unwrap();
    assert!(response.contains("(sub-topic st-2)"));
    let id = extract_id_from_response(&response);

    let sheet = handler.snapshot().unwrap();
    assert_eq!(
        question_ids(&sheet, "topic-1", "st-2"),
        vec!["q-3".to_string(), id.clone()]
    );
    let question = find_question(&sheet, &id);
    assert_eq!(question.order, 1);
    assert_eq!(question.topic_id, "topic-1");
    assert_eq!(question.sub_topic_id.as_deref(), Some("st-2"));
    assert_eq!(question.status, QuestionStatus::Todo);
    assert_eq!(
        question.link.as_deref(),
        Some("https://leetcode.com/problems/container-with-most-water/")
    );
}

#[tokio::test]
async fn test_add_question_without_sub_topic() {
    let handler = create_test_handler();

    let response = handler
        .handle_add_question("topic-2".to_string(), "Cycle".to_string(), None, None)
        .await
        .unwrap();
    assert!(response.contains("Uncategorized"));
    let id = extract_id_from_response(&response);

    let sheet = handler.snapshot().unwrap();
    let topic = sheet.topic("topic-2").unwrap();
    assert_eq!(topic.sub_topics.len(), 2);
    assert_eq!(topic.sub_topics[1].title, "Uncategorized");
    assert_eq!(topic.sub_topics[1].questions[0].id, id);
    assert_eq!(topic.sub_topics[1].questions[0].order, 0);
    assert!(find_question(&sheet, &id).link.is_none());
}

#[tokio::test]
async fn test_add_question_to_unknown_sub_topic_fails() {
    let handler = create_test_handler();
    let before = handler.snapshot().unwrap();

    let result = handler
        .handle_add_question(
            "topic-1".to_string(),
            "Lost".to_string(),
            Some("st-3".to_string()),
            None,
        )
        .await;
    assert!(result.is_err());
    assert!(std::sync::Arc::ptr_eq(&before, &handler.snapshot().unwrap()));
}

#[tokio::test]
async fn test_update_question() {
    let handler = create_test_handler();

    handler
        .handle_update_question(
            "topic-1".to_string(),
            "q-3".to_string(),
            None,
            Some("3Sum (revisit)".to_string()),
            Some("https://example.com/3sum".to_string()),
            Some("in_progress".to_string()),
            Some(vec!["Two Pointers".to_string(), "sorting".to_string()]),
        )
        .await
        .unwrap();

    let sheet = handler.snapshot().unwrap();
    let question = find_question(&sheet, "q-3");
    assert_eq!(question.title, "3Sum (revisit)");
    assert_eq!(question.link.as_deref(), Some("https://example.com/3sum"));
    assert_eq!(question.status, QuestionStatus::InProgress);
    assert_eq!(question.tags, vec!["two pointers", "sorting"]);
    assert_eq!(question.order, 0);

    // Clearing the link leaves the rest alone
    handler
        .handle_update_question(
            "topic-1".to_string(),
            "q-3".to_string(),
            Some("st-2".to_string()),
            None,
            Some(String::new()),
            None,
            None,
        )
        .await
        .unwrap();
    let sheet = handler.snapshot().unwrap();
    let question = find_question(&sheet, "q-3");
    assert!(question.link.is_none());
    assert_eq!(question.title, "3Sum (revisit)");
}

#[tokio::test]
async fn test_update_question_validation() {
    let handler = create_test_handler();

    // Nothing to change
    let result = handler
        .handle_update_question(
            "topic-1".to_string(),
            "q-1".to_string(),
            None,
            None,
            None,
            None,
            None,
        )
        .await;
    assert!(result.is_err());

    // Bad status
    let result = handler
        .handle_update_question(
            "topic-1".to_string(),
            "q-1".to_string(),
            None,
            None,
            None,
            Some("finished".to_string()),
            None,
        )
        .await;
    assert!(result.is_err());

    // Question in another topic
    let result = handler
        .handle_update_question(
            "topic-1".to_string(),
            "q-4".to_string(),
            None,
            Some("X".to_string()),
            None,
            None,
            None,
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_set_and_cycle_status() {
    let handler = create_test_handler();

    handler
        .handle_set_question_status(
            "topic-2".to_string(),
            "st-3".to_string(),
            "q-4".to_string(),
            "done".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(
        find_question(&handler.snapshot().unwrap(), "q-4").status,
        QuestionStatus::Done
    );

    let response = handler
        .handle_cycle_question_status("topic-2".to_string(), "st-3".to_string(), "q-4".to_string())
        .await
        .unwrap();
    assert!(response.contains("done → todo"));

    for expected in [QuestionStatus::InProgress, QuestionStatus::Done] {
        handler
            .handle_cycle_question_status(
                "topic-2".to_string(),
                "st-3".to_string(),
                "q-4".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(
            find_question(&handler.snapshot().unwrap(), "q-4").status,
            expected
        );
    }

    let result = handler
        .handle_set_question_status(
            "topic-2".to_string(),
            "st-3".to_string(),
            "q-4".to_string(),
            "finished".to_string(),
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_question_tags() {
    let handler = create_test_handler();

    let response = handler
        .handle_add_question_tag(
            "topic-2".to_string(),
            "st-3".to_string(),
            "q-4".to_string(),
            " Classic ".to_string(),
        )
        .await
        .unwrap();
    assert!(response.contains("'classic' added"));

    let response = handler
        .handle_add_question_tag(
            "topic-2".to_string(),
            "st-3".to_string(),
            "q-4".to_string(),
            "CLASSIC".to_string(),
        )
        .await
        .unwrap();
    assert!(response.contains("already has tag"));

    let sheet = handler.snapshot().unwrap();
    assert_eq!(
        find_question(&sheet, "q-4").tags,
        vec!["recursion", "pointers", "classic"]
    );

    let result = handler
        .handle_add_question_tag(
            "topic-2".to_string(),
            "st-3".to_string(),
            "q-4".to_string(),
            "  ".to_string(),
        )
        .await;
    assert!(result.is_err());

    handler
        .handle_remove_question_tag(
            "topic-2".to_string(),
            "st-3".to_string(),
            "q-4".to_string(),
            "recursion".to_string(),
        )
        .await
        .unwrap();
    let result = handler
        .handle_remove_question_tag(
            "topic-2".to_string(),
            "st-3".to_string(),
            "q-4".to_string(),
            "recursion".to_string(),
        )
        .await;
    assert!(result.is_err());

    let sheet = handler.snapshot().unwrap();
    assert_eq!(find_question(&sheet, "q-4").tags, vec!["pointers", "classic"]);
}

#[tokio::test]
async fn test_delete_question() {
    let handler = create_test_handler();

    let response = handler
        .handle_delete_question("topic-1".to_string(), "q-1".to_string(), None)
        .await
        .unwrap();
    assert!(response.contains("Two Sum"));

    let sheet = handler.snapshot().unwrap();
    assert_eq!(question_ids(&sheet, "topic-1", "st-1"), vec!["q-2".to_string()]);
    assert_orders_contiguous(&sheet);

    let result = handler
        .handle_delete_question("topic-1".to_string(), "q-3".to_string(), Some("st-1".to_string()))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_move_question_stays_in_its_sub_topic() {
    let handler = create_test_handler();
    for title in ["4Sum", "Trapping Rain Water"] {
        handler
            .handle_add_question(
                "topic-1".to_string(),
                title.to_string(),
                Some("st-2".to_string()),
                None,
            )
            .await
            .unwrap();
    }
    let before = handler.snapshot().unwrap();
    let st2 = question_ids(&before, "topic-1", "st-2");

    handler
        .handle_move_question("topic-1".to_string(), "q-2".to_string(), "q-1".to_string(), None)
        .await
        .unwrap();

    let after = handler.snapshot().unwrap();
    assert_eq!(
        question_ids(&after, "topic-1", "st-1"),
        vec!["q-2".to_string(), "q-1".to_string()]
    );
    // The sibling sub-topic is untouched
    assert_eq!(question_ids(&after, "topic-1", "st-2"), st2);
    assert_orders_contiguous(&after);
}

#[tokio::test]
async fn test_move_question_across_sub_topics_fails() {
    let handler = create_test_handler();

    let result = handler
        .handle_move_question("topic-1".to_string(), "q-1".to_string(), "q-3".to_string(), None)
        .await;
    assert!(result.is_err());

    let result = handler
        .handle_move_question(
            "topic-1".to_string(),
            "q-1".to_string(),
            "q-2".to_string(),
            Some("st-2".to_string()),
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_list_questions_filters() {
    let handler = create_test_handler();

    let response = handler
        .handle_list_questions(Some("todo".to_string()), None, None)
        .await
        .unwrap();
    assert!(response.starts_with("Found 2 question(s)"));
    assert!(response.contains("3Sum [q-3] (Arrays / Medium)"));

    let response = handler
        .handle_list_questions(None, Some("EASY".to_string()), None)
        .await
        .unwrap();
    assert!(response.contains("Two Sum"));
    assert!(!response.contains("3Sum"));

    let response = handler
        .handle_list_questions(Some("done".to_string()), None, Some("linked".to_string()))
        .await
        .unwrap();
    assert_eq!(response, "No questions found");

    let result = handler
        .handle_list_questions(Some("later".to_string()), None, None)
        .await;
    assert!(result.is_err());
}
