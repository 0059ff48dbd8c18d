mod common;

use common::*;
use sheet_mcp::{PersistenceEndpoint, SheetServerHandler, Storage, sample_sheet};

#[tokio::test]
async fn test_show_sheet_and_progress() {
    let handler = create_test_handler();

    let text = handler.handle_show_sheet().await.unwrap();
    assert!(text.starts_with("# DSA Practice Sheet [sheet-1]"));
    assert!(text.contains("## 2. Linked List [topic-2] - 0/1 done (0%)"));

    let response = handler.handle_progress().await.unwrap();
    assert_eq!(response, "Progress: 1/4 questions done (25%)");
}

#[tokio::test]
async fn test_edits_stay_local_until_saved() {
    let (handler, temp_file) = get_test_handler(false);
    let storage = Storage::new(temp_file.path());

    handler.handle_add_topic("Graphs".to_string()).await.unwrap();
    assert!(storage.load().unwrap().is_none());
    assert_eq!(handler.endpoint().get().into_sheet().unwrap(), sample_sheet());

    let response = handler.handle_save_sheet().await.unwrap();
    assert!(response.contains("3 topic(s), 4 question(s)"));

    let stored = storage.load().unwrap().unwrap();
    assert_eq!(stored.topics.len(), 3);
    assert_eq!(stored, *handler.snapshot().unwrap());
}

#[tokio::test]
async fn test_autosave_writes_every_edit() {
    let (handler, temp_file) = get_test_handler(true);
    let storage = Storage::new(temp_file.path());

    handler
        .handle_set_question_status(
            "topic-1".to_string(),
            "st-2".to_string(),
            "q-3".to_string(),
            "done".to_string(),
        )
        .await
        .unwrap();

    let stored = storage.load().unwrap().unwrap();
    assert_eq!(stored, *handler.snapshot().unwrap());
    assert_eq!(sheet_mcp::progress(Some(&stored)).done, 2);
}

#[tokio::test]
async fn test_saved_sheet_survives_restart() {
    let (handler, temp_file) = get_test_handler(false);
    let id = extract_id_from_response(
        &handler.handle_add_topic("Trees".to_string()).await.unwrap(),
    );
    handler
        .handle_add_question(id.clone(), "Invert Binary Tree".to_string(), None, None)
        .await
        .unwrap();
    handler.handle_save_sheet().await.unwrap();
    drop(handler);

    let reopened =
        SheetServerHandler::new(Some(temp_file.path().to_str().unwrap()), false).unwrap();
    let sheet = reopened.snapshot().unwrap();
    let topic = sheet.topic(&id).unwrap();
    assert_eq!(topic.title, "Trees");
    assert_eq!(topic.sub_topics[0].questions[0].title, "Invert Binary Tree");
    assert_orders_contiguous(&sheet);
}

#[tokio::test]
async fn test_reload_discards_unsaved_edits() {
    let handler = create_test_handler();

    handler.handle_delete_topic("topic-2".to_string()).await.unwrap();
    assert_eq!(handler.snapshot().unwrap().topics.len(), 1);

    let response = handler.handle_reload_sheet().await.unwrap();
    assert!(response.contains("2 topic(s), 1/4 questions done"));
    assert_eq!(*handler.snapshot().unwrap(), sample_sheet());
}

#[tokio::test]
async fn test_save_replaces_endpoint_copy() {
    let endpoint = PersistenceEndpoint::in_memory(sample_sheet());
    let handler = SheetServerHandler::with_endpoint(endpoint, false);

    handler
        .handle_update_topic("topic-1".to_string(), "Arrays & Hashing".to_string())
        .await
        .unwrap();
    handler.handle_save_sheet().await.unwrap();

    let remote = handler.endpoint().get().into_sheet().unwrap();
    assert_eq!(remote.topics[0].title, "Arrays & Hashing");
    assert_eq!(remote, *handler.snapshot().unwrap());
}
