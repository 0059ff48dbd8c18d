//! Common test utilities for integration tests
#![allow(dead_code)]

use sheet_mcp::sheet::ordering::is_contiguous;
use sheet_mcp::{PersistenceEndpoint, Sheet, SheetServerHandler, SheetStore, sample_sheet};
use tempfile::NamedTempFile;

/// Store holding the bundled sample sheet
pub fn sample_store() -> SheetStore {
    SheetStore::with_sheet(sample_sheet())
}

/// Store holding an empty sheet
pub fn empty_store() -> SheetStore {
    SheetStore::with_sheet(Sheet::new("Test Sheet"))
}

/// In-memory handler starting from the sample sheet
pub fn create_test_handler() -> SheetServerHandler {
    SheetServerHandler::with_endpoint(PersistenceEndpoint::in_memory(sample_sheet()), false)
}

/// Handler backed by a temporary storage file
///
/// The file exists but is empty, so the handler starts from the sample sheet.
pub fn get_test_handler(autosave: bool) -> (SheetServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler =
        SheetServerHandler::new(Some(temp_file.path().to_str().unwrap()), autosave).unwrap();
    (handler, temp_file)
}

/// Extract the ID from a "... created with ID: <id> (...)" response
pub fn extract_id_from_response(response: &str) -> String {
    let start = response.find("ID: ").expect("response carries an ID") + 4;
    response[start..]
        .split(|c: char| c.is_whitespace() || c == ')')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Assert `order == index` at every level of the tree
pub fn assert_orders_contiguous(sheet: &Sheet) {
    assert!(is_contiguous(&sheet.topics), "topic orders: {:?}", sheet.topics);
    for topic in &sheet.topics {
        assert!(
            is_contiguous(&topic.sub_topics),
            "sub-topic orders in {}",
            topic.id
        );
        for sub_topic in &topic.sub_topics {
            assert!(
                is_contiguous(&sub_topic.questions),
                "question orders in {}",
                sub_topic.id
            );
        }
    }
}

/// Topic IDs in array order
pub fn topic_ids(sheet: &Sheet) -> Vec<String> {
    sheet.topics.iter().map(|t| t.id.clone()).collect()
}

/// Question IDs of one sub-topic in array order
pub fn question_ids(sheet: &Sheet, topic_id: &str, sub_topic_id: &str) -> Vec<String> {
    sheet
        .topic(topic_id)
        .and_then(|t| t.sub_topic(sub_topic_id))
        .map(|s| s.questions.iter().map(|q| q.id.clone()).collect())
        .unwrap_or_default()
}
