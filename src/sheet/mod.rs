//! Sheet domain model and business logic
//!
//! This module contains the checklist tree and the operations on it.
//! It is split into submodules:
//! - `model`: Sheet, Topic, SubTopic, Question and status/tag helpers
//! - `ordering`: the shared sibling reorder/renumber algorithm
//! - `queries`: lookups and flattened views of the tree
//! - `store`: the snapshot-holding store with CRUD and reorder operations
//! - `progress`: completion summary
//! - `sample`: bundled default dataset

mod model;
pub mod ordering;
mod progress;
mod queries;
mod sample;
mod store;

// Re-export all public types
pub use model::{
    Question, QuestionPatch, QuestionStatus, Sheet, SubTopic, Topic, generate_id, normalize_tag,
    normalize_tags,
};
pub use progress::{Progress, progress};
pub use queries::{QuestionEntry, QuestionLocation};
pub use sample::sample_sheet;
pub use store::{SheetStore, UNCATEGORIZED_TITLE};
