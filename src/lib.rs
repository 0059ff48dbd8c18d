//! Sheet MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for editing a
//! hierarchical practice sheet: topics contain sub-topics, which contain
//! ordered questions with a status, tags and an optional link.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `SheetServerHandler` - captures edit intents and renders the tree
//! - **Domain Layer**: `sheet` module - the tree model, the snapshot store and progress
//! - **Persistence Layer**: `endpoint` module - whole-document snapshot endpoint,
//!   optionally backed by a TOML file (`storage`)
//!
//! # Example
//!
//! ```no_run
//! use sheet_mcp::SheetServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = SheetServerHandler::new(Some("sheet.toml"), false)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod endpoint;
pub mod formatting;
mod handlers;
pub mod logging;
pub mod sheet;
pub mod storage;
pub mod validation;

use anyhow::{Context, Result, anyhow, bail};
use log::{info, warn};
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail_public};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Re-export commonly used types
pub use endpoint::{EndpointResponse, Method, PersistenceEndpoint};
pub use sheet::{
    Progress, Question, QuestionPatch, QuestionStatus, Sheet, SheetStore, SubTopic, Topic,
    progress, sample_sheet,
};
pub use storage::Storage;

/// MCP Server handler for sheet editing
///
/// Holds the editor-side store and the persistence endpoint. Edits go to the
/// store; `save_sheet` posts the whole snapshot to the endpoint and adopts
/// the endpoint's answer.
pub struct SheetServerHandler {
    pub(crate) store: Mutex<SheetStore>,
    pub(crate) endpoint: PersistenceEndpoint,
    autosave: bool,
}

impl SheetServerHandler {
    /// Create a new sheet server handler
    ///
    /// # Arguments
    /// * `storage_path` - TOML file backing the endpoint; `None` keeps the sheet in memory only
    /// * `autosave` - Save to the endpoint after every successful edit
    ///
    /// # Example
    /// ```no_run
    /// # use sheet_mcp::SheetServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = SheetServerHandler::new(Some("sheet.toml"), false)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: Option<&str>, autosave: bool) -> Result<Self> {
        let endpoint = match storage_path {
            Some(path) => PersistenceEndpoint::with_storage(Storage::new(path))?,
            None => PersistenceEndpoint::in_memory(sample_sheet()),
        };
        Ok(Self::with_endpoint(endpoint, autosave))
    }

    /// Create a handler on top of an existing endpoint and load from it
    pub fn with_endpoint(endpoint: PersistenceEndpoint, autosave: bool) -> Self {
        let sheet = load_or_sample(endpoint.get());
        Self {
            store: Mutex::new(SheetStore::with_sheet(sheet)),
            endpoint,
            autosave,
        }
    }

    pub(crate) fn store(&self) -> MutexGuard<'_, SheetStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The editor's current snapshot
    pub fn snapshot(&self) -> Option<Arc<Sheet>> {
        self.store().snapshot()
    }

    pub fn endpoint(&self) -> &PersistenceEndpoint {
        &self.endpoint
    }

    /// Post the current snapshot to the endpoint and adopt the response
    pub(crate) fn save_to_endpoint(&self) -> Result<Arc<Sheet>> {
        let mut store = self.store();
        let Some(snapshot) = store.snapshot() else {
            bail!("No sheet is loaded");
        };

        let body = endpoint::encode_save_request(&snapshot)?;
        let response = self.endpoint.handle(Method::Post, Some(&body));
        if !response.is_success() {
            bail!(
                "{} (status {})",
                response.error_message().unwrap_or("Save rejected"),
                response.status
            );
        }

        let saved = response.into_sheet().context("unexpected save response")?;
        store.set_sheet(Some(saved));
        store.snapshot().context("sheet vanished after save")
    }

    /// Reload from the endpoint, falling back to the sample sheet
    pub(crate) fn reload_from_endpoint(&self) -> Option<Arc<Sheet>> {
        let sheet = load_or_sample(self.endpoint.get());
        let mut store = self.store();
        store.set_sheet(Some(sheet));
        store.snapshot()
    }

    /// Save after an edit when autosave is enabled
    pub(crate) fn autosave(&self, action: &str) -> McpResult<()> {
        if !self.autosave {
            return Ok(());
        }
        if let Err(e) = self.save_to_endpoint() {
            bail_public!(_, "{} applied, but saving failed: {:#}", action, e);
        }
        info!("event=autosave status=ok action=\"{}\"", action);
        Ok(())
    }
}

/// Decode a load response; any failure falls back to the bundled sample
pub(crate) fn load_or_sample(response: EndpointResponse) -> Sheet {
    let result = if response.is_success() {
        response.into_sheet()
    } else {
        Err(anyhow!(
            "{} (status {})",
            response.error_message().unwrap_or("Failed to load sheet"),
            response.status
        ))
    };

    match result {
        Ok(sheet) => {
            info!(
                "event=sheet_load status=ok sheet_id={} topics={}",
                sheet.id,
                sheet.topics.len()
            );
            sheet
        }
        Err(e) => {
            warn!("event=sheet_load status=fallback error={:#}", e);
            sample_sheet()
        }
    }
}

/// Practice sheet editor: a checklist of topics, sub-topics and questions.
///
/// Structure:
/// - **topic**: top-level group (e.g. "Arrays")
/// - **sub-topic**: group inside a topic (e.g. "Easy"); questions added without one land in "Uncategorized"
/// - **question**: leaf item with status (todo, in_progress, done), tags and an optional link
///
/// Every node has an ID shown by show_sheet. Reordering works like drag-and-drop:
/// move an item onto the position of another item in the same list.
/// Edits change the working copy; save_sheet persists it (unless autosave is on).
#[mcp_server]
impl McpServer for SheetServerHandler {
    /// **View**: Show the whole sheet as a tree with IDs, status, tags and progress.
    /// **Workflow**: Start here to find the IDs used by every other tool.
    #[tool]
    async fn show_sheet(&self) -> McpResult<String> {
        self.handle_show_sheet().await
    }

    /// **View**: Overall progress as done/total and a rounded percentage.
    #[tool]
    async fn progress(&self) -> McpResult<String> {
        self.handle_progress().await
    }

    /// **Review**: List questions across the sheet, optionally filtered.
    /// **Use**: status="todo" for what is left; tag="graph" for one theme; keyword searches titles and links.
    #[tool]
    async fn list_questions(
        &self,
        /// Status filter: todo/in_progress/done (optional)
        status: Option<String>,
        /// Tag filter, case-insensitive (optional)
        tag: Option<String>,
        /// Keyword in question, sub-topic or topic title, or link (optional)
        keyword: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_questions(status, tag, keyword).await
    }

    /// **Topic**: Append a new topic at the end of the sheet.
    #[tool]
    async fn add_topic(
        &self,
        /// Title of the topic
        title: String,
    ) -> McpResult<String> {
        self.handle_add_topic(title).await
    }

    /// **Topic**: Rename a topic.
    #[tool]
    async fn update_topic(
        &self,
        /// Topic ID
        topic_id: String,
        /// New title
        title: String,
    ) -> McpResult<String> {
        self.handle_update_topic(topic_id, title).await
    }

    /// **Topic**: Delete a topic with all its sub-topics and questions. Cannot be undone.
    #[tool]
    async fn delete_topic(
        &self,
        /// Topic ID
        topic_id: String,
    ) -> McpResult<String> {
        self.handle_delete_topic(topic_id).await
    }

    /// **Topic**: Move a topic to the position currently held by another topic.
    #[tool]
    async fn move_topic(
        &self,
        /// Topic ID to move
        topic_id: String,
        /// Topic ID whose position it takes
        over_topic_id: String,
    ) -> McpResult<String> {
        self.handle_move_topic(topic_id, over_topic_id).await
    }

    /// **Sub-topic**: Append a new sub-topic to a topic.
    #[tool]
    async fn add_sub_topic(
        &self,
        /// Topic ID
        topic_id: String,
        /// Title of the sub-topic
        title: String,
    ) -> McpResult<String> {
        self.handle_add_sub_topic(topic_id, title).await
    }

    /// **Sub-topic**: Rename a sub-topic.
    #[tool]
    async fn update_sub_topic(
        &self,
        /// Topic ID
        topic_id: String,
        /// Sub-topic ID
        sub_topic_id: String,
        /// New title
        title: String,
    ) -> McpResult<String> {
        self.handle_update_sub_topic(topic_id, sub_topic_id, title)
            .await
    }

    /// **Sub-topic**: Delete a sub-topic with all its questions. Cannot be undone.
    #[tool]
    async fn delete_sub_topic(
        &self,
        /// Topic ID
        topic_id: String,
        /// Sub-topic ID
        sub_topic_id: String,
    ) -> McpResult<String> {
        self.handle_delete_sub_topic(topic_id, sub_topic_id).await
    }

    /// **Sub-topic**: Move a sub-topic to the position currently held by another sub-topic of the same topic.
    #[tool]
    async fn move_sub_topic(
        &self,
        /// Topic ID
        topic_id: String,
        /// Sub-topic ID to move
        sub_topic_id: String,
        /// Sub-topic ID whose position it takes
        over_sub_topic_id: String,
    ) -> McpResult<String> {
        self.handle_move_sub_topic(topic_id, sub_topic_id, over_sub_topic_id)
            .await
    }

    /// **Question**: Append a question. Without sub_topic_id a new "Uncategorized" sub-topic is created for it.
    #[tool]
    async fn add_question(
        &self,
        /// Topic ID
        topic_id: String,
        /// Title of the question
        title: String,
        /// Sub-topic ID (optional)
        sub_topic_id: Option<String>,
        /// Problem URL (optional)
        link: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_question(topic_id, title, sub_topic_id, link)
            .await
    }

    /// **Question**: Update question fields. Only given fields change.
    /// **Tip**: link="" clears the link; tags replaces the whole tag list.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_question(
        &self,
        /// Topic ID
        topic_id: String,
        /// Question ID
        question_id: String,
        /// Sub-topic ID; omitted = whichever sub-topic holds the question (optional)
        sub_topic_id: Option<String>,
        /// New title (optional)
        title: Option<String>,
        /// New link, ""=clear (optional)
        link: Option<String>,
        /// New status: todo/in_progress/done (optional)
        status: Option<String>,
        /// Replacement tag list (optional)
        tags: Option<Vec<String>>,
    ) -> McpResult<String> {
        self.handle_update_question(
            topic_id,
            question_id,
            sub_topic_id,
            title,
            link,
            status,
            tags,
        )
        .await
    }

    /// **Question**: Set the status of a question: todo/in_progress/done.
    #[tool]
    async fn set_question_status(
        &self,
        /// Topic ID
        topic_id: String,
        /// Sub-topic ID
        sub_topic_id: String,
        /// Question ID
        question_id: String,
        /// New status: todo/in_progress/done
        status: String,
    ) -> McpResult<String> {
        self.handle_set_question_status(topic_id, sub_topic_id, question_id, status)
            .await
    }

    /// **Question**: Advance the status one step: todo → in_progress → done → todo.
    #[tool]
    async fn cycle_question_status(
        &self,
        /// Topic ID
        topic_id: String,
        /// Sub-topic ID
        sub_topic_id: String,
        /// Question ID
        question_id: String,
    ) -> McpResult<String> {
        self.handle_cycle_question_status(topic_id, sub_topic_id, question_id)
            .await
    }

    /// **Question**: Add a tag. Tags are trimmed and lowercased; duplicates are ignored.
    #[tool]
    async fn add_question_tag(
        &self,
        /// Topic ID
        topic_id: String,
        /// Sub-topic ID
        sub_topic_id: String,
        /// Question ID
        question_id: String,
        /// Tag text
        tag: String,
    ) -> McpResult<String> {
        self.handle_add_question_tag(topic_id, sub_topic_id, question_id, tag)
            .await
    }

    /// **Question**: Remove a tag (exact match).
    #[tool]
    async fn remove_question_tag(
        &self,
        /// Topic ID
        topic_id: String,
        /// Sub-topic ID
        sub_topic_id: String,
        /// Question ID
        question_id: String,
        /// Tag text
        tag: String,
    ) -> McpResult<String> {
        self.handle_remove_question_tag(topic_id, sub_topic_id, question_id, tag)
            .await
    }

    /// **Question**: Delete a question. Cannot be undone.
    #[tool]
    async fn delete_question(
        &self,
        /// Topic ID
        topic_id: String,
        /// Question ID
        question_id: String,
        /// Sub-topic ID; omitted = whichever sub-topic holds the question (optional)
        sub_topic_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_delete_question(topic_id, question_id, sub_topic_id)
            .await
    }

    /// **Question**: Move a question to the position currently held by another question of the same sub-topic.
    #[tool]
    async fn move_question(
        &self,
        /// Topic ID
        topic_id: String,
        /// Question ID to move
        question_id: String,
        /// Question ID whose position it takes
        over_question_id: String,
        /// Sub-topic ID; omitted = whichever sub-topic holds the question (optional)
        sub_topic_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_move_question(topic_id, question_id, over_question_id, sub_topic_id)
            .await
    }

    /// **Persist**: Save the whole working copy. The saved sheet as returned by storage becomes the working copy.
    #[tool]
    async fn save_sheet(&self) -> McpResult<String> {
        self.handle_save_sheet().await
    }

    /// **Persist**: Discard unsaved edits and reload the stored sheet.
    /// Falls back to the bundled sample sheet if loading fails.
    #[tool]
    async fn reload_sheet(&self) -> McpResult<String> {
        self.handle_reload_sheet().await
    }
}
