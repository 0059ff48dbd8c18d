//! Persistence endpoint for whole-sheet snapshots
//!
//! The endpoint holds the server-side copy of the sheet. It is transport
//! agnostic: a request is a method plus an optional body, a response is a
//! status code plus a JSON body. Saves replace the whole document; there is
//! no validation beyond the shape of the payload and no merging.

use crate::sheet::{Sheet, sample_sheet};
use crate::storage::Storage;
use anyhow::Result;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Request method understood by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: Value,
}

impl EndpointResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` message of a failed response
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// Decode the body as a sheet
    pub fn into_sheet(self) -> Result<Sheet> {
        Ok(serde_json::from_value(self.body)?)
    }
}

#[derive(Deserialize)]
struct SaveRequest {
    #[serde(default)]
    sheet: Option<Sheet>,
}

#[derive(Serialize)]
struct SaveBody<'a> {
    sheet: &'a Sheet,
}

/// Encode a save request body (`{ "sheet": ... }`)
pub fn encode_save_request(sheet: &Sheet) -> Result<String> {
    Ok(serde_json::to_string(&SaveBody { sheet })?)
}

/// Server-side holder of the sheet snapshot
pub struct PersistenceEndpoint {
    sheet: Mutex<Arc<Sheet>>,
    storage: Option<Storage>,
}

impl PersistenceEndpoint {
    /// Create an endpoint that only keeps the sheet in memory
    pub fn in_memory(sheet: Sheet) -> Self {
        Self {
            sheet: Mutex::new(Arc::new(sheet)),
            storage: None,
        }
    }

    /// Create an endpoint backed by a storage file
    ///
    /// Starts from the file's content, or from the sample sheet when the file
    /// does not exist yet.
    pub fn with_storage(storage: Storage) -> Result<Self> {
        let sheet = match storage.load()? {
            Some(sheet) => sheet,
            None => {
                info!(
                    "event=storage_missing path={} fallback=sample",
                    storage.file_path().display()
                );
                sample_sheet()
            }
        };
        Ok(Self {
            sheet: Mutex::new(Arc::new(sheet)),
            storage: Some(storage),
        })
    }

    fn current(&self) -> MutexGuard<'_, Arc<Sheet>> {
        self.sheet.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Storage backing this endpoint, if any
    pub fn storage(&self) -> Option<&Storage> {
        self.storage.as_ref()
    }

    /// Dispatch a request; POST and PUT behave the same
    pub fn handle(&self, method: Method, body: Option<&str>) -> EndpointResponse {
        match method {
            Method::Get => self.get(),
            Method::Post | Method::Put => self.save(body.unwrap_or_default()),
        }
    }

    /// Return the current snapshot
    pub fn get(&self) -> EndpointResponse {
        let sheet = self.current().clone();
        match serde_json::to_value(&*sheet) {
            Ok(body) => EndpointResponse::ok(body),
            Err(e) => {
                error!("event=sheet_read status=error error={}", e);
                EndpointResponse::error(500, "Failed to load sheet")
            }
        }
    }

    /// Replace the snapshot with the `sheet` of a `{ "sheet": ... }` body
    ///
    /// A body without `sheet` returns the current snapshot unchanged.
    pub fn save(&self, body: &str) -> EndpointResponse {
        let request: SaveRequest = match serde_json::from_str(body) {
            Ok(request) => request,
            Err(e) => {
                warn!("event=sheet_save status=rejected error={}", e);
                return EndpointResponse::error(400, "Invalid request body");
            }
        };

        if let Some(sheet) = request.sheet {
            if let Some(storage) = &self.storage
                && let Err(e) = storage.save(&sheet)
            {
                error!(
                    "event=sheet_save status=error path={} error={:#}",
                    storage.file_path().display(),
                    e
                );
                return EndpointResponse::error(500, "Failed to save sheet");
            }
            info!(
                "event=sheet_save status=ok sheet_id={} topics={} questions={}",
                sheet.id,
                sheet.topics.len(),
                sheet.question_count()
            );
            *self.current() = Arc::new(sheet);
        }

        self.get()
    }
}
