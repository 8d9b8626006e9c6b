//! Flat JSON document storage.
//!
//! Each client document is a standalone JSON file that is read in full,
//! mutated in memory, and rewritten in full. Writers are serialized per
//! (client, document) pair through [`DocumentLocks`]; the last writer's
//! file image wins wholesale, there is no merging.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ConciergeError, ConciergeResult};
use crate::tenant::TenantId;

/// Task list document.
pub const TASKS_FILE: &str = "taches.json";
/// House registry document.
pub const HOUSES_FILE: &str = "maisons.json";
/// Per-day task ordering document.
pub const ORDER_FILE: &str = "ordre-tache.json";

/// Load a named document from a client directory.
///
/// The file is created empty if missing; empty or whitespace-only content
/// parses as the document's default value. Malformed JSON is a storage
/// error, not silently discarded.
pub fn load_document<T>(dir: &Path, name: &str) -> ConciergeResult<T>
where
    T: DeserializeOwned + Default,
{
    let path = dir.join(name);
    if !path.exists() {
        std::fs::write(&path, b"")?;
        return Ok(T::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    if contents.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&contents)
        .map_err(|e| ConciergeError::Storage(format!("invalid JSON in {}: {e}", path.display())))
}

/// Persist a document, replacing the file's previous content entirely.
///
/// Pretty-printed, written through a temp file + rename so a crashed
/// writer cannot leave a torn document behind.
pub fn save_document<T: Serialize>(dir: &Path, name: &str, document: &T) -> ConciergeResult<()> {
    let path = dir.join(name);
    let tmp = dir.join(format!("{name}.tmp"));

    let contents = serde_json::to_string_pretty(document)
        .map_err(|e| ConciergeError::Storage(format!("could not serialize {name}: {e}")))?;

    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

/// Serializes load→mutate→save cycles per (client, document) pair.
///
/// Handles are created lazily and kept for the process lifetime; the
/// registry grows by one entry per pair touched.
#[derive(Clone, Default)]
pub struct DocumentLocks {
    inner: Arc<Mutex<HashMap<(String, String), Arc<tokio::sync::Mutex<()>>>>>,
}

impl DocumentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the writer lock for one client document.
    pub async fn acquire(
        &self,
        tenant: &TenantId,
        document: &str,
    ) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.inner.lock().expect("lock registry poisoned");
            registry
                .entry((tenant.as_str().to_string(), document.to_string()))
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }
}
