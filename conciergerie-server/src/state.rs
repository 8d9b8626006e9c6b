use std::path::PathBuf;

use anyhow::Result;

use conciergerie_core::DataRoot;
use conciergerie_core::store::DocumentLocks;
use conciergerie_core::sync;

/// Shared application state: the data root, the per-document writer locks,
/// and the HTTP client reused across sync runs.
#[derive(Clone)]
pub struct AppState {
    pub data_root: DataRoot,
    pub locks: DocumentLocks,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        Ok(AppState {
            data_root: DataRoot::new(data_dir),
            locks: DocumentLocks::new(),
            http: sync::http_client()?,
        })
    }
}
