//! Client identification and per-client storage resolution.

use std::fmt;
use std::path::PathBuf;

use crate::error::{ConciergeError, ConciergeResult};

/// Validated client identifier, as carried in the `x-client-id` header.
///
/// Identifiers map directly to directory names under the data root, so
/// anything that could escape it (path separators, `.`/`..`, NUL) is
/// rejected before any path is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: &str) -> ConciergeResult<Self> {
        let id = raw.trim();
        if id.is_empty() || id == "." || id == ".." {
            return Err(ConciergeError::InvalidTenantId(raw.to_string()));
        }
        if id.chars().any(|c| c == '/' || c == '\\' || c == '\0') {
            return Err(ConciergeError::InvalidTenantId(raw.to_string()));
        }
        Ok(TenantId(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root of the on-disk data layout. Each client owns `<root>/clients/<id>/`.
#[derive(Debug, Clone)]
pub struct DataRoot {
    root: PathBuf,
}

impl DataRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataRoot { root: root.into() }
    }

    /// Directory for one client, created (with ancestors) on first use.
    pub fn tenant_dir(&self, tenant: &TenantId) -> ConciergeResult<PathBuf> {
        let dir = self.existing_tenant_dir(tenant);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Directory for one client, without creating anything.
    pub fn existing_tenant_dir(&self, tenant: &TenantId) -> PathBuf {
        self.root.join("clients").join(tenant.as_str())
    }
}
