//! Per-day, per-employee task ordering.
//!
//! The ordering value itself is caller-defined and opaque to the store:
//! whatever JSON shape the planning UI sends back is returned unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConciergeResult;
use crate::store::{self, DocumentLocks, ORDER_FILE};
use crate::tenant::{DataRoot, TenantId};

/// The `ordre-tache.json` document: `date → employee → ordering value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderDocument(pub BTreeMap<String, BTreeMap<String, Value>>);

/// The per-employee ordering for one day, empty if none was saved.
pub async fn get_order(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    date: &str,
) -> ConciergeResult<BTreeMap<String, Value>> {
    let dir = root.tenant_dir(tenant)?;
    let _guard = locks.acquire(tenant, ORDER_FILE).await;
    let document: OrderDocument = store::load_document(&dir, ORDER_FILE)?;
    Ok(document.0.get(date).cloned().unwrap_or_default())
}

/// Upsert one employee's ordering for one day.
pub async fn save_order(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    date: &str,
    employe: &str,
    ordre: Value,
) -> ConciergeResult<()> {
    let dir = root.tenant_dir(tenant)?;
    let _guard = locks.acquire(tenant, ORDER_FILE).await;
    let mut document: OrderDocument = store::load_document(&dir, ORDER_FILE)?;
    document
        .0
        .entry(date.to_string())
        .or_default()
        .insert(employe.to_string(), ordre);
    store::save_document(&dir, ORDER_FILE, &document)
}
