//! House (maison) registry operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ConciergeResult;
use crate::store::{self, DocumentLocks, HOUSES_FILE};
use crate::tenant::{DataRoot, TenantId};

/// A managed property. `nom` is the registry key (uniqueness assumed, not
/// enforced); unknown fields round-trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    #[serde(default)]
    pub nom: String,

    /// Calendar feed used to derive this house's cleaning tasks.
    #[serde(default, rename = "icsUrl", skip_serializing_if = "Option::is_none")]
    pub ics_url: Option<String>,

    /// Cleaning time carried onto every derived task.
    #[serde(default, rename = "tempsMenage", skip_serializing_if = "Option::is_none")]
    pub temps_menage: Option<Number>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `maisons.json` document: one house registry per client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HousesDocument {
    #[serde(default)]
    pub maisons: Vec<House>,
}

/// All houses for a client, in stored order.
pub async fn list_houses(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
) -> ConciergeResult<Vec<House>> {
    let dir = root.tenant_dir(tenant)?;
    let _guard = locks.acquire(tenant, HOUSES_FILE).await;
    let document: HousesDocument = store::load_document(&dir, HOUSES_FILE)?;
    Ok(document.maisons)
}

/// Remove every house named `nom`, not just the first match.
pub async fn delete_house(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    nom: &str,
) -> ConciergeResult<()> {
    let dir = root.tenant_dir(tenant)?;
    let _guard = locks.acquire(tenant, HOUSES_FILE).await;
    let mut document: HousesDocument = store::load_document(&dir, HOUSES_FILE)?;
    document.maisons.retain(|m| m.nom != nom);
    store::save_document(&dir, HOUSES_FILE, &document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup() -> (tempfile::TempDir, DataRoot, DocumentLocks, TenantId) {
        let tmp = tempfile::tempdir().unwrap();
        let root = DataRoot::new(tmp.path());
        let tenant = TenantId::parse("client").unwrap();
        (tmp, root, DocumentLocks::new(), tenant)
    }

    fn write_houses(root: &DataRoot, tenant: &TenantId, value: Value) {
        let dir = root.tenant_dir(tenant).unwrap();
        std::fs::write(
            dir.join(HOUSES_FILE),
            serde_json::to_string_pretty(&value).unwrap(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_list_empty_registry() {
        let (_tmp, root, locks, tenant) = setup();
        let houses = list_houses(&root, &locks, &tenant).await.unwrap();
        assert!(houses.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_house_fields_round_trip() {
        let (_tmp, root, locks, tenant) = setup();
        write_houses(
            &root,
            &tenant,
            json!({"maisons": [
                {"nom": "Villa Rose", "icsUrl": "https://cal.example/rose.ics", "adresse": "12 rue des Lilas"}
            ]}),
        );

        let houses = list_houses(&root, &locks, &tenant).await.unwrap();
        assert_eq!(houses[0].nom, "Villa Rose");
        assert_eq!(houses[0].extra["adresse"], json!("12 rue des Lilas"));
    }

    #[tokio::test]
    async fn test_delete_removes_all_matches() {
        let (_tmp, root, locks, tenant) = setup();
        write_houses(
            &root,
            &tenant,
            json!({"maisons": [
                {"nom": "Villa Rose"},
                {"nom": "Chalet Bleu"},
                {"nom": "Villa Rose"}
            ]}),
        );

        delete_house(&root, &locks, &tenant, "Villa Rose").await.unwrap();

        let houses = list_houses(&root, &locks, &tenant).await.unwrap();
        assert_eq!(houses.len(), 1);
        assert_eq!(houses[0].nom, "Chalet Bleu");
    }
}
