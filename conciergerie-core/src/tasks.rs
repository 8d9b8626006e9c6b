//! Task list operations.
//!
//! The API accepts arbitrary task payloads and never enforces a schema, so
//! the stored task list is a sequence of opaque JSON values; operations only
//! inspect the fields they need (`id`, `date`). The typed task shape written
//! by the sync pipeline lives in [`crate::sync`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConciergeError, ConciergeResult};
use crate::store::{self, DocumentLocks, TASKS_FILE};
use crate::tenant::{DataRoot, TenantId};

/// The `taches.json` document: one task list per client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksDocument {
    #[serde(default)]
    pub taches: Vec<Value>,
}

/// All tasks for a client, in stored order.
pub async fn list_tasks(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
) -> ConciergeResult<Vec<Value>> {
    let dir = root.tenant_dir(tenant)?;
    let _guard = locks.acquire(tenant, TASKS_FILE).await;
    let document: TasksDocument = store::load_document(&dir, TASKS_FILE)?;
    Ok(document.taches)
}

/// Append a task payload verbatim. No validation, no id assignment.
pub async fn add_task(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    task: Value,
) -> ConciergeResult<()> {
    let dir = root.tenant_dir(tenant)?;
    let _guard = locks.acquire(tenant, TASKS_FILE).await;
    let mut document: TasksDocument = store::load_document(&dir, TASKS_FILE)?;
    document.taches.push(task);
    store::save_document(&dir, TASKS_FILE, &document)
}

/// Set the `employe` field on the first task whose `id` matches.
pub async fn assign_employee(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    id: &str,
    employe: &str,
) -> ConciergeResult<()> {
    update_task(root, locks, tenant, id, |task| {
        task.insert("employe".to_string(), Value::String(employe.to_string()));
    })
    .await
}

/// Set the `done` field on the first task whose `id` matches. The state
/// value is stored as-is (boolean, string, whatever the caller sent).
pub async fn set_status(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    id: &str,
    etat: Value,
) -> ConciergeResult<()> {
    update_task(root, locks, tenant, id, |task| {
        task.insert("done".to_string(), etat);
    })
    .await
}

/// Tasks whose `date` field equals `date` exactly. No range or timezone
/// normalization.
pub async fn tasks_for_date(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    date: &str,
) -> ConciergeResult<Vec<Value>> {
    let tasks = list_tasks(root, locks, tenant).await?;
    Ok(tasks
        .into_iter()
        .filter(|t| t.get("date").and_then(Value::as_str) == Some(date))
        .collect())
}

/// Mutate the first task matching `id` and persist. On a miss the document
/// is left untouched on disk.
async fn update_task<F>(
    root: &DataRoot,
    locks: &DocumentLocks,
    tenant: &TenantId,
    id: &str,
    mutate: F,
) -> ConciergeResult<()>
where
    F: FnOnce(&mut serde_json::Map<String, Value>),
{
    let dir = root.tenant_dir(tenant)?;
    let _guard = locks.acquire(tenant, TASKS_FILE).await;
    let mut document: TasksDocument = store::load_document(&dir, TASKS_FILE)?;

    let found = document
        .taches
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .find(|t| t.get("id").and_then(Value::as_str) == Some(id));

    match found {
        Some(task) => {
            mutate(task);
            store::save_document(&dir, TASKS_FILE, &document)
        }
        None => Err(ConciergeError::TaskNotFound(id.to_string())),
    }
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

    #[tokio::test]
    async fn test_add_then_list_preserves_order() {
        let (_tmp, root, locks, tenant) = setup();

        add_task(&root, &locks, &tenant, json!({"id": "a"})).await.unwrap();
        add_task(&root, &locks, &tenant, json!({"id": "b", "extra": [1, 2]})).await.unwrap();

        let tasks = list_tasks(&root, &locks, &tenant).await.unwrap();
        assert_eq!(tasks, vec![json!({"id": "a"}), json!({"id": "b", "extra": [1, 2]})]);
    }

    #[tokio::test]
    async fn test_arbitrary_payload_is_stored_verbatim() {
        let (_tmp, root, locks, tenant) = setup();

        // no id, unknown fields, even a bare string: all accepted
        add_task(&root, &locks, &tenant, json!({"anything": true})).await.unwrap();
        add_task(&root, &locks, &tenant, json!("not even an object")).await.unwrap();

        let tasks = list_tasks(&root, &locks, &tenant).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1], json!("not even an object"));
    }

    #[tokio::test]
    async fn test_assign_employee_on_unknown_id_leaves_document_unchanged() {
        let (_tmp, root, locks, tenant) = setup();
        add_task(&root, &locks, &tenant, json!({"id": "a"})).await.unwrap();

        let path = root.tenant_dir(&tenant).unwrap().join(TASKS_FILE);
        let before = std::fs::read(&path).unwrap();

        let err = assign_employee(&root, &locks, &tenant, "missing", "Marie")
            .await
            .unwrap_err();
        assert!(matches!(err, ConciergeError::TaskNotFound(_)));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_duplicate_ids_mutate_only_first_occurrence() {
        let (_tmp, root, locks, tenant) = setup();
        add_task(&root, &locks, &tenant, json!({"id": "dup", "slot": 1})).await.unwrap();
        add_task(&root, &locks, &tenant, json!({"id": "dup", "slot": 2})).await.unwrap();

        assign_employee(&root, &locks, &tenant, "dup", "Marie").await.unwrap();

        let tasks = list_tasks(&root, &locks, &tenant).await.unwrap();
        assert_eq!(tasks[0]["employe"], json!("Marie"));
        assert_eq!(tasks[1].get("employe"), None);
    }

    #[tokio::test]
    async fn test_set_status_stores_state_without_coercion() {
        let (_tmp, root, locks, tenant) = setup();
        add_task(&root, &locks, &tenant, json!({"id": "a", "done": false})).await.unwrap();

        set_status(&root, &locks, &tenant, "a", json!("orange")).await.unwrap();

        let tasks = list_tasks(&root, &locks, &tenant).await.unwrap();
        assert_eq!(tasks[0]["done"], json!("orange"));
    }

    #[tokio::test]
    async fn test_tasks_for_date_is_an_exact_string_match() {
        let (_tmp, root, locks, tenant) = setup();
        add_task(&root, &locks, &tenant, json!({"id": "a", "date": "2026-08-07"})).await.unwrap();
        add_task(&root, &locks, &tenant, json!({"id": "b", "date": "2026-08-08"})).await.unwrap();
        add_task(&root, &locks, &tenant, json!({"id": "c"})).await.unwrap();

        let tasks = tasks_for_date(&root, &locks, &tenant, "2026-08-07").await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["id"], json!("a"));

        let none = tasks_for_date(&root, &locks, &tenant, "2026-08").await.unwrap();
        assert!(none.is_empty());
    }
}
