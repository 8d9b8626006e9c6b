//! ICS → task synchronization pipeline.
//!
//! Regenerates a client's entire task list from its houses' calendar feeds.
//! The final write is wholesale: whatever `taches.json` held before the run
//! (manual tasks, assignments, status flags) is replaced by the freshly
//! derived tasks. Re-running against unchanged feeds produces an identical
//! file.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Number;
use tracing::{error, info, warn};

use crate::error::{ConciergeError, ConciergeResult};
use crate::houses::{House, HousesDocument};
use crate::ics;
use crate::store::{self, DocumentLocks, HOUSES_FILE, TASKS_FILE};
use crate::tenant::{DataRoot, TenantId};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One cleaning task derived from a calendar event.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: String,
    pub maison: String,
    pub start: String,
    pub end: String,
    pub date: String,
    pub duration: String,
    pub done: bool,
    pub employe: String,
    #[serde(rename = "tempsMenage")]
    pub temps_menage: Number,
}

/// Result of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// `maisons.json` does not exist for this client; nothing was touched.
    SkippedNoHouses,
    /// The pipeline ran to the end. Houses that failed to fetch or parse
    /// contributed zero tasks; they do not fail the run.
    Completed { houses: usize, tasks: usize },
}

/// Shared HTTP client for ICS fetches. A bounded timeout keeps one dead
/// calendar host from stalling a whole sync run.
pub fn http_client() -> ConciergeResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| ConciergeError::Sync(format!("could not build HTTP client: {e}")))
}

/// Regenerate one client's task list from its houses' calendars.
///
/// Houses are processed sequentially; each fetch/parse failure is logged
/// and isolated to its house. A missing `maisons.json` is a logged no-op,
/// not an error.
pub async fn sync_tenant(
    root: &DataRoot,
    locks: &DocumentLocks,
    http: &reqwest::Client,
    tenant: &TenantId,
) -> ConciergeResult<SyncOutcome> {
    let dir = root.existing_tenant_dir(tenant);

    let maisons = {
        let _guard = locks.acquire(tenant, HOUSES_FILE).await;
        if !dir.join(HOUSES_FILE).exists() {
            error!(client = %tenant, "maisons.json not found, skipping sync");
            return Ok(SyncOutcome::SkippedNoHouses);
        }
        let document: HousesDocument = store::load_document(&dir, HOUSES_FILE)?;
        document.maisons
    };

    let mut all_tasks = Vec::new();
    for maison in &maisons {
        match house_tasks(http, maison).await {
            Ok(Some(tasks)) => all_tasks.extend(tasks),
            Ok(None) => {}
            Err(e) => error!(maison = %maison.nom, error = %e, "house sync failed"),
        }
    }

    let tasks = all_tasks.len();
    {
        let _guard = locks.acquire(tenant, TASKS_FILE).await;
        store::save_document(&dir, TASKS_FILE, &SyncedTasks { taches: &all_tasks })?;
    }
    info!(client = %tenant, houses = maisons.len(), tasks, "sync finished");

    Ok(SyncOutcome::Completed {
        houses: maisons.len(),
        tasks,
    })
}

/// Derive tasks from one house's ICS feed content.
pub fn tasks_from_ics(maison: &House, content: &str) -> ConciergeResult<Vec<Task>> {
    let temps_menage = maison
        .temps_menage
        .clone()
        .unwrap_or_else(|| Number::from(0));

    let tasks = ics::parse_events(content)?
        .into_iter()
        .map(|event| {
            let start = iso(event.start);
            Task {
                id: format!("{}-{}", maison.nom, start),
                maison: maison.nom.clone(),
                end: iso(event.end),
                date: event.start.format("%Y-%m-%d").to_string(),
                duration: format_duration(event.start, event.end),
                start,
                done: false,
                employe: String::new(),
                temps_menage: temps_menage.clone(),
            }
        })
        .collect();

    Ok(tasks)
}

/// Render `end − start` as whole days and hours ("1j 3h"). Minutes are
/// dropped from the display, not from the underlying times.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let total_hours = (end - start).num_minutes() / 60;
    let days = total_hours / 24;
    let hours = total_hours % 24;
    format!("{days}j {hours}h")
}

/// Serialized shape of the regenerated task document.
#[derive(Serialize)]
struct SyncedTasks<'a> {
    taches: &'a [Task],
}

/// Fetch and derive one house's tasks. `None` means the house has no
/// calendar URL configured.
async fn house_tasks(
    http: &reqwest::Client,
    maison: &House,
) -> ConciergeResult<Option<Vec<Task>>> {
    let Some(url) = maison.ics_url.as_deref().filter(|u| !u.is_empty()) else {
        warn!(maison = %maison.nom, "no ICS URL configured");
        return Ok(None);
    };

    info!(maison = %maison.nom, "downloading ICS feed");
    let content = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(Some(tasks_from_ics(maison, &content)?))
}

fn iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
