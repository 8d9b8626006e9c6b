//! One-shot sync runner: fetches every registered house calendar for one
//! client and regenerates its task list, exactly like `POST /api/sync`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use conciergerie_core::store::DocumentLocks;
use conciergerie_core::sync::{self, SyncOutcome};
use conciergerie_core::{DataRoot, TenantId};

#[derive(Parser)]
#[command(name = "conciergerie-sync")]
#[command(about = "Synchronize one client's tasks from its ICS calendars")]
struct Cli {
    /// Client id to synchronize
    client_id: String,

    /// Directory holding per-client documents
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let tenant = TenantId::parse(&cli.client_id)?;
    let root = DataRoot::new(cli.data_dir);
    let locks = DocumentLocks::new();
    let http = sync::http_client()?;

    match sync::sync_tenant(&root, &locks, &http, &tenant).await? {
        SyncOutcome::SkippedNoHouses => {
            eprintln!("No maisons.json found for {tenant}, nothing to sync");
        }
        SyncOutcome::Completed { houses, tasks } => {
            println!("Sync finished for {tenant}: {tasks} tasks from {houses} houses");
        }
    }

    Ok(())
}
