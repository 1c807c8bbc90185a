//! Folder note cache verification and repair.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notehub_database::StoreManager;
use notehub_service::{FolderNoteIndex, ReconcileReport, ReconcileService};

use crate::output::{self, OutputFormat};

/// Arguments for reconcile commands
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Reconcile subcommand
    #[command(subcommand)]
    pub command: ReconcileCommand,
}

/// Reconcile subcommands
#[derive(Debug, Subcommand)]
pub enum ReconcileCommand {
    /// Report cache drift for one user without changing anything
    Verify {
        /// User to check
        #[arg(short, long)]
        username: String,
    },
    /// Repair one user's caches and dangling references
    Repair {
        /// User to repair
        #[arg(short, long)]
        username: String,
    },
    /// Repair every user
    All,
}

/// One finding per row
#[derive(Debug, Serialize, Tabled)]
struct FindingRow {
    /// User ID
    user: String,
    /// Affected record
    record: String,
    /// What was found
    finding: String,
    /// Whether it was fixed
    repaired: bool,
}

/// Execute reconcile commands
pub async fn execute(
    args: &ReconcileArgs,
    config_path: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;

    let result = run(&args.command, &store).await;
    store.close().await;
    let reports = result?;

    if reports.iter().all(ReconcileReport::is_clean) {
        output::print_success("All folder caches are consistent.");
        return Ok(());
    }

    match format {
        OutputFormat::Json => output::print_json(&reports),
        OutputFormat::Table => {
            let rows: Vec<FindingRow> = reports.iter().flat_map(findings).collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

async fn run(command: &ReconcileCommand, store: &StoreManager) -> anyhow::Result<Vec<ReconcileReport>> {
    let index = FolderNoteIndex::new(store.folders(), store.notes());
    let service = ReconcileService::new(store.folders(), store.notes(), store.users(), index);

    let reports = match command {
        ReconcileCommand::Verify { username } => {
            let ctx = super::context_for(store, username).await?;
            vec![service.verify(ctx.user_id).await?]
        }
        ReconcileCommand::Repair { username } => {
            let ctx = super::context_for(store, username).await?;
            vec![service.repair(ctx.user_id).await?]
        }
        ReconcileCommand::All => service.repair_all().await?,
    };
    Ok(reports)
}

fn findings(report: &ReconcileReport) -> Vec<FindingRow> {
    let user = report
        .user_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let row = |record: String, finding: String| FindingRow {
        user: user.clone(),
        record,
        finding,
        repaired: report.repaired,
    };

    let mut rows = Vec::new();
    for drift in &report.drift {
        rows.push(row(
            drift.folder_id.to_string(),
            format!(
                "cache drift: {} missing, {} stray",
                drift.missing.len(),
                drift.stray.len()
            ),
        ));
    }
    for note_id in &report.dangling_notes {
        rows.push(row(note_id.to_string(), "note in missing folder".to_string()));
    }
    for folder_id in &report.dangling_folders {
        rows.push(row(folder_id.to_string(), "folder under missing parent".to_string()));
    }
    rows
}
