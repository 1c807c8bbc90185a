//! Folder inspection CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notehub_database::StoreManager;
use notehub_entity::folder::{FolderNode, FolderTree};
use notehub_service::TreeService;

use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show a user's folder tree
    Tree {
        /// Owner of the folders
        #[arg(short, long)]
        username: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name, indented by level
    name: String,
    /// Level (1 = top level)
    level: usize,
    /// Notes filed directly in the folder
    notes: usize,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config_path: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;

    let result = match &args.command {
        FolderCommand::Tree { username } => load_tree(&store, username).await,
    };
    store.close().await;
    let tree = result?;

    match format {
        OutputFormat::Json => output::print_json(&tree),
        OutputFormat::Table => {
            let mut rows = Vec::with_capacity(tree.total_folders);
            for root in &tree.roots {
                flatten(root, &mut rows);
            }
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

async fn load_tree(store: &StoreManager, username: &str) -> anyhow::Result<FolderTree> {
    let ctx = super::context_for(store, username).await?;
    Ok(TreeService::new(store.folders()).get_tree(&ctx).await?)
}

/// Depth-first rows, children after their parent.
fn flatten(node: &FolderNode, rows: &mut Vec<FolderRow>) {
    rows.push(FolderRow {
        id: node.id.to_string(),
        name: format!("{}{}", "  ".repeat(node.level.saturating_sub(1)), node.name),
        level: node.level,
        notes: node.note_count,
    });
    for child in &node.children {
        flatten(child, rows);
    }
}
