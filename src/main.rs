//! # resource-admin
//!
//! Terminal front end for the resource dashboard. Mounts the same list and edit views a
//! web host would, against either the REST API or a seeded in-memory store, and prints
//! the navigation effects they return.
//!
//! ```bash
//! resource-admin --local list
//! resource-admin --api-url http://localhost:3000 edit 7 --rating 4
//! resource-admin delete 7 --yes
//! ```

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

use resource_admin::config::AdminConfig;
use resource_admin::lifecycle::{sample_resources, setup_tracing, LocalBackend};
use resource_admin::model::{JsonFileLabelStore, ResourceId, TypeOptions};
use resource_admin::store::{HttpStore, SharedStore};
use resource_admin::views::{
    Confirm, DeleteIntent, DeleteOutcome, EditPhase, EditView, Effect, FieldEdit, ListView,
    LoadOutcome, SubmitOutcome,
};

#[derive(Parser)]
#[command(name = "resource-admin")]
#[command(about = "Browse, edit and delete dashboard resources")]
struct Cli {
    /// Base URL of the resource API [env: RESOURCE_API_URL]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use a seeded in-memory store instead of the API
    #[arg(long, global = true)]
    local: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all resources
    List,

    /// Delete a resource after confirmation
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Change fields of a resource and save it
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        rating: Option<i64>,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Show the selectable resource types
    Types,
}

/// Reads the answer to the delete prompt from stdin.
struct PromptConfirm;

#[async_trait]
impl Confirm for PromptConfirm {
    async fn confirm(&self, intent: &DeleteIntent) -> bool {
        let question = match &intent.title {
            Some(title) => format!("{} \"{title}\" [y/N] ", intent.prompt()),
            None => format!("{} [y/N] ", intent.prompt()),
        };
        tokio::task::spawn_blocking(move || {
            print!("{question}");
            let _ = std::io::stdout().flush();
            let mut answer = String::new();
            std::io::stdin().read_line(&mut answer).is_ok()
                && matches!(answer.trim(), "y" | "Y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}

fn report(effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::NavigateTo(route) => println!("-> {route}"),
            Effect::Back => println!("<- back"),
            Effect::RefreshPage => println!("(refresh)"),
        }
    }
}

async fn list(store: SharedStore, config: &AdminConfig) -> Result<()> {
    let confirm: Arc<dyn Confirm> = Arc::new(PromptConfirm);
    let (view, handle) = ListView::mount(store, confirm, config.view_buffer);
    tokio::spawn(view.run());

    if let LoadOutcome::Failed(e) = handle.mounted().await? {
        warn!(error = %e, "Showing an empty list");
    }
    let rows = handle.rows().await?;
    for row in &rows {
        println!("{row}");
    }
    info!(count = rows.len(), "Listed resources");

    handle.unmount().await?;
    Ok(())
}

async fn delete(store: SharedStore, config: &AdminConfig, id: ResourceId, yes: bool) -> Result<()> {
    let confirm: Arc<dyn Confirm> = if yes {
        Arc::new(|_: &DeleteIntent| true)
    } else {
        Arc::new(PromptConfirm)
    };
    let (view, handle) = ListView::mount(store, confirm, config.view_buffer);
    tokio::spawn(view.run());
    handle.mounted().await?;

    let outcome = handle.request_delete(id).await?;
    handle.unmount().await?;
    match outcome {
        DeleteOutcome::Declined => println!("Cancelled"),
        DeleteOutcome::Deleted { effects } => {
            println!("Deleted resource {id}");
            report(&effects);
        }
        DeleteOutcome::Failed(e) => bail!("Failed to delete resource {id}: {e}"),
    }
    Ok(())
}

fn type_options(config: &AdminConfig) -> TypeOptions {
    TypeOptions::new(Arc::new(JsonFileLabelStore::new(&config.labels_path)))
}

async fn edit(
    store: SharedStore,
    config: &AdminConfig,
    id: ResourceId,
    edits: Vec<FieldEdit>,
) -> Result<()> {
    let options = type_options(config);
    let (view, handle) = EditView::mount(store, id, options, config.view_buffer);
    tokio::spawn(view.run());

    let snapshot = handle.mounted().await?;
    if snapshot.phase == EditPhase::LoadFailed {
        bail!(snapshot.error.unwrap_or_default());
    }
    for edit in edits {
        handle.edit(edit).await?;
    }

    match handle.submit().await? {
        SubmitOutcome::Saved { effects } => {
            println!("Saved resource {id}");
            report(&effects);
        }
        SubmitOutcome::Invalid(e) => bail!(e),
        SubmitOutcome::Failed { message } => bail!(message),
        SubmitOutcome::Dropped => bail!("A save is already in progress"),
    }
    Ok(())
}

async fn run(command: Commands, store: SharedStore, config: &AdminConfig) -> Result<()> {
    match command {
        Commands::List => list(store, config).await,
        Commands::Delete { id, yes } => delete(store, config, ResourceId(id), yes).await,
        Commands::Edit {
            id,
            title,
            author,
            kind,
            rating,
            comment,
        } => {
            let edits = [
                title.map(FieldEdit::Title),
                author.map(FieldEdit::Author),
                kind.map(FieldEdit::Type),
                rating.map(FieldEdit::Rating),
                comment.map(FieldEdit::Comment),
            ]
            .into_iter()
            .flatten()
            .collect();
            edit(store, config, ResourceId(id), edits).await
        }
        Commands::Types => {
            let options = type_options(config);
            for label in options.options() {
                println!("{label}");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let cli = Cli::parse();
    let mut config = AdminConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    if cli.local {
        info!("Using seeded in-memory store");
        let backend = LocalBackend::seeded(config.view_buffer, sample_resources()).await?;
        run(cli.command, Arc::new(backend.store.clone()), &config).await?;
        backend.shutdown().await.map_err(anyhow::Error::msg)?;
    } else {
        info!(api_url = %config.api_url, "Using resource API");
        let store = HttpStore::with_timeout(config.api_url.clone(), config.api_timeout)
            .context("Failed to build HTTP client")?;
        run(cli.command, Arc::new(store), &config).await?;
    }
    Ok(())
}
