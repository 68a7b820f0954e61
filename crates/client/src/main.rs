use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use retailops_auth::RecordingNavigator;
use retailops_client::notify::LogNotifier;
use retailops_client::print::{LabelView, ReceiptView};
use retailops_client::{ClientConfig, QueryOutcome, RetailClient, SqliteStorage};
use retailops_core::{ItemId, TransactionId};

/// Headless RetailOps client: resolves the stored session and prints
/// 58mm receipts or labels.
#[derive(Parser, Debug)]
#[command(name = "retailops-client")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Emit a printable HTML document instead of plain text
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the receipt of a sale
    Receipt { transaction_id: TransactionId },

    /// Print shelf labels for items
    Labels {
        #[arg(required = true)]
        item_ids: Vec<ItemId>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    retailops_observability::init();
    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("failed to load configuration")?;
    tracing::info!(api = %config.api_base_url, storage = ?config.storage_path, "starting client");

    let storage = Arc::new(SqliteStorage::new(&config.storage_path));
    let navigator = Arc::new(RecordingNavigator::new());
    let client = RetailClient::new(config, storage, Arc::new(LogNotifier), navigator.clone())
        .context("failed to build client")?;

    let session = client.start().await;
    match session.session().and_then(|s| s.user.as_ref()) {
        Some(user) => tracing::info!(user = %user.username, role = %user.role, "session resolved"),
        None => tracing::warn!(redirect = ?navigator.last().map(|r| r.path()), "no active session"),
    }
    if let Some(branch) = client.branch().selected() {
        tracing::info!(branch = %branch.name, "branch restored");
    }

    let Some(command) = cli.command else {
        return Ok(());
    };

    let output = match command {
        Commands::Receipt { transaction_id } => {
            let QueryOutcome::Ready(receipt) = client.reports().receipt(Some(&transaction_id)).await? else {
                bail!("receipt query is disabled");
            };
            let view = ReceiptView::new(&receipt);
            if cli.html { view.to_html() } else { view.render() }
        }
        Commands::Labels { item_ids } => {
            let QueryOutcome::Ready(labels) = client.reports().labels(&item_ids).await? else {
                bail!("no item ids given");
            };
            let view = LabelView::new(&labels);
            if cli.html { view.to_html() } else { view.render() }
        }
    };
    print!("{output}");
    Ok(())
}
