//! Runs one Todoist to Habitica sync.
//!
//! Usage:
//!
//! ```text
//! habitsync -u <habitica-user-id> -t <habitica-api-token> -a <todoist-api-token> [-f <dir>]
//! ```
//!
//! Credentials may also be supplied through `HABITICA_USER_ID`,
//! `HABITICA_API_TOKEN` and `TODOIST_API_TOKEN`. The history is kept in
//! `.todoist-habitrpg.json` inside `-f <dir>`, or the home directory when no
//! directory is given. Log verbosity follows `RUST_LOG` (default `info`).

use clap::Parser;
use habitsync::config::{CliArgs, SyncConfig};
use habitsync::sync::{
    adapters::{
        file::FileHistoryStore,
        http::{HabiticaClient, TodoistClient},
    },
    services::SyncOrchestrator,
};
use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match SyncConfig::from_args(args, dirs::home_dir()) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let orchestrator = SyncOrchestrator::new(
        Arc::new(TodoistClient::with_base_url(
            config.todoist_token,
            config.todoist_url,
        )),
        Arc::new(HabiticaClient::with_base_url(
            config.habitica_user_id,
            config.habitica_token,
            config.habitica_url,
        )),
        Arc::new(FileHistoryStore::new(config.history_dir)),
        Arc::new(DefaultClock),
    );

    match orchestrator.run().await {
        Ok(report) => {
            info!(writes = report.writes(), "Sync completed successfully.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Sync failed with error: {err}");
            ExitCode::FAILURE
        }
    }
}
