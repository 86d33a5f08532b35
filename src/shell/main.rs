// Command line entry point.
//
// Usage
// - `property_ledger [run]`      apply JSON commands from stdin, one per line, then report
// - `property_ledger report`     print the dues and occupancy report
// - `property_ledger export`     print a backup document
// - `property_ledger import F`   merge the backup or owner document in file F
//
// The stored document is loaded first. A corrupt document aborts the process instead of being
// overwritten by a fresh ledger.

use anyhow::{Context, bail};
use chrono::Utc;
use property_ledger::modules::ledger::core::commands::LedgerCommand;
use property_ledger::modules::ledger::core::model::{Owner, OwnerProfile};
use property_ledger::modules::ledger::core::state::LedgerState;
use property_ledger::modules::ledger::use_cases::backup::handler::BackupHandler;
use property_ledger::modules::ledger::use_cases::dispatch_command::handler::DispatchCommandHandler;
use property_ledger::modules::ledger::use_cases::dispatch_command::inbound::json::parse_command;
use property_ledger::modules::ledger::use_cases::load_ledger::handler::LoadLedgerHandler;
use property_ledger::shared::infrastructure::state_store::file_system::FileSystemStateStore;
use property_ledger::shell::config::Config;
use property_ledger::shell::report::build_report;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(FileSystemStateStore::new(config.data_dir.clone()));
    let dispatcher = DispatchCommandHandler::new(store.clone());
    let backups = BackupHandler::new(store.clone());

    let mut state = LoadLedgerHandler::new(store.clone())
        .hydrate(&LedgerState::Empty, &config.owner_id)
        .await
        .with_context(|| format!("could not load ledger for {}", config.owner_id))?;

    if !state.is_loaded() {
        info!(owner = %config.owner_id, "starting a new ledger");
        let owner = Owner::new(config.owner_id.clone(), OwnerProfile::default());
        state = dispatcher
            .dispatch(state, LedgerCommand::SetState(Box::new(owner)))
            .await
            .state;
    }

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("run") => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut applied = 0usize;
            let mut rejected = 0usize;
            while let Some(line) = lines.next_line().await? {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let command = match parse_command(line) {
                    Ok(command) => command,
                    Err(error) => {
                        warn!(%error, "skipping unreadable command");
                        rejected += 1;
                        continue;
                    }
                };
                let outcome = dispatcher.dispatch(state, command).await;
                if outcome.is_applied() {
                    applied += 1;
                } else {
                    rejected += 1;
                }
                state = outcome.state;
            }
            info!(applied, rejected, "commands processed");
            print_report(&state, &config)?;
        }
        Some("report") => print_report(&state, &config)?,
        Some("export") => println!("{}", backups.export(&state, Utc::now())?),
        Some("import") => {
            let path = args.next().context("usage: property_ledger import <file>")?;
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("could not read {path}"))?;
            state = backups.import(&state, &text).await?;
            print_report(&state, &config)?;
        }
        Some(other) => bail!("unknown subcommand {other}"),
    }

    Ok(())
}

fn print_report(state: &LedgerState, config: &Config) -> anyhow::Result<()> {
    match build_report(state, config.today()) {
        Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        None => info!("no active property to report on"),
    }
    Ok(())
}
