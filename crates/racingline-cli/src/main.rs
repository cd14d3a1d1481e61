//! Racing Line - a terminal viewer for motorsport schedules.
//!
//! Downloads the schedule bin once (or periodically with `--watch`) and
//! prints what is live, what starts in the next 12 hours, and the events
//! still to come.

mod render;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use racingline_core::api::parse_url;
use racingline_core::auth::{
    credentials::DEFAULT_ACCOUNT, CredentialStore, EnvKeyProvider, KeyProvider,
};
use racingline_core::{Config, DataController};

/// Minimum interval accepted for `--watch`, in minutes
const MIN_WATCH_MINUTES: u64 = 1;

enum Command {
    Show { json: bool },
    Watch { minutes: u64 },
    StoreKey(String),
    ForgetKey,
    SetUrl(String),
    Help,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        None => Ok(Command::Show { json: false }),
        Some("--json") => Ok(Command::Show { json: true }),
        Some("--watch") => {
            let minutes = match args.get(1) {
                Some(m) => m.parse::<u64>().context("--watch expects a number of minutes")?,
                None => 5,
            };
            Ok(Command::Watch {
                minutes: minutes.max(MIN_WATCH_MINUTES),
            })
        }
        Some("--store-key") => {
            let key = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("--store-key expects the access key"))?;
            Ok(Command::StoreKey(key.clone()))
        }
        Some("--forget-key") => Ok(Command::ForgetKey),
        Some("--set-url") => {
            let url = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("--set-url expects the data URL"))?;
            Ok(Command::SetUrl(url.clone()))
        }
        Some("--help") | Some("-h") => Ok(Command::Help),
        Some(other) => Err(anyhow::anyhow!("Unknown argument: {}", other)),
    }
}

/// Validate `url` and record it as the stored data URL
fn set_data_url(config: &mut Config, url: &str) -> Result<()> {
    parse_url(url)?;
    config.data_url = Some(url.to_string());
    Ok(())
}

fn keychain(config: &Config) -> CredentialStore {
    CredentialStore::new(config.keyring_account.as_deref().unwrap_or(DEFAULT_ACCOUNT))
}

/// Environment key when set, otherwise the OS keychain
fn key_provider(config: &Config) -> Arc<dyn KeyProvider> {
    let env = EnvKeyProvider::default();
    if env.is_set() {
        return Arc::new(env);
    }
    Arc::new(keychain(config))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    match command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::StoreKey(key) => {
            keychain(&config).store(&key)?;
            eprintln!("Access key stored in the system keychain.");
            Ok(())
        }
        Command::ForgetKey => {
            let store = keychain(&config);
            if store.has_key() {
                store.delete()?;
                eprintln!("Access key removed from the system keychain.");
            } else {
                eprintln!("No access key stored in the system keychain.");
            }
            Ok(())
        }
        Command::SetUrl(url) => {
            set_data_url(&mut config, &url)?;
            config.save()?;
            eprintln!("Data URL saved.");
            Ok(())
        }
        Command::Show { json } => {
            let controller = DataController::new(&config, key_provider(&config))?;
            controller.refresh().await?;
            let state = controller.state();
            if json {
                println!("{}", serde_json::to_string_pretty(&state.views)?);
            } else {
                print!("{}", render::render(&state, chrono::Utc::now()));
            }
            Ok(())
        }
        Command::Watch { minutes } => {
            let controller = DataController::new(&config, key_provider(&config))?;
            watch(controller, Duration::from_secs(minutes * 60)).await
        }
    }
}

/// Refresh on an interval and re-render on every published change.
async fn watch(controller: DataController, period: Duration) -> Result<()> {
    info!(period_secs = period.as_secs(), "Watching schedule");
    let mut rx = controller.subscribe();

    let refresher = controller.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            refresh_once(&refresher).await;
        }
    });

    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        print!("{}", render::render(&state, chrono::Utc::now()));
    }
    Ok(())
}

/// One scheduled refresh; on failure the previous data stays on screen.
async fn refresh_once(controller: &DataController) -> bool {
    match controller.refresh().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Scheduled refresh failed, keeping previous schedule");
            false
        }
    }
}

fn print_usage() {
    eprintln!("Usage: racingline [--json | --watch [MINUTES] | --store-key KEY | --forget-key");
    eprintln!("                   | --set-url URL]");
    eprintln!();
    eprintln!("  (no args)         Download and print live and upcoming sessions");
    eprintln!("  --json            Print the derived views as JSON");
    eprintln!("  --watch [MINUTES] Refresh every MINUTES (default 5) and re-print");
    eprintln!("  --store-key KEY   Save the data access key in the system keychain");
    eprintln!("  --forget-key      Remove the data access key from the system keychain");
    eprintln!("  --set-url URL     Save the data URL in the config file");
    eprintln!();
    eprintln!("The data URL comes from RACINGLINE_DATA_URL or data_url in the config file.");
}
