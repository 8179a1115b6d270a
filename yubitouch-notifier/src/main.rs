// yubitouch-notifier: shows a desktop notification while a key waits for a touch.
//
// Touch events are read from stdin, one tag per line (GPG_ON, U2F_OFF, ...).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use yubitouch_core::{init_logging, init_minimal_logging, ConfigLoader, CoreConfig};
use yubitouch_notifier::feed::{forward_events, spawn_line_reader, FeedEnd};
use yubitouch_notifier::{spawn_libnotify_notifier, DbusTransport, NotifierRegistry, LIBNOTIFY_NOTIFIER};

/// How long the notifier gets to close its notification after input ends.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "yubitouch-notifier", version)]
#[command(about = "Shows a desktop notification while a YubiKey waits for a touch")]
struct Args {
    /// Configuration file (default: $XDG_CONFIG_HOME/yubitouch/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<CoreConfig> {
    let config = match path {
        Some(path) => ConfigLoader::load_from_path(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

/// Completes on ctrl-c. Never completes if the signal cannot be watched.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            init_minimal_logging();
            error!("{:#}", e);
            return Err(e);
        }
    };
    init_logging(&config.logging, false).context("Failed to initialize logging")?;

    info!("Starting yubitouch-notifier...");
    let registry = NotifierRegistry::new();
    let mut notifier = spawn_libnotify_notifier(registry.clone(), &config.notifier, DbusTransport::new());

    let mut lines = spawn_line_reader(std::io::stdin());
    let feed = forward_events(&mut lines, &registry, interrupted());
    tokio::pin!(feed);

    tokio::select! {
        end = &mut feed => match end.context("Failed to read touch events from stdin")? {
            FeedEnd::EndOfInput => info!("End of input, shutting down."),
            FeedEnd::Interrupted => info!("Interrupted, shutting down."),
        },
        result = &mut notifier => {
            return match result {
                Ok(Ok(())) => {
                    info!("Desktop notifier stopped.");
                    Ok(())
                }
                Ok(Err(e)) => Err(e).context("Desktop notifier failed"),
                Err(e) => Err(e).context("Desktop notifier task panicked"),
            };
        }
    }

    registry.unregister(LIBNOTIFY_NOTIFIER);
    match tokio::time::timeout(SHUTDOWN_GRACE, &mut notifier).await {
        Ok(result) => result
            .context("Desktop notifier task panicked")?
            .context("Desktop notifier failed")?,
        Err(_) => {
            warn!("Desktop notifier did not stop within {:?}; abandoning it.", SHUTDOWN_GRACE);
            notifier.abort();
        }
    }

    info!("yubitouch-notifier shut down.");
    Ok(())
}
