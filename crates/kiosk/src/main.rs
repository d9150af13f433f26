// Application binary: errors propagate to the exit status through anyhow.
#![allow(missing_docs)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use kiosk::{settings, RunOptions, Script};
use platform::config::{APP_NAME, APP_VERSION};
use platform::Delivery;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(about = "Kiosk input front end: buttons, rotary encoder and option menu", long_about = None)]
#[command(
    after_help = "Example: kiosk --config demos/settings.json --script demos/scroll_and_commit.json"
)]
#[command(version)]
struct Cli {
    /// Settings file (JSON). Defaults to the reference wiring.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Pin script to replay (JSON list of `{pin, level, t_ms}`).
    /// Without one, every pin rests at its idle level.
    #[arg(short, long)]
    script: Option<PathBuf>,
    /// Override the delivery mode from the settings file
    #[arg(long, value_enum)]
    delivery: Option<DeliveryArg>,
    /// Polling interval in milliseconds (polling delivery)
    #[arg(long)]
    poll_ms: Option<u32>,
    /// Settle tick period in milliseconds (edge delivery)
    #[arg(long, default_value_t = 5)]
    settle_ms: u64,
    /// Keep running after the script ends (until Ctrl-C)
    #[arg(long)]
    hold: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DeliveryArg {
    /// Read every pin each interval
    Polling,
    /// One callback per pin edge
    Edge,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(name = APP_NAME, version = APP_VERSION, "starting");

    let mut config = settings::load(cli.config.as_deref())?;
    let poll_ms = match (cli.poll_ms, config.delivery) {
        (Some(ms), _) => ms,
        (None, Delivery::Polling { interval_ms }) => interval_ms,
        (None, Delivery::EdgeCallback) => platform::config::DEFAULT_POLL_INTERVAL_MS,
    };
    config.delivery = match cli.delivery {
        Some(DeliveryArg::Edge) => Delivery::EdgeCallback,
        Some(DeliveryArg::Polling) => Delivery::Polling {
            interval_ms: poll_ms,
        },
        None => match config.delivery {
            Delivery::Polling { .. } => Delivery::Polling {
                interval_ms: poll_ms,
            },
            Delivery::EdgeCallback => Delivery::EdgeCallback,
        },
    };
    config.validate()?;

    let script = match cli.script.as_deref() {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    // Leave one second after the last scripted edge for debounce and burst
    // windows to close.
    let stop_after = (cli.script.is_some() && !cli.hold)
        .then(|| Duration::from_millis(script.end_ms().saturating_add(1000)));

    let options = RunOptions {
        settle_every: Duration::from_millis(cli.settle_ms.max(1)),
        stop_after,
        record: false,
    };
    let outcome = kiosk::run(&config, script, &options).await?;

    tracing::info!(
        position = outcome.position,
        highlighted = outcome.highlighted.as_str(),
        committed = outcome.committed.as_ref().map_or("none", |l| l.as_str()),
        screen = outcome.screen.as_str(),
        dropped = outcome.dropped,
        "stopped"
    );
    Ok(())
}
