//! Blue/Green Deployment Log Watcher
//!
//! Follows a load balancer's access log and alerts operators on
//! unplanned pool failovers and sustained elevated 5xx error rates.
//!
//! # Architecture Overview
//!
//! ```text
//!   access log (appended by the load balancer)
//!        │
//!        ▼
//!   ┌─────────┐    ┌─────────┐    ┌──────────────────────┐
//!   │ source  │───▶│ parser  │───▶│ window  +  detector  │
//!   │  tail   │    │         │    │ (error rate, pools)  │
//!   └─────────┘    └─────────┘    └──────────┬───────────┘
//!                                            │
//!                                            ▼
//!                                 ┌──────────────────────┐
//!                                 │  gate  →  notifier   │
//!                                 │ (cooldown) (webhook) │
//!                                 └──────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use poolwatch::alerts::{LogNotifier, Notifier, SlackWebhook, SystemClock};
use poolwatch::config::load_config;
use poolwatch::lifecycle::{signals, Shutdown};
use poolwatch::observability::logging;
use poolwatch::processor::{RunOutcome, StreamProcessor};
use poolwatch::source::TailSource;

#[derive(Parser)]
#[command(name = "poolwatch")]
#[command(about = "Blue/green deployment log watcher", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Access log to follow (overrides config and LOG_FILE).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("poolwatch v0.1.0 starting");
    tracing::info!(
        log_file = %config.log_file.display(),
        error_rate_threshold = config.window.error_rate_threshold,
        window_size = config.window.size,
        alert_cooldown_secs = config.alerts.cooldown_secs,
        webhook_configured = config.alerts.webhook_url.is_some(),
        "Configuration loaded"
    );

    let notifier: Arc<dyn Notifier> = match &config.alerts.webhook_url {
        Some(url) => Arc::new(SlackWebhook::new(
            url.clone(),
            Duration::from_secs(config.alerts.notify_timeout_secs),
        )?),
        None => Arc::new(LogNotifier),
    };

    let shutdown = Arc::new(Shutdown::new());
    tokio::spawn(signals::listen(Arc::clone(&shutdown)));

    let mut source = TailSource::new(
        &config.log_file,
        Duration::from_secs(config.source.creation_poll_secs),
    );
    let mut processor = StreamProcessor::new(&config, notifier, Arc::new(SystemClock));

    let outcome = processor.run(&mut source, shutdown.subscribe()).await?;

    match outcome {
        RunOutcome::ShutdownRequested => {
            tracing::info!(
                processed_lines = processor.processed_lines(),
                "Shutdown complete"
            );
            Ok(())
        }
        RunOutcome::SourceTerminated => {
            tracing::error!(
                processed_lines = processor.processed_lines(),
                "Log source terminated; restart the watcher"
            );
            Err("log source terminated".into())
        }
    }
}
