//! Chirp poll runner
//!
//! Runs the notification poller against a live server and logs every
//! dispatched notification, for manual verification.
//!
//! Usage:
//!   cargo run --bin chirp-poll -- --base-url http://localhost:5000
//!   cargo run --bin chirp-poll -- --interval 2000 --verbose
//!   cargo run --bin chirp-poll -- --legacy

use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use chirp_client::{HttpApi, HttpConfig};
use chirp_core::{MessageCountView, TaskProgressView};
use chirp_live::{
    NotificationPoller, PollState, PollerConfig, PollerEvent, TaskProgressHandler,
    UnreadMessageCountHandler,
};

#[derive(Debug, Default)]
struct Args {
    base_url: Option<String>,
    interval_ms: Option<u64>,
    legacy: bool,
    verbose: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut result = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--base-url" | "-b" => {
                i += 1;
                if i < args.len() {
                    result.base_url = Some(args[i].clone());
                }
            }
            "--interval" | "-i" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse::<u64>() {
                        Ok(ms) => result.interval_ms = Some(ms),
                        Err(_) => eprintln!("Invalid interval: {}. Using default.", args[i]),
                    }
                }
            }
            "--legacy" => result.legacy = true,
            "--verbose" | "-v" => result.verbose = true,
            "--help" | "-h" => {
                println!(
                    "Usage: chirp-poll [--base-url URL] [--interval MS] [--legacy] [--verbose]"
                );
                std::process::exit(0);
            }
            other => eprintln!("Unknown argument: {}", other),
        }
        i += 1;
    }

    result
}

struct LogMessageCount;

impl MessageCountView for LogMessageCount {
    fn set_message_count(&self, count: i64) {
        info!(count, visible = count > 0, "Unread message count updated");
    }
}

struct LogTaskProgress;

impl TaskProgressView for LogTaskProgress {
    fn set_task_progress(&self, task_id: &str, progress: f64) {
        info!(task_id, progress, "Task progress updated");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut http_config = HttpConfig::from_env().with_legacy_notifications(args.legacy);
    if let Some(base_url) = args.base_url {
        http_config = http_config.with_base_url(base_url);
    }

    let mut poller_config = PollerConfig::from_env();
    if let Some(interval_ms) = args.interval_ms {
        poller_config = poller_config.with_interval_ms(interval_ms);
    }

    info!(base_url = %http_config.base_url, interval_ms = poller_config.interval_ms, "Starting chirp-poll");

    let api = Arc::new(HttpApi::new(http_config)?);
    let poller = NotificationPoller::new(api, poller_config, PollState::default());
    poller
        .register_handler(UnreadMessageCountHandler::new(Arc::new(LogMessageCount)))
        .await;
    poller
        .register_handler(TaskProgressHandler::new(Arc::new(LogTaskProgress)))
        .await;

    let handle = poller.start();
    let mut events = handle.events();

    let event_logger = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                PollerEvent::Batch { count, cursor } if count > 0 => {
                    info!(count, cursor, "Applied notification batch");
                }
                PollerEvent::Failed { error } => {
                    info!(%error, "Poll failed, will retry next tick");
                }
                PollerEvent::Stopped => break,
                _ => {}
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    handle.shutdown().await?;
    let _ = event_logger.await;

    Ok(())
}
