//! Lifeline replay binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay a cold start on Android with a logged-in user
//! lifeline-replay --script cold_start.jsonl --platform android --token abc
//!
//! # Require a newer server and show debug output
//! lifeline-replay --script upgrade.jsonl --min-server-version 5.0.0 --log-level debug
//! ```

use std::path::PathBuf;

use clap::Parser;
use lifeline_app::{LifecycleConfig, Runtime};
use lifeline_core::{ActivityState, AppStore, Platform, ServerVersion};
use lifeline_replay::{ReplayDriver, ReplayPush, Script};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Lifeline lifecycle replay
#[derive(Parser, Debug)]
#[command(name = "lifeline-replay")]
#[command(about = "Replay scripted lifecycle events through the production runtime")]
#[command(version)]
struct Args {
    /// JSON-lines event script
    #[arg(short, long)]
    script: PathBuf,

    /// Platform used to tag the device token (ios, android)
    #[arg(short, long, default_value = "ios")]
    platform: Platform,

    /// Oldest supported server version
    #[arg(long)]
    min_server_version: Option<ServerVersion>,

    /// Authentication token, simulates a logged-in user
    #[arg(short, long)]
    token: Option<String>,

    /// OS activity state at startup
    #[arg(long, default_value = "active")]
    activity: String,

    /// Device token handed out by the push service
    #[arg(long, default_value = "replay-device")]
    device_token: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let script = Script::load(&args.script)?;
    tracing::info!(script = %args.script.display(), events = script.len(), "replay starting");

    let mut config = LifecycleConfig { platform: args.platform, ..Default::default() };
    if let Some(min) = args.min_server_version {
        config.min_server_version = min;
    }
    tracing::info!(platform = %config.platform, min_server_version = %config.min_server_version);

    let store = AppStore::default();
    store.set_credentials_token(args.token);

    let driver = ReplayDriver::new(script, ActivityState::parse(&args.activity));
    let push = ReplayPush::new(args.device_token);

    Runtime::new(driver, push, store.clone(), &config).run().await?;

    let state = store.snapshot();
    tracing::info!(
        compatibility = ?state.compatibility,
        server_version = ?state.server_version,
        device_token = ?state.device_token,
        "final state"
    );

    Ok(())
}
