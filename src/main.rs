//! Deskmate headless entry point
//!
//! Opens the store in the platform data directory and runs the alarm
//! scheduler until interrupted. Feature services are exercised through
//! the library API; this binary only keeps alarms firing.

use anyhow::Context;
use deskmate::notify::{LogAudioPlayer, LogNotifier};
use deskmate::services::{AlarmScheduler, SystemClock};
use deskmate::store::{create_pool, Store};
use directories::ProjectDirs;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deskmate=debug,info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dirs = ProjectDirs::from("", "", "deskmate").context("no home directory available")?;
    let db_path = dirs.data_dir().join("deskmate.db");

    let pool = create_pool(&db_path).await?;
    let store = Store::new(pool);

    AlarmScheduler::new(
        store,
        Arc::new(LogNotifier),
        Arc::new(LogAudioPlayer),
        Arc::new(SystemClock),
    )
    .start();

    tracing::info!("Deskmate running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
