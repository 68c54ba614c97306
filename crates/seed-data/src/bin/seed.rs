//! Default seed script - writes the app's fixture documents to Firestore
//!
//! Run against the emulator with:
//! ```
//! FIRESTORE_EMULATOR_HOST=localhost:8080 cargo run -p seed-data --bin seed
//! ```
//!
//! or against a live project with `GOOGLE_APPLICATION_CREDENTIALS` pointing
//! at a service account or user credentials file.

use std::process::ExitCode;

use anyhow::Context;
use seed_data::builders::{ScenarioBuilder, connect_firestore};
use seed_data::db::SeedError;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn init_logging() {
    // Warnings and errors go to stderr, everything else to stdout.
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("Failed to load .env"),
    }

    init_logging();

    let result = ScenarioBuilder::run(|key| std::env::var(key).ok(), connect_firestore).await;

    match result {
        Ok(result) => {
            tracing::info!("  Users: 1 ({})", result.fixtures.user_id);
            tracing::info!("  Programs: {}", result.fixtures.programs.len());
            tracing::info!("  Reels: {}", result.fixtures.reels.len());
            tracing::info!("  Live streams: 1");
            tracing::info!(
                "  Notifications: {} ({})",
                result.report.notification_ids.len(),
                result.report.notification_ids.join(", ")
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ SeedError::Configuration(_)) => {
            tracing::error!("{e}");
            Ok(ExitCode::from(e.exit_code()))
        }
        Err(e) => {
            tracing::error!("Seeding failed: {e}");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
