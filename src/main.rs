use clap::{Parser, Subcommand};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

mod config;
mod db;
mod domain;
mod event_sourcing;
mod messaging;
mod metrics;
mod utils;

use config::AppConfig;
use db::{ScyllaPlayerStore, ScyllaProjectionStore, ScyllaStatStore};
use domain::club::ClubReadUpdater;
use event_sourcing::ScyllaEventStore;
use messaging::TriggerConsumer;
use utils::{retry_with_backoff, RetryConfig};

#[derive(Parser)]
#[command(name = "club-read-updater")]
#[command(about = "Rebuilds club season read models from the club event log")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild a single club and exit
    Run {
        /// Club id (UUID)
        club_id: Uuid,
    },

    /// Consume club ids from the trigger topic (default)
    Consume,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,club_read_updater=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    tracing::info!(?config, "Starting club read updater");

    // === 1. ScyllaDB session ===
    let nodes = config.scylla_nodes.clone();
    let session: Session = retry_with_backoff(RetryConfig::startup(), |attempt| {
        let nodes = nodes.clone();
        async move {
            tracing::info!(attempt, nodes = ?nodes, "Connecting to ScyllaDB...");
            SessionBuilder::new().known_nodes(&nodes).build().await
        }
    })
    .await?;

    db::ensure_schema(&session, &config.keyspace).await?;
    let session = Arc::new(session);

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);

    if config.metrics_port != 0 {
        let server_metrics = metrics.clone();
        let port = config.metrics_port;
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to start metrics runtime: {}", e);
                    return;
                }
            };
            rt.block_on(async {
                if let Err(e) = metrics::start_metrics_server(server_metrics, port).await {
                    tracing::error!("Metrics server error: {}", e);
                }
            });
        });
    }

    // === 3. Updater with its collaborators ===
    let updater = ClubReadUpdater::new(
        Arc::new(ScyllaEventStore::new(session.clone())),
        Arc::new(ScyllaPlayerStore::new(session.clone())),
        Arc::new(ScyllaStatStore::new(session.clone())),
        Arc::new(ScyllaProjectionStore::new(session.clone())),
        metrics.clone(),
    );

    // === 4. Run once or consume triggers ===
    match cli.command.unwrap_or(Command::Consume) {
        Command::Run { club_id } => {
            updater.run(club_id).await?;
        }
        Command::Consume => {
            let consumer = TriggerConsumer::new(
                &config.kafka_brokers,
                &config.consumer_group,
                &config.trigger_topic,
            )?;

            tokio::select! {
                result = consumer.run(&updater) => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping consumer");
                }
            }
        }
    }

    Ok(())
}
