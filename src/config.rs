//! Service configuration from environment variables

use std::env;

/// Runtime configuration for the updater
///
/// Loaded from environment variables (and `.env`, if present) with defaults
/// suitable for a local ScyllaDB + Redpanda setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// ScyllaDB contact points
    pub scylla_nodes: Vec<String>,

    pub keyspace: String,

    /// Kafka/Redpanda bootstrap servers
    pub kafka_brokers: String,

    /// Topic carrying club ids to rebuild
    pub trigger_topic: String,

    pub consumer_group: String,

    /// Port for the /metrics endpoint, 0 disables it
    pub metrics_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SCYLLA_NODES` (default: 127.0.0.1:9042, comma separated)
    /// - `SCYLLA_KEYSPACE` (default: ddhp)
    /// - `KAFKA_BROKERS` (default: 127.0.0.1:9092)
    /// - `TRIGGER_TOPIC` (default: club-read-updates)
    /// - `CONSUMER_GROUP` (default: club-read-updater)
    /// - `METRICS_PORT` (default: 9090)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            scylla_nodes: parse_nodes(&text("SCYLLA_NODES", "127.0.0.1:9042")),
            keyspace: text("SCYLLA_KEYSPACE", "ddhp"),
            kafka_brokers: text("KAFKA_BROKERS", "127.0.0.1:9092"),
            trigger_topic: text("TRIGGER_TOPIC", "club-read-updates"),
            consumer_group: text("CONSUMER_GROUP", "club-read-updater"),
            metrics_port: lookup("METRICS_PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(9090),
        }
    }
}

fn parse_nodes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|node| !node.is_empty())
        .map(str::to_string)
        .collect()
}
