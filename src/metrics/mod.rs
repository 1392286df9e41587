// Private module declaration
mod server;

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};
use std::time::Duration;

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Club rebuild runs (outcome, duration)
// - Replay volume
// - Data gaps tolerated during enrichment (missing players, missing stats)
// - Projection writes and failures
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_FAILURE: &str = "failure";

/// Central metrics registry for the updater
pub struct Metrics {
    registry: Registry,

    // Run Metrics
    pub club_runs: IntCounterVec,
    pub run_duration: Histogram,
    pub events_replayed: IntCounter,

    // Enrichment Metrics
    pub players_missing: IntCounter,
    pub stats_missing: IntCounter,
    pub stats_load_duration: Histogram,

    // Projection Metrics
    pub projections_written: IntCounter,
    pub projection_write_failures: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let club_runs = IntCounterVec::new(
            Opts::new("club_runs_total", "Club read model rebuilds by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(club_runs.clone()))?;

        let run_duration = Histogram::with_opts(
            HistogramOpts::new("run_duration_seconds", "Full club rebuild duration")
                .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(run_duration.clone()))?;

        let events_replayed = IntCounter::new(
            "events_replayed_total",
            "Club events folded into aggregates",
        )?;
        registry.register(Box::new(events_replayed.clone()))?;

        let players_missing = IntCounter::new(
            "players_missing_total",
            "Contracts whose player could not be found",
        )?;
        registry.register(Box::new(players_missing.clone()))?;

        let stats_missing = IntCounter::new(
            "stats_missing_total",
            "Season contracts projected without any stat lines",
        )?;
        registry.register(Box::new(stats_missing.clone()))?;

        let stats_load_duration = Histogram::with_opts(
            HistogramOpts::new("stats_load_duration_seconds", "Time to load one season of stats")
                .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;
        registry.register(Box::new(stats_load_duration.clone()))?;

        let projections_written = IntCounter::new(
            "projections_written_total",
            "Club season projections replaced",
        )?;
        registry.register(Box::new(projections_written.clone()))?;

        let projection_write_failures = IntCounter::new(
            "projection_write_failures_total",
            "Club season projection writes that failed",
        )?;
        registry.register(Box::new(projection_write_failures.clone()))?;

        Ok(Self {
            registry,
            club_runs,
            run_duration,
            events_replayed,
            players_missing,
            stats_missing,
            stats_load_duration,
            projections_written,
            projection_write_failures,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_run(&self, outcome: &str, elapsed: Duration) {
        self.club_runs.with_label_values(&[outcome]).inc();
        self.run_duration.observe(elapsed.as_secs_f64());
    }
}
