use futures_util::future::{join_all, try_join_all};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::db::{PlayerStore, ProjectionStore, StatStore};
use crate::event_sourcing::{replay, EventStore, ReplayError};
use crate::metrics::{Metrics, OUTCOME_FAILURE, OUTCOME_SUCCESS};

use super::aggregate::ClubAggregate;
use super::errors::UpdateError;
use super::player::to_player_ref;
use super::season::ClubSeasonProjection;
use super::stats::RawStat;
use super::value_objects::{distinct_years, Contract, SeasonWindow};

// ============================================================================
// Club Read Updater
// ============================================================================
//
// Orchestrates: Events → Aggregate → Player join → per-year Projections → Store
//
// Each year is an independent unit running concurrently with its siblings.
// Units only read the enriched aggregate. A failed unit does not cancel the
// others and completed writes are never rolled back; rerunning the club is
// safe because every write replaces the whole row.
//
// ============================================================================

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub club_id: Uuid,
    pub version: i64,
    pub years_written: Vec<i32>,
    pub players_missing: usize,
    pub stats_missing: usize,
}

struct YearReport {
    year: i32,
    stats_missing: usize,
}

pub struct ClubReadUpdater {
    events: Arc<dyn EventStore>,
    players: Arc<dyn PlayerStore>,
    stats: Arc<dyn StatStore>,
    projections: Arc<dyn ProjectionStore>,
    metrics: Arc<Metrics>,
}

impl ClubReadUpdater {
    pub fn new(
        events: Arc<dyn EventStore>,
        players: Arc<dyn PlayerStore>,
        stats: Arc<dyn StatStore>,
        projections: Arc<dyn ProjectionStore>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            events,
            players,
            stats,
            projections,
            metrics,
        }
    }

    /// Rebuild every season projection for one club
    pub async fn run(&self, club_id: Uuid) -> Result<RunSummary, UpdateError> {
        let started = Instant::now();
        let result = self.rebuild(club_id).await;

        match &result {
            Ok(summary) => {
                self.metrics.record_run(OUTCOME_SUCCESS, started.elapsed());
                tracing::info!(
                    club_id = %club_id,
                    version = summary.version,
                    years = ?summary.years_written,
                    players_missing = summary.players_missing,
                    stats_missing = summary.stats_missing,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Club read model updated"
                );
            }
            Err(e) => {
                self.metrics.record_run(OUTCOME_FAILURE, started.elapsed());
                tracing::error!(club_id = %club_id, error = %e, "Club read update failed");
            }
        }

        result
    }

    async fn rebuild(&self, club_id: Uuid) -> Result<RunSummary, UpdateError> {
        let events = self
            .events
            .load_events(&club_id.to_string())
            .await
            .map_err(UpdateError::EventStore)?;

        if events.is_empty() {
            return Err(ReplayError::NoEventsFound.into());
        }

        let event_count = events.len();
        tracing::info!(club_id = %club_id, event_count, "Club events loaded");

        let aggregate: ClubAggregate = replay(events)?;
        self.metrics.events_replayed.inc_by(event_count as u64);
        tracing::info!(
            club_id = %aggregate.id,
            club_name = %aggregate.club_name,
            version = aggregate.version,
            contracts = aggregate.contracts.len(),
            "Club rebuilt from events"
        );

        let version = aggregate.version;
        let (contracts, players_missing) = self.attach_players(aggregate.contracts).await?;
        let aggregate = ClubAggregate { contracts, ..aggregate };

        let years = distinct_years(&aggregate.contracts);
        let units = years.iter().map(|&year| self.project_year(year, &aggregate));
        let outcomes = join_all(units).await;

        let mut years_written = Vec::with_capacity(outcomes.len());
        let mut stats_missing = 0;
        let mut first_error = None;

        for outcome in outcomes {
            match outcome {
                Ok(report) => {
                    years_written.push(report.year);
                    stats_missing += report.stats_missing;
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    } else {
                        tracing::error!(club_id = %club_id, error = %e, "Additional season failure");
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        Ok(RunSummary {
            club_id,
            version,
            years_written,
            players_missing,
            stats_missing,
        })
    }

    /// Attach player references; unknown players are logged and skipped
    async fn attach_players(
        &self,
        contracts: Vec<Contract>,
    ) -> Result<(Vec<Contract>, usize), UpdateError> {
        let lookups = contracts.into_iter().map(|mut contract| async move {
            let player_id = contract.player_id;
            let found = self
                .players
                .find_player(player_id)
                .await
                .map_err(|source| UpdateError::PlayerLookup { player_id, source })?;

            match found {
                Some(player) => contract.player = Some(to_player_ref(&player)),
                None => tracing::warn!(player_id = %player_id, "Cannot find player for contract"),
            }

            Ok::<_, UpdateError>(contract)
        });

        let contracts = try_join_all(lookups).await?;
        let missing = contracts.iter().filter(|c| c.player.is_none()).count();
        self.metrics.players_missing.inc_by(missing as u64);

        Ok((contracts, missing))
    }

    async fn project_year(
        &self,
        year: i32,
        aggregate: &ClubAggregate,
    ) -> Result<YearReport, UpdateError> {
        let window = SeasonWindow::for_year(year);

        let started = Instant::now();
        let stats_by_player = self
            .load_season_stats(&window)
            .await
            .map_err(|source| UpdateError::StatsLoad { year, source })?;
        self.metrics
            .stats_load_duration
            .observe(started.elapsed().as_secs_f64());
        tracing::info!(
            year,
            players = stats_by_player.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded season stats"
        );

        let projection = ClubSeasonProjection::build(year, aggregate, &stats_by_player);

        let stats_missing = projection
            .contracts
            .iter()
            .filter(|c| !stats_by_player.contains_key(&c.player_id))
            .inspect(|c| tracing::debug!(year, player_id = %c.player_id, "No stats for player"))
            .count();
        self.metrics.stats_missing.inc_by(stats_missing as u64);

        if let Err(source) = self.projections.replace(&projection).await {
            self.metrics.projection_write_failures.inc();
            return Err(UpdateError::ProjectionWrite { year, source });
        }
        self.metrics.projections_written.inc();

        tracing::info!(
            year,
            club_id = %projection.id,
            contracts = projection.contracts.len(),
            "Wrote club season"
        );

        Ok(YearReport { year, stats_missing })
    }

    /// Fetch every round of the season and group the lines by player
    async fn load_season_stats(
        &self,
        window: &SeasonWindow,
    ) -> anyhow::Result<HashMap<Uuid, Vec<RawStat>>> {
        let rounds = try_join_all(window.rounds().map(|round| self.stats.load_round(round))).await?;
        Ok(group_by_player(rounds.into_iter().flatten()))
    }
}

/// Group stat lines by player, keeping their relative order
pub fn group_by_player(stats: impl IntoIterator<Item = RawStat>) -> HashMap<Uuid, Vec<RawStat>> {
    let mut grouped: HashMap<Uuid, Vec<RawStat>> = HashMap::new();
    for stat in stats {
        grouped.entry(stat.player_id).or_default().push(stat);
    }
    grouped
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{
        InMemoryEventStore, InMemoryPlayerStore, InMemoryProjectionStore, InMemoryStatStore,
    };
    use crate::domain::club::Player;
    use crate::event_sourcing::StoredEvent;

    struct Fixture {
        club_id: Uuid,
        first_player: Uuid,
        second_player: Uuid,
        events: Vec<StoredEvent>,
    }

    /// ClubCreated plus one 2022 contract and one early-2023 contract
    fn fixture() -> Fixture {
        let club_id = Uuid::new_v4();
        let first_player = Uuid::new_v4();
        let second_player = Uuid::new_v4();
        let key = club_id.to_string();

        let events = vec![
            StoredEvent::new(
                &key,
                "3",
                "ContractImported",
                format!(
                    r#"{{"playerId":"{second_player}","fromRound":202301,"toRound":202310,"draftPick":2}}"#
                ),
            ),
            StoredEvent::new(
                &key,
                "1",
                "ClubCreated",
                r#"{"email":"coach@lions.test","coachName":"Chris","clubName":"Lions"}"#,
            ),
            StoredEvent::new(
                &key,
                "2",
                "ContractImported",
                format!(
                    r#"{{"playerId":"{first_player}","fromRound":202201,"toRound":202224,"draftPick":1}}"#
                ),
            ),
        ];

        Fixture { club_id, first_player, second_player, events }
    }

    fn player(id: Uuid, name: &str) -> Player {
        Player {
            id,
            name: name.to_string(),
            current_club_id: Uuid::new_v4(),
            active: true,
            source_name: name.to_lowercase().replace(' ', "-"),
        }
    }

    fn stat(round: i32, player_id: Uuid, goals: i32) -> RawStat {
        RawStat { round, player_id, goals, ..Default::default() }
    }

    fn updater(
        events: Vec<StoredEvent>,
        players: Vec<Player>,
        stats: Arc<InMemoryStatStore>,
        projections: Arc<InMemoryProjectionStore>,
    ) -> (ClubReadUpdater, Arc<Metrics>) {
        updater_with(
            InMemoryEventStore::with_events(events),
            InMemoryPlayerStore::with_players(players),
            stats,
            projections,
        )
    }

    fn updater_with(
        events: InMemoryEventStore,
        players: InMemoryPlayerStore,
        stats: Arc<InMemoryStatStore>,
        projections: Arc<InMemoryProjectionStore>,
    ) -> (ClubReadUpdater, Arc<Metrics>) {
        let metrics = Arc::new(Metrics::new().unwrap());
        let updater = ClubReadUpdater::new(
            Arc::new(events),
            Arc::new(players),
            stats,
            projections,
            metrics.clone(),
        );
        (updater, metrics)
    }

    #[tokio::test]
    async fn test_writes_one_projection_per_year() {
        let f = fixture();
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, _) = updater(
            f.events.clone(),
            vec![player(f.first_player, "Harris Andrews"), player(f.second_player, "Zac Bailey")],
            Arc::new(InMemoryStatStore::default()),
            projections.clone(),
        );

        let summary = updater.run(f.club_id).await.unwrap();
        assert_eq!(summary.years_written, vec![2022, 2023]);
        assert_eq!(summary.version, 3);
        assert_eq!(summary.players_missing, 0);

        let rows = projections.rows();
        assert_eq!(rows.len(), 2);

        let season_2022 = &rows[&(2022, f.club_id.to_string())];
        assert_eq!(season_2022.contracts.len(), 1);
        assert_eq!(season_2022.contracts[0].player_id, f.first_player);
        assert_eq!(season_2022.club_name, "Lions");

        let season_2023 = &rows[&(2023, f.club_id.to_string())];
        assert_eq!(season_2023.contracts.len(), 1);
        assert_eq!(season_2023.contracts[0].player_id, f.second_player);
        assert_eq!(
            season_2023.contracts[0].player.as_ref().map(|p| p.name.as_str()),
            Some("Zac Bailey")
        );
        assert_eq!(season_2023.version, 3);
    }

    #[tokio::test]
    async fn test_no_events_fails_without_writes() {
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, metrics) = updater(
            vec![],
            vec![],
            Arc::new(InMemoryStatStore::default()),
            projections.clone(),
        );

        let result = updater.run(Uuid::new_v4()).await;
        assert!(matches!(result, Err(UpdateError::Replay(ReplayError::NoEventsFound))));
        assert!(projections.rows().is_empty());
        assert_eq!(metrics.club_runs.with_label_values(&[OUTCOME_FAILURE]).get(), 1);
    }

    #[tokio::test]
    async fn test_replay_failure_aborts_before_writes() {
        let mut f = fixture();
        f.events[0].sequence = "4".to_string();

        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, _) = updater(
            f.events,
            vec![],
            Arc::new(InMemoryStatStore::default()),
            projections.clone(),
        );

        let result = updater.run(f.club_id).await;
        assert!(matches!(
            result,
            Err(UpdateError::Replay(ReplayError::OutOfOrderEvents { expected: 3, got: 4 }))
        ));
        assert!(projections.rows().is_empty());
    }

    #[tokio::test]
    async fn test_event_store_error_aborts_run() {
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, metrics) = updater_with(
            InMemoryEventStore::unavailable(),
            InMemoryPlayerStore::default(),
            Arc::new(InMemoryStatStore::default()),
            projections.clone(),
        );

        let result = updater.run(Uuid::new_v4()).await;
        assert!(matches!(result, Err(UpdateError::EventStore(_))));
        assert!(projections.rows().is_empty());
        assert_eq!(metrics.club_runs.with_label_values(&[OUTCOME_FAILURE]).get(), 1);
    }

    #[tokio::test]
    async fn test_player_lookup_error_is_fatal() {
        let f = fixture();
        let players = InMemoryPlayerStore::with_players(vec![player(f.first_player, "Harris Andrews")])
            .failing_on(&[f.second_player]);
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, _) = updater_with(
            InMemoryEventStore::with_events(f.events.clone()),
            players,
            Arc::new(InMemoryStatStore::default()),
            projections.clone(),
        );

        let result = updater.run(f.club_id).await;
        assert!(matches!(
            result,
            Err(UpdateError::PlayerLookup { player_id, .. }) if player_id == f.second_player
        ));
        assert!(projections.rows().is_empty());
    }

    #[tokio::test]
    async fn test_stats_failure_keeps_sibling_season() {
        let f = fixture();
        let stats = Arc::new(InMemoryStatStore::default().failing_on(&[2022]));
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, metrics) = updater(f.events.clone(), vec![], stats, projections.clone());

        let result = updater.run(f.club_id).await;
        assert!(matches!(result, Err(UpdateError::StatsLoad { year: 2022, .. })));

        let rows = projections.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows.contains_key(&(2023, f.club_id.to_string())));
        assert_eq!(metrics.projections_written.get(), 1);
    }

    #[tokio::test]
    async fn test_missing_player_is_not_fatal() {
        let f = fixture();
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, metrics) = updater(
            f.events.clone(),
            vec![player(f.first_player, "Harris Andrews")],
            Arc::new(InMemoryStatStore::default()),
            projections.clone(),
        );

        let summary = updater.run(f.club_id).await.unwrap();
        assert_eq!(summary.players_missing, 1);
        assert_eq!(metrics.players_missing.get(), 1);

        let rows = projections.rows();
        let season_2023 = &rows[&(2023, f.club_id.to_string())];
        assert_eq!(season_2023.contracts.len(), 1);
        assert!(season_2023.contracts[0].player.is_none());
    }

    #[tokio::test]
    async fn test_stats_attached_per_season() {
        let f = fixture();
        let stats = Arc::new(InMemoryStatStore::with_stats(vec![
            stat(202203, f.first_player, 1),
            stat(202201, f.first_player, 2),
            stat(202305, f.first_player, 4),
        ]));
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, _) = updater(f.events.clone(), vec![], stats.clone(), projections.clone());

        let summary = updater.run(f.club_id).await.unwrap();
        // second player has no stats in 2023
        assert_eq!(summary.stats_missing, 1);

        let rows = projections.rows();
        let lines = &rows[&(2022, f.club_id.to_string())].contracts[0].stats;
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].round_number, lines[0].forward), (1, 12));
        assert_eq!((lines[1].round_number, lines[1].forward), (3, 6));

        assert!(rows[&(2023, f.club_id.to_string())].contracts[0].stats.is_empty());
    }

    #[tokio::test]
    async fn test_fetches_every_round_of_each_season() {
        let f = fixture();
        let stats = Arc::new(InMemoryStatStore::default());
        let (updater, _) = updater(
            f.events.clone(),
            vec![],
            stats.clone(),
            Arc::new(InMemoryProjectionStore::default()),
        );

        updater.run(f.club_id).await.unwrap();

        let expected: Vec<i32> = SeasonWindow::for_year(2022)
            .rounds()
            .chain(SeasonWindow::for_year(2023).rounds())
            .collect();
        assert_eq!(stats.requested_rounds(), expected);
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_but_keeps_sibling_writes() {
        let f = fixture();
        let projections = Arc::new(InMemoryProjectionStore::failing_on(&[2022]));
        let (updater, metrics) = updater(
            f.events.clone(),
            vec![],
            Arc::new(InMemoryStatStore::default()),
            projections.clone(),
        );

        let result = updater.run(f.club_id).await;
        assert!(matches!(result, Err(UpdateError::ProjectionWrite { year: 2022, .. })));

        let rows = projections.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows.contains_key(&(2023, f.club_id.to_string())));
        assert_eq!(metrics.projection_write_failures.get(), 1);
        assert_eq!(metrics.projections_written.get(), 1);
    }

    #[tokio::test]
    async fn test_rerun_replaces_rows_identically() {
        let f = fixture();
        let projections = Arc::new(InMemoryProjectionStore::default());
        let (updater, _) = updater(
            f.events.clone(),
            vec![player(f.second_player, "Zac Bailey")],
            Arc::new(InMemoryStatStore::with_stats(vec![stat(202302, f.second_player, 3)])),
            projections.clone(),
        );

        updater.run(f.club_id).await.unwrap();
        let first = projections.rows();
        updater.run(f.club_id).await.unwrap();

        assert_eq!(projections.rows(), first);
    }

    #[test]
    fn test_group_by_player_keeps_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let grouped = group_by_player(vec![stat(202301, a, 1), stat(202301, b, 2), stat(202302, a, 3)]);

        assert_eq!(grouped.len(), 2);
        let goals: Vec<i32> = grouped[&a].iter().map(|s| s.goals).collect();
        assert_eq!(goals, vec![1, 3]);
    }
}
