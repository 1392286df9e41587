use anyhow::Result;
use async_trait::async_trait;
use scylla::client::session::Session;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::club::RawStat;

/// Raw per-round statistics, partitioned by encoded round
#[async_trait]
pub trait StatStore: Send + Sync {
    async fn load_round(&self, round: i32) -> Result<Vec<RawStat>>;
}

pub struct ScyllaStatStore {
    session: Arc<Session>,
}

impl ScyllaStatStore {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

type StatRow = (
    i32, Uuid, Uuid,
    i32, i32, i32, i32, i32, i32,
    i32, i32, i32, i32, i32, i32,
);

#[async_trait]
impl StatStore for ScyllaStatStore {
    async fn load_round(&self, round: i32) -> Result<Vec<RawStat>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT round, player_id, club_id,
                        goals, behinds, disposals, marks, hitouts, tackles,
                        kicks, handballs, goal_assists, inside50s, frees_for, frees_against
                 FROM raw_stats
                 WHERE round = ?",
                (round,),
            )
            .await?;

        let mut stats = Vec::new();

        let rows_result = match result.into_rows_result() {
            Ok(rows) => rows,
            Err(_) => return Ok(stats),
        };

        for row in rows_result.rows::<StatRow>()? {
            let (
                round, player_id, club_id,
                goals, behinds, disposals, marks, hitouts, tackles,
                kicks, handballs, goal_assists, inside50s, frees_for, frees_against,
            ) = row?;

            stats.push(RawStat {
                round,
                player_id,
                club_id,
                goals,
                behinds,
                disposals,
                marks,
                hitouts,
                tackles,
                kicks,
                handballs,
                goal_assists,
                inside50s,
                frees_for,
                frees_against,
            });
        }

        tracing::trace!(round = round, count = stats.len(), "Loaded round stats");
        Ok(stats)
    }
}
