use anyhow::Result;
use async_trait::async_trait;
use scylla::client::session::Session;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::club::Player;

/// Player registry lookups
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// `Ok(None)` when no player carries this id
    async fn find_player(&self, id: Uuid) -> Result<Option<Player>>;
}

pub struct ScyllaPlayerStore {
    session: Arc<Session>,
}

impl ScyllaPlayerStore {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl PlayerStore for ScyllaPlayerStore {
    async fn find_player(&self, id: Uuid) -> Result<Option<Player>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT id, name, current_club_id, active, source_name FROM players WHERE id = ?",
                (id,),
            )
            .await?;

        let rows_result = match result.into_rows_result() {
            Ok(rows) => rows,
            Err(_) => return Ok(None),
        };

        let player = rows_result
            .maybe_first_row::<(Uuid, String, Uuid, bool, String)>()?
            .map(|(id, name, current_club_id, active, source_name)| Player {
                id,
                name,
                current_club_id,
                active,
                source_name,
            });

        Ok(player)
    }
}
