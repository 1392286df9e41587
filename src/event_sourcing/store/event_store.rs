use anyhow::Result;
use async_trait::async_trait;
use scylla::client::session::Session;
use std::sync::Arc;

use crate::event_sourcing::core::StoredEvent;

// ============================================================================
// Event Store - Read Side of the Append-Only Log
// ============================================================================
//
// Responsibilities:
// 1. Load every event recorded under one group key
// 2. Return records untouched (text columns, arbitrary order)
//
// Sorting, decoding and sequence validation belong to the replay driver.
//
// ============================================================================

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Load all events for an aggregate. An unknown key yields an empty list.
    async fn load_events(&self, group_key: &str) -> Result<Vec<StoredEvent>>;
}

pub struct ScyllaEventStore {
    session: Arc<Session>,
}

impl ScyllaEventStore {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl EventStore for ScyllaEventStore {
    async fn load_events(&self, group_key: &str) -> Result<Vec<StoredEvent>> {
        let result = self
            .session
            .query_unpaged(
                "SELECT group_key, sequence, event_type, payload
                 FROM club_events
                 WHERE group_key = ?",
                (group_key,),
            )
            .await?;

        let mut events = Vec::new();

        let rows_result = match result.into_rows_result() {
            Ok(rows) => rows,
            Err(_) => return Ok(events), // No rows
        };

        for row in rows_result.rows::<(String, String, String, String)>()? {
            let (group_key, sequence, event_type, payload) = row?;

            tracing::debug!(
                group_key = %group_key,
                sequence = %sequence,
                event_type = %event_type,
                "Loaded event"
            );

            events.push(StoredEvent::new(group_key, sequence, event_type, payload));
        }

        tracing::debug!("Loaded {} events for aggregate {}", events.len(), group_key);
        Ok(events)
    }
}
