use uuid::Uuid;

use crate::event_sourcing::ReplayError;

// ============================================================================
// Club Read Update Errors
// ============================================================================
//
// Missing players and missing stats are not errors; they only reduce the
// completeness of a projection.
//

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Failed to rebuild club: {0}")]
    Replay(#[from] ReplayError),

    #[error("Failed to load club events: {0}")]
    EventStore(#[source] anyhow::Error),

    #[error("Failed to look up player {player_id}: {source}")]
    PlayerLookup {
        player_id: Uuid,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to load stats for {year}: {source}")]
    StatsLoad {
        year: i32,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write club season {year}: {source}")]
    ProjectionWrite {
        year: i32,
        #[source]
        source: anyhow::Error,
    },
}
