use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::client::session::Session;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::club::ClubSeasonProjection;

// ============================================================================
// Club Season Persistence
// ============================================================================
//
// Rows are keyed by (year, club_id). Scalar fields map to native columns; the
// contract list is variable length and nested, so it is stored as one JSON
// document column. The mapping is spelled out in ProjectionRecord below.
//
// ============================================================================

#[async_trait]
pub trait ProjectionStore: Send + Sync {
    /// Insert or fully replace the row for the projection's (year, club) key
    async fn replace(&self, projection: &ClubSeasonProjection) -> Result<()>;
}

/// Storage shape of one club season row
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRecord {
    // Key
    pub year: i32,
    pub club_id: String,

    // Scalar columns
    pub id: Uuid,
    pub coach_name: String,
    pub club_name: String,
    pub email: String,
    pub version: i64,
    pub updated_at: DateTime<Utc>,

    // Document columns
    pub contracts: String,
}

impl ProjectionRecord {
    pub const TABLE: &'static str = "club_seasons";
    pub const KEY_COLUMNS: [&'static str; 2] = ["year", "club_id"];
    pub const SCALAR_COLUMNS: [&'static str; 6] =
        ["id", "coach_name", "club_name", "email", "version", "updated_at"];
    pub const DOCUMENT_COLUMNS: [&'static str; 1] = ["contracts"];

    pub fn from_projection(projection: &ClubSeasonProjection) -> Result<Self> {
        let (year, club_id) = projection.key();

        Ok(Self {
            year,
            club_id,
            id: projection.id,
            coach_name: projection.coach_name.clone(),
            club_name: projection.club_name.clone(),
            email: projection.email.clone(),
            version: projection.version,
            updated_at: Utc::now(),
            contracts: serde_json::to_string(&projection.contracts)?,
        })
    }

    /// Column order matches `values()`
    pub fn columns() -> Vec<&'static str> {
        Self::KEY_COLUMNS
            .iter()
            .chain(Self::SCALAR_COLUMNS.iter())
            .chain(Self::DOCUMENT_COLUMNS.iter())
            .copied()
            .collect()
    }

    pub fn insert_statement() -> String {
        let columns = Self::columns();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::TABLE,
            columns.join(", "),
            placeholders
        )
    }

    #[allow(clippy::type_complexity)]
    pub fn values(
        self,
    ) -> (i32, String, Uuid, String, String, String, i64, DateTime<Utc>, String) {
        (
            self.year,
            self.club_id,
            self.id,
            self.coach_name,
            self.club_name,
            self.email,
            self.version,
            self.updated_at,
            self.contracts,
        )
    }
}

pub struct ScyllaProjectionStore {
    session: Arc<Session>,
    insert: String,
}

impl ScyllaProjectionStore {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            insert: ProjectionRecord::insert_statement(),
        }
    }
}

#[async_trait]
impl ProjectionStore for ScyllaProjectionStore {
    async fn replace(&self, projection: &ClubSeasonProjection) -> Result<()> {
        let record = ProjectionRecord::from_projection(projection)?;

        tracing::debug!(
            year = record.year,
            club_id = %record.club_id,
            contracts_bytes = record.contracts.len(),
            "Replacing club season row"
        );

        self.session
            .query_unpaged(self.insert.clone(), record.values())
            .await?;

        Ok(())
    }
}
