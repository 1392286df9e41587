use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::aggregate::ClubAggregate;
use super::stats::{to_display_stat, RawStat};
use super::value_objects::{Contract, SeasonWindow};

// ============================================================================
// Club Season Projection - One Read Model Per (Club, Year)
// ============================================================================
//
// A point-in-time snapshot. Contracts are cloned out of the aggregate, so the
// projection never aliases aggregate state, and every run rebuilds it whole.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSeasonProjection {
    pub id: Uuid,
    pub year: i32,
    pub coach_name: String,
    pub club_name: String,
    pub email: String,
    pub contracts: Vec<Contract>,
    pub version: i64,
}

impl ClubSeasonProjection {
    /// Build the projection for `year` from an enriched aggregate.
    ///
    /// Contracts overlapping the year's round window are kept. Each kept
    /// contract gets the player's stat lines for that year when present in
    /// `stats_by_player`, otherwise an empty list.
    pub fn build(
        year: i32,
        aggregate: &ClubAggregate,
        stats_by_player: &HashMap<Uuid, Vec<RawStat>>,
    ) -> Self {
        let window = SeasonWindow::for_year(year);

        let contracts = aggregate
            .contracts
            .iter()
            .filter(|contract| contract.is_active_in(&window))
            .map(|contract| {
                let mut contract = contract.clone();
                contract.stats = stats_by_player
                    .get(&contract.player_id)
                    .map(|stats| stats.iter().map(to_display_stat).collect())
                    .unwrap_or_default();
                contract
            })
            .collect();

        Self {
            id: aggregate.id,
            year,
            coach_name: aggregate.coach_name.clone(),
            club_name: aggregate.club_name.clone(),
            email: aggregate.email.clone(),
            contracts,
            version: aggregate.version,
        }
    }

    /// Composite storage key: (year, club identity)
    pub fn key(&self) -> (i32, String) {
        (self.year, self.id.to_string())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
