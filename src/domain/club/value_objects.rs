use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::stats::DisplayStat;

// ============================================================================
// Club Value Objects
// ============================================================================

/// Rounds in one season; rounds are numbered 01..=24 within a year
pub const ROUNDS_PER_SEASON: i32 = 24;

/// Encode a year and a round within that year, e.g. (2023, 3) -> 202303
pub fn encode_round(year: i32, round: i32) -> i32 {
    year * 100 + round
}

pub fn year_of(round: i32) -> i32 {
    round / 100
}

pub fn round_in_year(round: i32) -> i32 {
    round % 100
}

/// Inclusive range of encoded rounds making up one season
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    pub year: i32,
    pub start: i32,
    pub end: i32,
}

impl SeasonWindow {
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            start: encode_round(year, 1),
            end: encode_round(year, ROUNDS_PER_SEASON),
        }
    }

    /// Interval overlap with an inclusive `[from_round, to_round]` span
    pub fn overlaps(&self, from_round: i32, to_round: i32) -> bool {
        from_round <= self.end && to_round >= self.start
    }

    /// Every encoded round in the window, ascending
    pub fn rounds(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

/// Read-side view of a player, attached to contracts before projection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub id: Uuid,
    pub name: String,
    pub current_club_id: Uuid,
    pub active: bool,
    pub source_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub player_id: Uuid,
    pub from_round: i32,
    pub to_round: i32,
    pub draft_pick: i32,
    #[serde(default)]
    pub player: Option<PlayerRef>,
    #[serde(default)]
    pub stats: Vec<DisplayStat>,
}

impl Contract {
    pub fn new(player_id: Uuid, from_round: i32, to_round: i32, draft_pick: i32) -> Self {
        Self {
            player_id,
            from_round,
            to_round,
            draft_pick,
            player: None,
            stats: Vec::new(),
        }
    }

    pub fn is_active_in(&self, window: &SeasonWindow) -> bool {
        window.overlaps(self.from_round, self.to_round)
    }
}

/// Years touched by the start or end round of any contract, ascending
pub fn distinct_years(contracts: &[Contract]) -> BTreeSet<i32> {
    contracts
        .iter()
        .flat_map(|c| [year_of(c.from_round), year_of(c.to_round)])
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================
