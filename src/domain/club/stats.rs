use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::round_in_year;

// ============================================================================
// Player Statistics
// ============================================================================

/// Per-player, per-round counters as recorded in `raw_stats`.
/// Keyed by (round, player_id) where `round` is year*100 + round.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawStat {
    pub round: i32,
    pub player_id: Uuid,
    pub club_id: Uuid,
    pub goals: i32,
    pub behinds: i32,
    pub disposals: i32,
    pub marks: i32,
    pub hitouts: i32,
    pub tackles: i32,
    pub kicks: i32,
    pub handballs: i32,
    pub goal_assists: i32,
    pub inside50s: i32,
    pub frees_for: i32,
    pub frees_against: i32,
}

/// Display-ready line scores; serialized with short keys inside projections
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayStat {
    #[serde(rename = "rn")]
    pub round_number: i32,
    #[serde(rename = "f")]
    pub forward: i32,
    #[serde(rename = "m")]
    pub midfield: i32,
    #[serde(rename = "r")]
    pub ruck: i32,
    #[serde(rename = "t")]
    pub tackle: i32,
}

/// Score one raw stat line.
///
/// forward = goals*6 + behinds, midfield = disposals,
/// ruck = hitouts + marks, tackle = tackles*6.
pub fn to_display_stat(stat: &RawStat) -> DisplayStat {
    DisplayStat {
        round_number: round_in_year(stat.round),
        forward: stat.goals * 6 + stat.behinds,
        midfield: stat.disposals,
        ruck: stat.hitouts + stat.marks,
        tackle: stat.tackles * 6,
    }
}
