use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_sourcing::{deserialize_payload, DomainEvent, ReplayError};

// ============================================================================
// Club Events - Domain Events for Club Aggregate
// ============================================================================

/// Club Event - closed union of every event a club stream may contain
#[derive(Debug, Clone, PartialEq)]
pub enum ClubEvent {
    Created(ClubCreated),
    ContractImported(ContractImported),
}

impl DomainEvent for ClubEvent {
    fn decode(event_type: &str, payload: &str) -> Result<Self, ReplayError> {
        match event_type.trim().to_ascii_lowercase().as_str() {
            "clubcreated" => deserialize_payload(event_type, payload).map(ClubEvent::Created),
            "contractimported" => {
                deserialize_payload(event_type, payload).map(ClubEvent::ContractImported)
            }
            _ => Err(ReplayError::UnknownEventType(event_type.to_string())),
        }
    }
}

// ============================================================================
// Individual Event Payloads
// ============================================================================
//
// Producers historically wrote PascalCase keys, so both spellings are read.
//

/// Club Created - identity of the club; the id comes from the group key
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClubCreated {
    #[serde(alias = "Email")]
    pub email: String,
    #[serde(alias = "CoachName")]
    pub coach_name: String,
    #[serde(alias = "ClubName")]
    pub club_name: String,
}

/// Contract Imported - a player contract spanning encoded rounds
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractImported {
    #[serde(alias = "PlayerId")]
    pub player_id: Uuid,
    #[serde(alias = "FromRound")]
    pub from_round: i32,
    #[serde(alias = "ToRound")]
    pub to_round: i32,
    #[serde(alias = "DraftPick")]
    pub draft_pick: i32,
}
