use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_sourcing::{Aggregate, EventEnvelope, ReplayError};

use super::events::ClubEvent;
use super::value_objects::Contract;

// ============================================================================
// Club Aggregate - Event-Derived Club State
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubAggregate {
    // Identity
    pub id: Uuid,
    pub version: i64,

    // Current State (derived from events)
    pub coach_name: String,
    pub club_name: String,
    pub email: String,
    pub contracts: Vec<Contract>,
}

impl Default for ClubAggregate {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            version: -1,
            coach_name: String::new(),
            club_name: String::new(),
            email: String::new(),
            contracts: Vec::new(),
        }
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for ClubAggregate {
    type Event = ClubEvent;

    fn apply(mut self, envelope: &EventEnvelope<ClubEvent>) -> Result<Self, ReplayError> {
        match &envelope.event_data {
            ClubEvent::Created(e) => {
                // A repeated creation event simply overwrites identity
                self.id = Uuid::parse_str(envelope.group_key.trim())
                    .map_err(|_| ReplayError::InvalidAggregateId(envelope.group_key.clone()))?;
                self.email = e.email.clone();
                self.coach_name = e.coach_name.clone();
                self.club_name = e.club_name.clone();
            }
            ClubEvent::ContractImported(e) => {
                self.contracts.push(Contract::new(
                    e.player_id,
                    e.from_round,
                    e.to_round,
                    e.draft_pick,
                ));
            }
        }

        Ok(self)
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
