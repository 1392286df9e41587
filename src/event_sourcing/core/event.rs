use serde::{Deserialize, Serialize};

use super::error::ReplayError;

// ============================================================================
// Stored Event - Raw Record From The Event Store
// ============================================================================
//
// The store hands back events exactly as they were written: every column is
// text and nothing about delivery order is guaranteed. Decoding into a typed
// envelope happens once, inside the replay driver.
//
// ============================================================================

/// Raw event record as persisted in the `club_events` table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoredEvent {
    /// Aggregate identity (UUID text)
    pub group_key: String,
    /// 1-based decimal sequence number
    pub sequence: String,
    pub event_type: String,
    /// UTF-8 JSON document
    pub payload: String,
}

impl StoredEvent {
    pub fn new(
        group_key: impl Into<String>,
        sequence: impl Into<String>,
        event_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            group_key: group_key.into(),
            sequence: sequence.into(),
            event_type: event_type.into(),
            payload: payload.into(),
        }
    }

    /// Parse the sequence column. Only ASCII digits forming a positive value are accepted.
    pub fn sequence_number(&self) -> Result<i64, ReplayError> {
        let invalid = || ReplayError::InvalidSequence(self.sequence.clone());

        if self.sequence.is_empty() || !self.sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        match self.sequence.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(invalid()),
        }
    }
}

// ============================================================================
// Event Envelope - Decoded Event With Its Position
// ============================================================================

/// Generic Event Envelope - a decoded domain event plus its stream metadata
#[derive(Clone, Debug, PartialEq)]
pub struct EventEnvelope<E> {
    pub group_key: String,
    pub sequence_number: i64,
    pub event_type: String,
    pub event_data: E,
}

impl<E: DomainEvent> EventEnvelope<E> {
    /// Decode a stored record whose sequence has already been parsed
    pub fn decode(record: &StoredEvent, sequence_number: i64) -> Result<Self, ReplayError> {
        let event_data = E::decode(&record.event_type, &record.payload)?;

        Ok(Self {
            group_key: record.group_key.clone(),
            sequence_number,
            event_type: record.event_type.clone(),
            event_data,
        })
    }
}

// ============================================================================
// Domain Event Trait
// ============================================================================

/// A closed set of event variants for one aggregate type.
///
/// Implementors match the tag once (case-insensitively) and deserialize the
/// payload into the matching variant.
pub trait DomainEvent: Sized + Clone + Send + Sync {
    fn decode(event_type: &str, payload: &str) -> Result<Self, ReplayError>;
}

// ============================================================================
// Event Serialization Helpers
// ============================================================================

/// Deserialize a JSON payload, attributing failures to the event type
pub fn deserialize_payload<T: for<'de> Deserialize<'de>>(
    event_type: &str,
    payload: &str,
) -> Result<T, ReplayError> {
    serde_json::from_str(payload).map_err(|source| ReplayError::MalformedPayload {
        event_type: event_type.to_string(),
        source,
    })
}
