// ============================================================================
// Replay Errors
// ============================================================================
//
// Every variant is fatal for the replay: the partially folded aggregate is
// dropped and never handed to callers.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("No events found for aggregate")]
    NoEventsFound,

    #[error("Could not identify event type {0}")]
    UnknownEventType(String),

    #[error("Events out of order: expected sequence {expected} but received {got}")]
    OutOfOrderEvents { expected: i64, got: i64 },

    #[error("Invalid event sequence number: {0:?}")]
    InvalidSequence(String),

    #[error("Malformed payload for event {event_type}: {source}")]
    MalformedPayload {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid aggregate id: {0:?}")]
    InvalidAggregateId(String),
}
