use super::error::ReplayError;
use super::event::{DomainEvent, EventEnvelope, StoredEvent};

// ============================================================================
// Aggregate Root Pattern - Event Sourcing Core
// ============================================================================
//
// Key Principles:
// 1. State is derived from events only, never written directly
// 2. Applying an event is a pure reducer: (aggregate, event) -> aggregate
// 3. The fold driver owns ordering and sequencing, not the aggregate
// 4. Any failure discards the whole aggregate
//
// ============================================================================

/// Generic Aggregate trait - all event-sourced aggregates implement this
pub trait Aggregate: Default + Sized + Send + Sync {
    type Event: DomainEvent;

    /// Apply one decoded event and return the next state
    fn apply(self, envelope: &EventEnvelope<Self::Event>) -> Result<Self, ReplayError>;

    /// Sequence number of the last applied event, -1 before any event
    fn version(&self) -> i64;

    fn set_version(&mut self, version: i64);
}

/// Sequence number the next event must carry
fn expected_sequence(version: i64) -> i64 {
    version.max(0) + 1
}

/// Rebuild an aggregate from its full, unordered event history.
///
/// Records are sorted numerically by sequence, then decoded, applied and
/// checked one at a time. The first event must carry sequence 1 and every
/// following one must extend the run by exactly one.
pub fn replay<A: Aggregate>(records: Vec<StoredEvent>) -> Result<A, ReplayError> {
    if records.is_empty() {
        return Err(ReplayError::NoEventsFound);
    }

    let mut ordered = records
        .into_iter()
        .map(|record| record.sequence_number().map(|seq| (seq, record)))
        .collect::<Result<Vec<_>, _>>()?;
    ordered.sort_by_key(|(seq, _)| *seq);

    let mut aggregate = A::default();

    for (sequence_number, record) in &ordered {
        let envelope = EventEnvelope::<A::Event>::decode(record, *sequence_number)?;
        aggregate = aggregate.apply(&envelope)?;

        let expected = expected_sequence(aggregate.version());
        if *sequence_number != expected {
            return Err(ReplayError::OutOfOrderEvents {
                expected,
                got: *sequence_number,
            });
        }
        aggregate.set_version(*sequence_number);

        tracing::trace!(
            group_key = %record.group_key,
            sequence = sequence_number,
            event_type = %record.event_type,
            "Applied event"
        );
    }

    Ok(aggregate)
}

// ============================================================================
// Tests
// ============================================================================
