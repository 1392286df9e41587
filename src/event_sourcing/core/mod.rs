// ============================================================================
// Event Sourcing Core - Generic Infrastructure Abstractions
// ============================================================================
//
// Generic replay machinery that works with any aggregate:
// - No club, contract or season code here
// - Aggregates supply a reducer, the driver supplies ordering
//
// ============================================================================

pub mod aggregate;
pub mod error;
pub mod event;

pub use aggregate::{replay, Aggregate};
pub use error::ReplayError;
pub use event::{deserialize_payload, DomainEvent, EventEnvelope, StoredEvent};
