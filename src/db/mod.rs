// ============================================================================
// Read-Model Collaborators
// ============================================================================
//
// Player registry, raw stats and club season rows. Each concern is a trait
// with a ScyllaDB implementation sharing one session.
//
// ============================================================================

mod players;
mod projections;
mod schema;
mod stats;

#[cfg(test)]
pub mod memory;

pub use players::{PlayerStore, ScyllaPlayerStore};
pub use projections::{ProjectionStore, ScyllaProjectionStore};
pub use schema::ensure_schema;
pub use stats::{ScyllaStatStore, StatStore};
