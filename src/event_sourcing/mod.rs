// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic replay and event loading. Club-specific code is in src/domain/
//
// ============================================================================

mod core;
mod store;

pub use core::*;
pub use store::*;
