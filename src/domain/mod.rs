// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Domain-specific aggregates and read models. Completely separate from the
// generic event sourcing infrastructure.
//
// ============================================================================

pub mod club;
