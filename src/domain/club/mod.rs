// ============================================================================
// Club Domain - Club Aggregate and Its Season Read Models
// ============================================================================
//
// - Value objects (Contract, PlayerRef, SeasonWindow, round encoding)
// - Events (ClubCreated, ContractImported)
// - Aggregate (ClubAggregate reducer)
// - External records and their read-side conversions (Player, RawStat)
// - Season projection builder
// - Read updater (the per-club rebuild run)
//
// ============================================================================

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod player;
pub mod read_updater;
pub mod season;
pub mod stats;
pub mod value_objects;

pub use player::Player;
pub use read_updater::ClubReadUpdater;
pub use season::ClubSeasonProjection;
pub use stats::RawStat;
