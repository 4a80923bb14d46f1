//! Domain types for creatures, moves and type matchups

mod creature;
mod creature_type;
mod moves;
mod stats;

pub use creature::{CreatureSnapshot, KnownMove};
pub use creature_type::{Type, TypeChart, TypeMatchups, TYPE_CHART};
pub use moves::{MoveCategory, MoveDefinition};
pub use stats::CombatStats;
