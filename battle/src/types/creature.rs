//! Creature snapshots taken at battle start

use arena_protocol::{CreatureId, MoveId};
use serde::{Deserialize, Deserializer, Serialize};

use super::creature_type::Type;
use super::stats::CombatStats;

/// A move the creature knows, with the PP it currently has left
///
/// `current_pp` is `None` for a freshly learned move (full PP).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownMove {
    pub move_id: MoveId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_pp: Option<u8>,
}

impl KnownMove {
    pub fn new(move_id: impl Into<MoveId>) -> Self {
        Self {
            move_id: move_id.into(),
            current_pp: None,
        }
    }

    pub fn with_pp(move_id: impl Into<MoveId>, current_pp: u8) -> Self {
        Self {
            move_id: move_id.into(),
            current_pp: Some(current_pp),
        }
    }
}

/// Immutable view of a creature as loaded from the creature records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub species: String,
    /// Level (1-100)
    #[serde(deserialize_with = "level_in_range")]
    pub level: u8,
    #[serde(default)]
    pub types: Vec<Type>,
    pub stats: CombatStats,
    pub max_hp: u32,
    /// HP carried into battle; `None` means full health
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_hp: Option<u32>,
    pub moves: Vec<KnownMove>,
}

impl CreatureSnapshot {
    pub fn new(id: impl Into<CreatureId>, species: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            species: species.into(),
            level: level.clamp(1, 100),
            types: Vec::new(),
            stats: CombatStats::default(),
            max_hp: 1,
            current_hp: None,
            moves: Vec::new(),
        }
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = Type>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn with_current_hp(mut self, current_hp: u32) -> Self {
        self.current_hp = Some(current_hp);
        self
    }

    pub fn with_move(mut self, known: KnownMove) -> Self {
        self.moves.push(known);
        self
    }

    /// HP the creature starts the battle with, clamped to `[0, max_hp]`
    pub fn starting_hp(&self) -> u32 {
        self.current_hp.unwrap_or(self.max_hp).min(self.max_hp)
    }
}

fn level_in_range<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    u8::deserialize(deserializer).map(|level| level.clamp(1, 100))
}
