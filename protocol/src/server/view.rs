//! Read views of a battle session

use serde::{Deserialize, Serialize};

use crate::battle::{BattleType, Outcome, Phase};
use crate::ids::{BattleId, CreatureId, MoveId, PlayerId};

/// A known move with its remaining PP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveView {
    pub move_id: MoveId,
    pub name: String,
    /// Element name (e.g. "Fire")
    pub element: String,
    pub power: u16,
    pub accuracy: u8,
    pub current_pp: u8,
    pub max_pp: u8,
}

/// One creature as seen during battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantView {
    pub creature_id: CreatureId,
    pub species: String,
    pub level: u8,
    #[serde(default)]
    pub types: Vec<String>,
    pub current_hp: u32,
    pub max_hp: u32,
    pub moves: Vec<MoveView>,
}

impl CombatantView {
    pub fn move_view(&self, move_id: &MoveId) -> Option<&MoveView> {
        self.moves.iter().find(|m| &m.move_id == move_id)
    }
}

/// Full session state plus both creatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSessionView {
    pub battle_id: BattleId,
    pub player_id: PlayerId,
    pub battle_type: BattleType,
    pub turn: u32,
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub player: CombatantView,
    pub enemy: CombatantView,
}
