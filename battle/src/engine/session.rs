//! Authoritative state of one battle

use arena_protocol::{
    BattleId, BattleSessionView, BattleType, CombatantView, CreatureId, MoveId, MoveView, Outcome,
    Phase, PlayerId,
};
use serde::{Deserialize, Serialize};

use super::error::{BattleError, BattleResult};
use crate::types::{CombatStats, CreatureSnapshot, KnownMove, MoveDefinition, Type};

/// A known move resolved against the catalog, with its remaining PP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSlot {
    pub definition: MoveDefinition,
    pub current_pp: u8,
}

impl MoveSlot {
    pub fn id(&self) -> &MoveId {
        &self.definition.id
    }

    pub fn has_pp(&self) -> bool {
        self.current_pp > 0
    }

    pub fn view(&self) -> MoveView {
        MoveView {
            move_id: self.definition.id.clone(),
            name: self.definition.name.clone(),
            element: self.definition.element.as_str().to_string(),
            power: self.definition.power,
            accuracy: self.definition.accuracy,
            current_pp: self.current_pp,
            max_pp: self.definition.max_pp,
        }
    }
}

/// One creature inside a battle: its snapshot plus mutable HP and PP
///
/// HP and PP can only change through [`Combatant::take_damage`] and
/// [`Combatant::spend_pp`], both of which saturate, so neither can leave
/// `[0, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    snapshot: CreatureSnapshot,
    current_hp: u32,
    moves: Vec<MoveSlot>,
}

impl Combatant {
    /// Pair the snapshot's known moves with their definitions (in the same order)
    pub fn new(snapshot: CreatureSnapshot, definitions: Vec<MoveDefinition>) -> Self {
        let moves = snapshot
            .moves
            .iter()
            .zip(definitions)
            .map(|(known, definition)| {
                let current_pp = known
                    .current_pp
                    .unwrap_or(definition.max_pp)
                    .min(definition.max_pp);
                MoveSlot {
                    definition,
                    current_pp,
                }
            })
            .collect();

        Self {
            current_hp: snapshot.starting_hp(),
            snapshot,
            moves,
        }
    }

    pub fn id(&self) -> &CreatureId {
        &self.snapshot.id
    }

    pub fn name(&self) -> &str {
        &self.snapshot.species
    }

    pub fn level(&self) -> u8 {
        self.snapshot.level
    }

    pub fn types(&self) -> &[Type] {
        &self.snapshot.types
    }

    pub fn stats(&self) -> &CombatStats {
        &self.snapshot.stats
    }

    pub fn max_hp(&self) -> u32 {
        self.snapshot.max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn moves(&self) -> &[MoveSlot] {
        &self.moves
    }

    pub fn move_slot(&self, move_id: &MoveId) -> Option<&MoveSlot> {
        self.moves.iter().find(|slot| slot.id() == move_id)
    }

    /// Moves that still have PP, in learned order
    pub fn usable_moves(&self) -> impl Iterator<Item = &MoveSlot> {
        self.moves.iter().filter(|slot| slot.has_pp())
    }

    /// Remove up to `amount` HP; returns the HP actually removed
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Spend one PP of `move_id`. Returns false if the move is unknown or already at 0.
    pub fn spend_pp(&mut self, move_id: &MoveId) -> bool {
        match self.moves.iter_mut().find(|slot| slot.id() == move_id) {
            Some(slot) if slot.current_pp > 0 => {
                slot.current_pp -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn move_views(&self) -> Vec<MoveView> {
        self.moves.iter().map(MoveSlot::view).collect()
    }

    pub fn view(&self) -> CombatantView {
        CombatantView {
            creature_id: self.snapshot.id.clone(),
            species: self.snapshot.species.clone(),
            level: self.snapshot.level,
            types: self
                .snapshot
                .types
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            current_hp: self.current_hp,
            max_hp: self.snapshot.max_hp,
            moves: self.move_views(),
        }
    }

    /// HP and PP to write back to the creature's permanent record
    pub fn record_update(&self) -> CreatureRecordUpdate {
        CreatureRecordUpdate {
            creature_id: self.snapshot.id.clone(),
            current_hp: self.current_hp,
            moves: self
                .moves
                .iter()
                .map(|slot| KnownMove::with_pp(slot.id().clone(), slot.current_pp))
                .collect(),
        }
    }
}

/// One player creature against one opponent creature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSession {
    battle_id: BattleId,
    player_id: PlayerId,
    battle_type: BattleType,
    player: Combatant,
    enemy: Combatant,
    turn: u32,
    phase: Phase,
    outcome: Option<Outcome>,
}

impl BattleSession {
    pub fn new(
        player_id: PlayerId,
        battle_type: BattleType,
        player: Combatant,
        enemy: Combatant,
    ) -> Self {
        Self {
            battle_id: BattleId::new(),
            player_id,
            battle_type,
            player,
            enemy,
            turn: 1,
            phase: Phase::SelectingCommand,
            outcome: None,
        }
    }

    pub fn battle_id(&self) -> BattleId {
        self.battle_id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn battle_type(&self) -> BattleType {
        self.battle_type
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub(crate) fn player_mut(&mut self) -> &mut Combatant {
        &mut self.player
    }

    pub(crate) fn enemy_mut(&mut self) -> &mut Combatant {
        &mut self.enemy
    }

    /// Move to `next`, rejecting anything the phase machine does not allow
    pub(crate) fn advance(&mut self, next: Phase) -> BattleResult<()> {
        if !self.phase.can_advance_to(next) {
            return Err(BattleError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Enter `Ended` with the given outcome
    pub(crate) fn finish(&mut self, outcome: Outcome) -> BattleResult<()> {
        self.advance(Phase::Ended)?;
        self.outcome = Some(outcome);
        Ok(())
    }

    pub(crate) fn increment_turn(&mut self) {
        self.turn += 1;
    }

    pub fn view(&self) -> BattleSessionView {
        BattleSessionView {
            battle_id: self.battle_id,
            player_id: self.player_id.clone(),
            battle_type: self.battle_type,
            turn: self.turn,
            phase: self.phase,
            outcome: self.outcome,
            player: self.player.view(),
            enemy: self.enemy.view(),
        }
    }

    /// Final HP/PP of both creatures. None until the battle has ended.
    pub fn settlement(&self) -> Option<BattleSettlement> {
        let outcome = self.outcome?;
        Some(BattleSettlement {
            battle_id: self.battle_id,
            player_id: self.player_id.clone(),
            outcome,
            player: self.player.record_update(),
            enemy: self.enemy.record_update(),
        })
    }
}

/// HP and PP of one creature once its battle is over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecordUpdate {
    pub creature_id: CreatureId,
    pub current_hp: u32,
    pub moves: Vec<KnownMove>,
}

/// Result of a finished battle, handed to whoever persists creature records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSettlement {
    pub battle_id: BattleId,
    pub player_id: PlayerId,
    pub outcome: Outcome,
    pub player: CreatureRecordUpdate,
    pub enemy: CreatureRecordUpdate,
}
