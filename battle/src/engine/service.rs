use std::sync::Arc;

use arena_protocol::{
    BattleId, BattleSessionView, BattleType, CreatureId, EndReason, MoveId, Outcome, PlayerId,
};
use tracing::{debug, info, warn};

use super::error::{BattleError, BattleResult};
use super::session::{BattleSession, BattleSettlement, Combatant};
use super::store::{lock, SessionStore};
use super::turn::{execute_turn, TurnContext, TurnOutcome};
use crate::catalog::{CreatureLookup, MoveCatalog};
use crate::rng::{OsRngProvider, RngProvider};
use crate::rules::BattleRules;
use crate::types::{CreatureSnapshot, MoveDefinition, TypeChart, TypeMatchups};

/// Result of an end request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndSummary {
    pub outcome: Outcome,
    /// The battle had already ended before this request; nothing changed
    pub already_ended: bool,
}

impl EndSummary {
    pub fn message(&self) -> &'static str {
        match (self.already_ended, self.outcome) {
            (true, _) => "The battle is already over.",
            (false, Outcome::PlayerFled) => "Got away safely!",
            (false, Outcome::Draw) => "The battle ended in a draw.",
            (false, _) => "The battle has ended.",
        }
    }
}

/// Server-authoritative battle engine
///
/// Owns every active session plus the read-only collaborators turns are
/// resolved against. Cheap to share behind an `Arc`; all methods take
/// `&self`.
pub struct BattleEngine {
    store: SessionStore,
    creatures: Arc<dyn CreatureLookup>,
    moves: Arc<dyn MoveCatalog>,
    matchups: Arc<dyn TypeMatchups>,
    rules: BattleRules,
    rng: Arc<dyn RngProvider>,
}

impl BattleEngine {
    /// Engine over a catalog that provides both creatures and moves
    pub fn new<C>(catalog: Arc<C>) -> Self
    where
        C: CreatureLookup + MoveCatalog + 'static,
    {
        Self::with_lookups(catalog.clone(), catalog)
    }

    pub fn with_lookups(creatures: Arc<dyn CreatureLookup>, moves: Arc<dyn MoveCatalog>) -> Self {
        Self {
            store: SessionStore::new(),
            creatures,
            moves,
            matchups: Arc::new(TypeChart::default()),
            rules: BattleRules::default(),
            rng: Arc::new(OsRngProvider),
        }
    }

    pub fn with_rules(mut self, rules: BattleRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_matchups(mut self, matchups: Arc<dyn TypeMatchups>) -> Self {
        self.matchups = matchups;
        self
    }

    pub fn with_rng_provider(mut self, rng: Arc<dyn RngProvider>) -> Self {
        self.rng = rng;
        self
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    /// Create a new session from fresh snapshots of both creatures
    pub fn start_battle(
        &self,
        player_id: PlayerId,
        player_creature_id: &CreatureId,
        enemy_creature_id: &CreatureId,
        battle_type: BattleType,
    ) -> BattleResult<BattleSessionView> {
        let player = self.load_combatant(player_creature_id)?;
        let enemy = self.load_combatant(enemy_creature_id)?;

        let session = BattleSession::new(player_id, battle_type, player, enemy);
        let view = session.view();
        self.store.insert(session, self.rng.session_rng());

        info!(
            battle_id = %view.battle_id,
            player_id = %view.player_id,
            player = %view.player.species,
            enemy = %view.enemy.species,
            battle_type = battle_type.as_str(),
            "Battle started"
        );
        Ok(view)
    }

    /// Resolve one turn: the player's move and, if the opponent survives, its counter
    pub fn use_move(
        &self,
        battle_id: &BattleId,
        acting_creature_id: &CreatureId,
        move_id: &MoveId,
    ) -> BattleResult<TurnOutcome> {
        let slot = self
            .store
            .get(battle_id)
            .ok_or(BattleError::BattleNotFound(*battle_id))?;
        let mut slot = lock(&slot);

        let ctx = TurnContext {
            matchups: self.matchups.as_ref(),
            rules: &self.rules,
        };
        let result = execute_turn(&mut slot, acting_creature_id, move_id, &ctx);

        match &result {
            Ok(outcome) => {
                debug!(
                    battle_id = %battle_id,
                    turn = outcome.turn,
                    player_hp = outcome.player_hp,
                    enemy_hp = outcome.enemy_hp,
                    "Turn resolved"
                );
                if let Some(ended) = outcome.outcome {
                    info!(battle_id = %battle_id, outcome = ?ended, "Battle ended");
                }
            }
            Err(e) => warn!(battle_id = %battle_id, move_id = %move_id, error = %e, "Move rejected"),
        }
        result
    }

    /// Force the battle to end. Ending an already ended battle is a no-op success.
    pub fn end_battle(
        &self,
        battle_id: &BattleId,
        reason: Option<EndReason>,
    ) -> BattleResult<EndSummary> {
        let slot = self
            .store
            .get(battle_id)
            .ok_or(BattleError::BattleNotFound(*battle_id))?;
        let mut slot = lock(&slot);

        if let Some(outcome) = slot.session.outcome() {
            debug!(battle_id = %battle_id, "End requested for an ended battle");
            return Ok(EndSummary {
                outcome,
                already_ended: true,
            });
        }

        let outcome = reason.unwrap_or_default().outcome();
        slot.session.finish(outcome)?;
        info!(battle_id = %battle_id, outcome = ?outcome, "Battle ended");

        Ok(EndSummary {
            outcome,
            already_ended: false,
        })
    }

    /// Current state of a session
    pub fn battle(&self, battle_id: &BattleId) -> BattleResult<BattleSessionView> {
        let slot = self
            .store
            .get(battle_id)
            .ok_or(BattleError::BattleNotFound(*battle_id))?;
        let view = lock(&slot).session.view();
        Ok(view)
    }

    /// Take the final HP/PP of an ended battle and forget the session
    pub fn settle(&self, battle_id: &BattleId) -> BattleResult<BattleSettlement> {
        let slot = self
            .store
            .get(battle_id)
            .ok_or(BattleError::BattleNotFound(*battle_id))?;
        let settlement = lock(&slot)
            .session
            .settlement()
            .ok_or(BattleError::BattleInProgress(*battle_id))?;

        self.store.remove(battle_id);
        info!(battle_id = %battle_id, outcome = ?settlement.outcome, "Battle settled");
        Ok(settlement)
    }

    /// Ids of every session still held, ended or not
    pub fn active_battles(&self) -> Vec<BattleId> {
        self.store.ids()
    }

    pub fn battle_count(&self) -> usize {
        self.store.len()
    }

    /// Forget every ended session; returns how many were dropped
    pub fn prune_ended(&self) -> usize {
        let pruned = self.store.prune_ended();
        if pruned > 0 {
            debug!(pruned, "Pruned ended battles");
        }
        pruned
    }

    fn load_combatant(&self, creature_id: &CreatureId) -> BattleResult<Combatant> {
        let snapshot: CreatureSnapshot = self.creatures.creature(creature_id)?;
        let definitions = snapshot
            .moves
            .iter()
            .map(|known| self.moves.move_definition(&known.move_id))
            .collect::<Result<Vec<MoveDefinition>, _>>()?;
        Ok(Combatant::new(snapshot, definitions))
    }
}
