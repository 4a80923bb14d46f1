//! Resolution of a single turn
//!
//! A turn is the player's move followed immediately by the opponent's
//! counter-attack. There is no separate enemy phase: the counter runs inside
//! the same resolution, and only while the opponent is still standing.

use arena_protocol::{
    ActionSummary, BattleId, BattleStatus, CreatureId, Effectiveness, MoveId, MoveView, Outcome,
    Phase, TurnResult, Winner,
};
use tracing::debug;

use super::damage::resolve_attack;
use super::error::{BattleError, BattleResult};
use super::event::{narrate, BattleEvent, Side};
use super::session::{BattleSession, Combatant};
use super::store::SessionSlot;
use crate::query::strongest_move;
use crate::rng::RandomSource;
use crate::rules::{BattleRules, EnemyStrategy};
use crate::types::{MoveDefinition, TypeMatchups};

/// What one side did during the turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub side: Side,
    pub move_id: MoveId,
    pub move_name: String,
    pub hit: bool,
    pub critical: bool,
    pub effectiveness: Effectiveness,
    pub damage: u32,
}

impl AttackReport {
    pub fn summary(&self) -> ActionSummary {
        ActionSummary {
            move_id: self.move_id.clone(),
            move_name: self.move_name.clone(),
            hit: self.hit,
            critical: self.critical,
            effectiveness: self.effectiveness,
            damage: self.damage,
        }
    }
}

/// Immutable result of one resolved turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub battle_id: BattleId,
    /// Turn counter after resolution
    pub turn: u32,
    pub player_action: AttackReport,
    pub enemy_action: Option<AttackReport>,
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    pub events: Vec<BattleEvent>,
    pub player_moves: Vec<MoveView>,
}

impl TurnOutcome {
    pub fn battle_status(&self) -> BattleStatus {
        self.phase.into()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.outcome.and_then(Outcome::winner)
    }

    pub fn message(&self) -> String {
        narrate(&self.events)
    }

    pub fn to_turn_result(&self) -> TurnResult {
        TurnResult {
            move_id: self.player_action.move_id.clone(),
            move_name: self.player_action.move_name.clone(),
            hit: self.player_action.hit,
            critical: self.player_action.critical,
            effectiveness: self.player_action.effectiveness,
            damage_dealt: self.player_action.damage,
            attacker_hp: self.player_hp,
            target_hp: self.enemy_hp,
            battle_status: self.battle_status(),
            winner: self.winner(),
            outcome: self.outcome,
            turn: self.turn,
            enemy_action: self.enemy_action.as_ref().map(AttackReport::summary),
            player_moves: self.player_moves.clone(),
        }
    }
}

/// Shared, read-only inputs for resolving turns
pub(crate) struct TurnContext<'a> {
    pub matchups: &'a dyn TypeMatchups,
    pub rules: &'a BattleRules,
}

/// Validate and resolve the player's move, then the counter-attack
///
/// Every rejection happens before the session is touched, and a panic during
/// resolution leaves the stored session as it was.
pub(crate) fn execute_turn(
    slot: &mut SessionSlot,
    actor: &CreatureId,
    move_id: &MoveId,
    ctx: &TurnContext<'_>,
) -> BattleResult<TurnOutcome> {
    let SessionSlot { session, rng } = slot;
    let rng: &mut dyn RandomSource = &mut **rng;

    if session.is_ended() {
        return Err(BattleError::BattleAlreadyEnded(session.battle_id()));
    }
    if session.player().id() != actor {
        return Err(BattleError::InvalidActor {
            actor: actor.clone(),
        });
    }
    let Some(chosen) = session.player().move_slot(move_id) else {
        return Err(BattleError::MoveNotKnown {
            creature: session.player().name().to_string(),
            move_id: move_id.clone(),
        });
    };
    if !chosen.has_pp() {
        return Err(BattleError::MoveNotAvailable {
            move_id: move_id.clone(),
            move_name: chosen.definition.name.clone(),
        });
    }
    let player_move = chosen.definition.clone();

    // Resolved on a copy; the stored session only changes once the turn completes
    let stored = session;
    let mut working = stored.clone();
    let session = &mut working;

    session.advance(Phase::ResolvingTurn)?;
    session.player_mut().spend_pp(move_id);

    let mut events = Vec::new();
    let player_action = attack(session, Side::Player, &player_move, ctx, rng, &mut events);

    let mut enemy_action = None;
    if !session.enemy().is_fainted() {
        match choose_enemy_move(session.enemy(), session.player(), ctx, rng) {
            Some(enemy_move) => {
                session.enemy_mut().spend_pp(&enemy_move.id);
                let report = attack(session, Side::Enemy, &enemy_move, ctx, rng, &mut events);
                enemy_action = Some(report);
            }
            None => events.push(BattleEvent::NoMovesLeft {
                side: Side::Enemy,
                creature: session.enemy().name().to_string(),
            }),
        }
    }

    let outcome = if session.enemy().is_fainted() {
        Some(Outcome::PlayerWon)
    } else if session.player().is_fainted() {
        Some(Outcome::EnemyWon)
    } else {
        None
    };

    session.increment_turn();
    match outcome {
        Some(outcome) => {
            session.finish(outcome)?;
            events.push(BattleEvent::BattleEnded { outcome });
        }
        None => session.advance(Phase::SelectingCommand)?,
    }

    let resolved = TurnOutcome {
        battle_id: session.battle_id(),
        turn: session.turn(),
        player_action,
        enemy_action,
        player_hp: session.player().current_hp(),
        enemy_hp: session.enemy().current_hp(),
        phase: session.phase(),
        outcome: session.outcome(),
        events,
        player_moves: session.player().move_views(),
    };
    *stored = working;
    Ok(resolved)
}

/// Resolve one attack by `side` and apply its damage to the other creature
fn attack(
    session: &mut BattleSession,
    side: Side,
    definition: &MoveDefinition,
    ctx: &TurnContext<'_>,
    rng: &mut dyn RandomSource,
    events: &mut Vec<BattleEvent>,
) -> AttackReport {
    let (attacker, defender) = match side {
        Side::Player => (session.player(), session.enemy()),
        Side::Enemy => (session.enemy(), session.player()),
    };
    let attacker_name = attacker.name().to_string();
    let result = resolve_attack(attacker, defender, definition, ctx.matchups, ctx.rules, rng);

    events.push(BattleEvent::MoveUsed {
        side,
        creature: attacker_name.clone(),
        move_name: definition.name.clone(),
    });

    let target = side.opponent();
    let defender = match target {
        Side::Player => session.player_mut(),
        Side::Enemy => session.enemy_mut(),
    };
    let dealt = defender.take_damage(result.damage);

    debug!(
        battle_id = %session.battle_id(),
        side = ?side,
        move_id = %definition.id,
        hit = result.hit,
        critical = result.critical,
        damage = dealt,
        "Resolved attack"
    );

    let defender = match target {
        Side::Player => session.player(),
        Side::Enemy => session.enemy(),
    };
    if !result.hit {
        events.push(BattleEvent::MoveMissed {
            side,
            creature: attacker_name,
        });
    } else if !definition.is_status() {
        if result.critical {
            events.push(BattleEvent::CriticalHit { side });
        }
        events.push(BattleEvent::Effectiveness {
            effectiveness: result.effectiveness,
        });
        if dealt > 0 {
            events.push(BattleEvent::DamageDealt {
                target,
                creature: defender.name().to_string(),
                damage: dealt,
                remaining_hp: defender.current_hp(),
            });
        }
        if defender.is_fainted() {
            events.push(BattleEvent::CreatureFainted {
                side: target,
                creature: defender.name().to_string(),
            });
        }
    }

    AttackReport {
        side,
        move_id: definition.id.clone(),
        move_name: definition.name.clone(),
        hit: result.hit,
        critical: result.critical,
        effectiveness: result.effectiveness,
        damage: dealt,
    }
}

/// Pick the opponent's counter-attack among moves with PP left
///
/// `Random` draws a value only when there is more than one candidate.
fn choose_enemy_move(
    enemy: &Combatant,
    player: &Combatant,
    ctx: &TurnContext<'_>,
    rng: &mut dyn RandomSource,
) -> Option<MoveDefinition> {
    let usable: Vec<_> = enemy.usable_moves().collect();
    let chosen = match ctx.rules.enemy_strategy {
        _ if usable.len() <= 1 => usable.first().copied(),
        EnemyStrategy::FirstAvailable => usable.first().copied(),
        EnemyStrategy::Random => {
            let index = rng.next_below(usable.len() as u32) as usize;
            usable.get(index).copied()
        }
        EnemyStrategy::StrongestMatchup => {
            strongest_move(usable.iter().copied(), player.types(), ctx.matchups)
        }
    };
    chosen.map(|slot| slot.definition.clone())
}
