//! Semantic events emitted while a turn resolves
//!
//! The engine never renders anything; a presentation layer turns these into
//! HP bar animations and battle text. [`BattleEvent::format`] provides the
//! plain text used for the response message.

use arena_protocol::{BattleType, Effectiveness, Outcome};
use serde::{Deserialize, Serialize};

/// Which creature an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted {
        battle_type: BattleType,
        player: String,
        enemy: String,
    },
    MoveUsed {
        side: Side,
        creature: String,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        creature: String,
    },
    CriticalHit {
        side: Side,
    },
    Effectiveness {
        effectiveness: Effectiveness,
    },
    DamageDealt {
        target: Side,
        creature: String,
        damage: u32,
        remaining_hp: u32,
    },
    NoMovesLeft {
        side: Side,
        creature: String,
    },
    CreatureFainted {
        side: Side,
        creature: String,
    },
    BattleEnded {
        outcome: Outcome,
    },
}

impl BattleEvent {
    /// Battle text for the event. Returns None for silent events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted {
                battle_type,
                player,
                enemy,
            } => Some(match battle_type {
                BattleType::Wild => format!("A wild {} appeared! Go, {}!", enemy, player),
                BattleType::Trainer => {
                    format!("The trainer sent out {}! Go, {}!", enemy, player)
                }
            }),
            BattleEvent::MoveUsed {
                side,
                creature,
                move_name,
            } => Some(format!("{} used {}!", Self::label(*side, creature), move_name)),
            BattleEvent::MoveMissed { side, creature } => {
                Some(format!("{}'s attack missed!", Self::label(*side, creature)))
            }
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::Effectiveness { effectiveness } => {
                effectiveness.message().map(str::to_string)
            }
            // HP bars show the damage
            BattleEvent::DamageDealt { .. } => None,
            BattleEvent::NoMovesLeft { side, creature } => Some(format!(
                "{} has no moves left!",
                Self::label(*side, creature)
            )),
            BattleEvent::CreatureFainted { side, creature } => {
                Some(format!("{} fainted!", Self::label(*side, creature)))
            }
            BattleEvent::BattleEnded { outcome } => Some(
                match outcome {
                    Outcome::PlayerWon => "You won the battle!",
                    Outcome::EnemyWon => "You lost the battle...",
                    Outcome::Draw => "The battle ended in a draw.",
                    Outcome::PlayerFled => "Got away safely!",
                }
                .to_string(),
            ),
        }
    }

    fn label(side: Side, creature: &str) -> String {
        match side {
            Side::Player => creature.to_string(),
            Side::Enemy => format!("The opposing {}", creature),
        }
    }
}

/// Join the visible lines of a sequence of events
pub fn narrate(events: &[BattleEvent]) -> String {
    events
        .iter()
        .filter_map(BattleEvent::format)
        .collect::<Vec<_>>()
        .join("\n")
}
