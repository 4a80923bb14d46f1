//! Hit, critical, type effectiveness and damage for a single attack
//!
//! Rolls are drawn in a fixed order so a scripted random source can force
//! any result:
//!
//! 1. accuracy: `next_below(100) < accuracy` (skipped for status moves)
//! 2. critical: one [`Chance`](crate::rng::Chance) roll, only after a hit
//!
//! Status moves consume no random values at all.

use arena_protocol::Effectiveness;

use super::session::Combatant;
use crate::rng::RandomSource;
use crate::rules::BattleRules;
use crate::types::{MoveDefinition, TypeMatchups};

/// Result of resolving one move against one defender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    pub hit: bool,
    pub critical: bool,
    pub effectiveness: Effectiveness,
    /// HP the defender will lose; never more than it has
    pub damage: u32,
}

impl AttackResult {
    fn no_damage(hit: bool) -> Self {
        Self {
            hit,
            critical: false,
            effectiveness: Effectiveness::Normal,
            damage: 0,
        }
    }
}

/// `floor(((2 * level / 5 + 2) * power * attack / defense) / 50) + 2`
///
/// Inner arithmetic is real-valued with a single floor. Defense below 1 is
/// treated as 1, and the result saturates at `u32::MAX`.
pub fn base_damage(level: u8, power: u16, attack: u16, defense: u16) -> u32 {
    let level = f64::from(level);
    let power = f64::from(power);
    let attack = f64::from(attack);
    let defense = f64::from(defense.max(1));

    let raw = (2.0 * level / 5.0 + 2.0) * power * attack / defense / 50.0;
    (raw.floor() as u32).saturating_add(2)
}

/// Resolve `definition` used by `attacker` against `defender`
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    definition: &MoveDefinition,
    matchups: &dyn TypeMatchups,
    rules: &BattleRules,
    rng: &mut dyn RandomSource,
) -> AttackResult {
    if definition.is_status() {
        return AttackResult::no_damage(true);
    }
    let (Some(attack), Some(defense)) = (
        attacker.stats().offense_for(definition.category),
        defender.stats().defense_for(definition.category),
    ) else {
        return AttackResult::no_damage(true);
    };

    if rng.next_below(100) >= u32::from(definition.accuracy) {
        return AttackResult::no_damage(false);
    }

    let critical = rules.critical_chance.roll(rng);

    let multiplier = matchups.combined(definition.element, defender.types());
    let effectiveness = Effectiveness::from_multiplier(multiplier);

    let mut damage = f64::from(base_damage(
        attacker.level(),
        definition.power,
        attack,
        defense,
    ));
    damage *= f64::from(multiplier);
    if critical {
        damage *= rules.critical_multiplier;
    }

    let damage = (damage.floor().max(0.0) as u32).min(defender.current_hp());

    AttackResult {
        hit: true,
        critical,
        effectiveness,
        damage,
    }
}
