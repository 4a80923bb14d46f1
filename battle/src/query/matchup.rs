//! Type matchup helpers for picking moves

use crate::engine::MoveSlot;
use crate::types::{MoveDefinition, Type, TypeMatchups};

/// Base power scaled by the combined multiplier against `defender_types`
///
/// Status moves score 0.
pub fn expected_power(
    definition: &MoveDefinition,
    defender_types: &[Type],
    matchups: &dyn TypeMatchups,
) -> f32 {
    if definition.is_status() {
        return 0.0;
    }
    f32::from(definition.power) * matchups.combined(definition.element, defender_types)
}

/// Move with the highest expected power; ties go to the earliest slot
pub fn strongest_move<'a>(
    slots: impl IntoIterator<Item = &'a MoveSlot>,
    defender_types: &[Type],
    matchups: &dyn TypeMatchups,
) -> Option<&'a MoveSlot> {
    let mut best: Option<(&MoveSlot, f32)> = None;
    for slot in slots {
        let score = expected_power(&slot.definition, defender_types, matchups);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((slot, score)),
        }
    }
    best.map(|(slot, _)| slot)
}
