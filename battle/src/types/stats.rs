//! Combat stats

use serde::{Deserialize, Serialize};

use super::moves::MoveCategory;

/// Stats a creature brings into battle (already level-adjusted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
}

impl CombatStats {
    pub fn new(attack: u16, defense: u16, special_attack: u16, special_defense: u16) -> Self {
        Self {
            attack,
            defense,
            special_attack,
            special_defense,
        }
    }

    /// Same value for physical and special stats
    pub fn uniform(attack: u16, defense: u16) -> Self {
        Self::new(attack, defense, attack, defense)
    }

    /// Offensive stat used for a move category (None for status moves)
    pub fn offense_for(&self, category: MoveCategory) -> Option<u16> {
        match category {
            MoveCategory::Physical => Some(self.attack),
            MoveCategory::Special => Some(self.special_attack),
            MoveCategory::Status => None,
        }
    }

    /// Defensive stat used against a move category (None for status moves)
    pub fn defense_for(&self, category: MoveCategory) -> Option<u16> {
        match category {
            MoveCategory::Physical => Some(self.defense),
            MoveCategory::Special => Some(self.special_defense),
            MoveCategory::Status => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_by_category() {
        let stats = CombatStats::new(55, 40, 70, 35);

        assert_eq!(stats.offense_for(MoveCategory::Physical), Some(55));
        assert_eq!(stats.offense_for(MoveCategory::Special), Some(70));
        assert_eq!(stats.offense_for(MoveCategory::Status), None);

        assert_eq!(stats.defense_for(MoveCategory::Physical), Some(40));
        assert_eq!(stats.defense_for(MoveCategory::Special), Some(35));
        assert_eq!(stats.defense_for(MoveCategory::Status), None);
    }

    #[test]
    fn test_uniform_stats() {
        let stats = CombatStats::uniform(55, 40);
        assert_eq!(stats.special_attack, 55);
        assert_eq!(stats.special_defense, 40);
    }
}
