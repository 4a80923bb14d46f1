//! Tunable battle policy

use serde::{Deserialize, Serialize};

use crate::rng::Chance;

/// How the opponent picks its counter-attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyStrategy {
    /// Uniformly among moves with PP left
    #[default]
    Random,
    /// First move (in learned order) with PP left
    FirstAvailable,
    /// Move with the highest expected damage against the player's types
    StrongestMatchup,
}

/// Policy constants for damage resolution and the opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    pub critical_chance: Chance,
    pub critical_multiplier: f64,
    pub enemy_strategy: EnemyStrategy,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            critical_chance: Chance::new(1, 16),
            critical_multiplier: 1.5,
            enemy_strategy: EnemyStrategy::Random,
        }
    }
}

impl BattleRules {
    /// Parse rules from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_critical_chance(mut self, chance: Chance) -> Self {
        self.critical_chance = chance;
        self
    }

    pub fn with_enemy_strategy(mut self, strategy: EnemyStrategy) -> Self {
        self.enemy_strategy = strategy;
        self
    }
}
