//! Elemental types and the matchup chart

use serde::{Deserialize, Serialize};

/// Elemental type of a creature or a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
}

impl Type {
    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source of type matchup multipliers, keyed by (attacking, defending)
pub trait TypeMatchups: Send + Sync {
    fn multiplier(&self, attacking: Type, defending: Type) -> f32;

    /// Combined multiplier against every defending type (product)
    fn combined(&self, attacking: Type, defenders: &[Type]) -> f32 {
        defenders
            .iter()
            .map(|d| self.multiplier(attacking, *d))
            .product()
    }
}

/// Configurable matchup table, defaulting to [`TYPE_CHART`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeChart {
    table: [[f32; 18]; 18],
}

impl TypeChart {
    /// A chart where every matchup is neutral
    pub fn neutral() -> Self {
        Self {
            table: [[1.0; 18]; 18],
        }
    }

    /// Override a single matchup
    pub fn set(&mut self, attacking: Type, defending: Type, multiplier: f32) {
        self.table[attacking as usize][defending as usize] = multiplier.max(0.0);
    }

    /// Builder-style override
    pub fn with(mut self, attacking: Type, defending: Type, multiplier: f32) -> Self {
        self.set(attacking, defending, multiplier);
        self
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self { table: TYPE_CHART }
    }
}

impl TypeMatchups for TypeChart {
    fn multiplier(&self, attacking: Type, defending: Type) -> f32 {
        self.table[attacking as usize][defending as usize]
    }
}

/// 18x18 type effectiveness chart
/// Row = attacking type, Column = defending type
/// Values: 0.0 = immune, 0.5 = not very effective, 1.0 = neutral, 2.0 = super effective
///
/// Order: Normal, Fire, Water, Electric, Grass, Ice, Fighting, Poison, Ground,
///        Flying, Psychic, Bug, Rock, Ghost, Dragon, Dark, Steel, Fairy
#[rustfmt::skip]
pub static TYPE_CHART: [[f32; 18]; 18] = [
    // Normal
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0, 1.0, 1.0, 0.5, 1.0],
    // Fire
    [1.0, 0.5, 0.5, 1.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 0.5, 1.0, 2.0, 1.0],
    // Water
    [1.0, 2.0, 0.5, 1.0, 0.5, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 1.0, 1.0],
    // Electric
    [1.0, 1.0, 2.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0],
    // Grass
    [1.0, 0.5, 2.0, 1.0, 0.5, 1.0, 1.0, 0.5, 2.0, 0.5, 1.0, 0.5, 2.0, 1.0, 0.5, 1.0, 0.5, 1.0],
    // Ice
    [1.0, 0.5, 0.5, 1.0, 2.0, 0.5, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0],
    // Fighting
    [2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 0.5, 0.5, 0.5, 2.0, 0.0, 1.0, 2.0, 2.0, 0.5],
    // Poison
    [1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 0.0, 2.0],
    // Ground
    [1.0, 2.0, 1.0, 2.0, 0.5, 1.0, 1.0, 2.0, 1.0, 0.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0],
    // Flying
    [1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 0.5, 1.0],
    // Psychic
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 0.0, 0.5, 1.0],
    // Bug
    [1.0, 0.5, 1.0, 1.0, 2.0, 1.0, 0.5, 0.5, 1.0, 0.5, 2.0, 1.0, 1.0, 0.5, 1.0, 2.0, 0.5, 0.5],
    // Rock
    [1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 0.5, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0],
    // Ghost
    [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 1.0],
    // Dragon
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 0.0],
    // Dark
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 0.5],
    // Steel
    [1.0, 0.5, 0.5, 0.5, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 0.5, 2.0],
    // Fairy
    [1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 0.5, 1.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_matches_standard_matchups() {
        let chart = TypeChart::default();
        assert_eq!(chart.multiplier(Type::Fire, Type::Grass), 2.0);
        assert_eq!(chart.multiplier(Type::Water, Type::Fire), 2.0);
        assert_eq!(chart.multiplier(Type::Fire, Type::Water), 0.5);
        assert_eq!(chart.multiplier(Type::Electric, Type::Ground), 0.0);
        assert_eq!(chart.multiplier(Type::Normal, Type::Normal), 1.0);
    }

    #[test]
    fn test_combined_multiplies_dual_types() {
        let chart = TypeChart::default();
        assert_eq!(chart.combined(Type::Fire, &[Type::Grass, Type::Steel]), 4.0);
        assert_eq!(chart.combined(Type::Fire, &[Type::Water, Type::Rock]), 0.25);
        assert_eq!(chart.combined(Type::Ground, &[Type::Flying, Type::Steel]), 0.0);
        // Typeless defender takes neutral damage
        assert_eq!(chart.combined(Type::Fire, &[]), 1.0);
    }

    #[test]
    fn test_chart_overrides() {
        let chart = TypeChart::neutral().with(Type::Water, Type::Fire, 2.0);
        assert_eq!(chart.multiplier(Type::Water, Type::Fire), 2.0);
        assert_eq!(chart.multiplier(Type::Electric, Type::Ground), 1.0);

        let mut clamped = TypeChart::default();
        clamped.set(Type::Normal, Type::Ghost, -3.0);
        assert_eq!(clamped.multiplier(Type::Normal, Type::Ghost), 0.0);
    }
}
