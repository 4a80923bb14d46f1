//! Move reference data

use arena_protocol::MoveId;
use serde::{Deserialize, Serialize};

use super::creature_type::Type;

/// Which stats a move draws on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Read-only move definition from the move catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDefinition {
    pub id: MoveId,
    pub name: String,
    pub element: Type,
    pub category: MoveCategory,
    /// Base power (0 for status moves)
    #[serde(default)]
    pub power: u16,
    /// Hit chance in percent (0-100)
    pub accuracy: u8,
    pub max_pp: u8,
    #[serde(default)]
    pub description: String,
}

impl MoveDefinition {
    pub fn new(
        id: impl Into<MoveId>,
        name: impl Into<String>,
        element: Type,
        category: MoveCategory,
        power: u16,
        accuracy: u8,
        max_pp: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element,
            category,
            power,
            accuracy: accuracy.min(100),
            max_pp,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Status moves (or zero-power moves) never deal damage
    pub fn is_status(&self) -> bool {
        self.category == MoveCategory::Status || self.power == 0
    }
}
