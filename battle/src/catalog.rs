//! Read-only lookups for creatures and moves
//!
//! The creature records and the move catalog belong to the surrounding
//! application; the engine only consumes them through [`CreatureLookup`] and
//! [`MoveCatalog`]. [`InMemoryCatalog`] implements both for tests, demos and
//! small embeddings.

use std::collections::HashMap;

use arena_protocol::{CreatureId, MoveId};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{CreatureSnapshot, MoveDefinition};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Creature not found: {0}")]
    CreatureNotFound(CreatureId),

    #[error("Move not found: {0}")]
    MoveNotFound(MoveId),

    #[error("Malformed catalog data: {0}")]
    Malformed(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Resolves a creature identifier to its combat snapshot
pub trait CreatureLookup: Send + Sync {
    fn creature(&self, id: &CreatureId) -> CatalogResult<CreatureSnapshot>;
}

/// Resolves a move identifier to its definition
pub trait MoveCatalog: Send + Sync {
    fn move_definition(&self, id: &MoveId) -> CatalogResult<MoveDefinition>;
}

/// Catalog backed by two hash maps
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    creatures: HashMap<CreatureId, CreatureSnapshot>,
    moves: HashMap<MoveId, MoveDefinition>,
}

#[derive(Deserialize)]
struct CatalogSeed {
    #[serde(default)]
    moves: Vec<MoveDefinition>,
    #[serde(default)]
    creatures: Vec<CreatureSnapshot>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON document of the form `{ "moves": [...], "creatures": [...] }`
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let seed: CatalogSeed =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;

        let mut catalog = Self::new();
        for definition in seed.moves {
            catalog.insert_move(definition);
        }
        for snapshot in seed.creatures {
            catalog.insert_creature(snapshot);
        }
        Ok(catalog)
    }

    pub fn insert_move(&mut self, definition: MoveDefinition) {
        self.moves.insert(definition.id.clone(), definition);
    }

    pub fn insert_creature(&mut self, snapshot: CreatureSnapshot) {
        self.creatures.insert(snapshot.id.clone(), snapshot);
    }

    pub fn with_move(mut self, definition: MoveDefinition) -> Self {
        self.insert_move(definition);
        self
    }

    pub fn with_creature(mut self, snapshot: CreatureSnapshot) -> Self {
        self.insert_creature(snapshot);
        self
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

impl CreatureLookup for InMemoryCatalog {
    fn creature(&self, id: &CreatureId) -> CatalogResult<CreatureSnapshot> {
        self.creatures
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::CreatureNotFound(id.clone()))
    }
}

impl MoveCatalog for InMemoryCatalog {
    fn move_definition(&self, id: &MoveId) -> CatalogResult<MoveDefinition> {
        self.moves
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::MoveNotFound(id.clone()))
    }
}
