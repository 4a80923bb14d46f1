//! Server-authoritative engine for one-on-one creature battles.
//!
//! # Overview
//!
//! `arena-battle` sits between `arena-protocol` (wire format) and the client:
//!
//! ```text
//! arena-protocol (wire format)
//!        │
//!        ▼
//! arena-battle (domain types + engine) ← THIS CRATE
//!        │
//!        └─> arena-client (state machine driving a session)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Type`] - Elemental types with the effectiveness chart
//! - [`MoveDefinition`] - Read-only move reference data
//! - [`CreatureSnapshot`] - A creature as loaded from the creature records
//!
//! ## Engine
//! - [`BattleEngine`] - Starts battles, resolves turns, ends and settles sessions
//! - [`BattleServer`] - Answers transport requests using an engine
//! - [`resolve_attack`] - The damage resolver, usable on its own
//!
//! # Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use arena_battle::{BattleEngine, InMemoryCatalog};
//! use arena_protocol::BattleType;
//!
//! let catalog = InMemoryCatalog::from_json(include_str!("catalog.json"))?;
//! let engine = BattleEngine::new(Arc::new(catalog));
//!
//! let battle = engine.start_battle(
//!     "player-1".into(),
//!     &"starter-1".into(),
//!     &"wild-7".into(),
//!     BattleType::Wild,
//! )?;
//!
//! let turn = engine.use_move(&battle.battle_id, &"starter-1".into(), &"ember".into())?;
//! println!("{}", turn.message());
//! ```

pub mod catalog;
pub mod engine;
pub mod query;
pub mod rng;
pub mod rules;
pub mod server;
pub mod types;

pub use catalog::{CatalogError, CreatureLookup, InMemoryCatalog, MoveCatalog};
pub use engine::{
    base_damage, resolve_attack, AttackReport, AttackResult, BattleEngine, BattleError,
    BattleEvent, BattleResult, BattleSettlement, EndSummary, Side, TurnOutcome,
};
pub use rng::{Chance, OsRngProvider, RandomSource, RngProvider, SeededRngProvider};
pub use rules::{BattleRules, EnemyStrategy};
pub use server::BattleServer;
pub use types::{
    CombatStats, CreatureSnapshot, KnownMove, MoveCategory, MoveDefinition, Type, TypeChart,
    TypeMatchups, TYPE_CHART,
};

#[cfg(any(test, feature = "test-util"))]
pub use rng::{ScriptedRng, ScriptedRngProvider};

// Re-export commonly used protocol types
pub use arena_protocol::{BattleId, BattleType, CreatureId, MoveId, Outcome, Phase, PlayerId};
