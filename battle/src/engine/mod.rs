//! Server-side battle engine
//!
//! [`BattleEngine`] is the only entry point that mutates sessions. Each
//! operation validates first and mutates second, so a rejected request
//! leaves the session exactly as it was.

mod damage;
mod error;
mod event;
mod service;
mod session;
mod store;
mod turn;


pub use damage::{base_damage, resolve_attack, AttackResult};
pub use error::{BattleError, BattleResult};
pub use event::{narrate, BattleEvent, Side};
pub use service::{BattleEngine, EndSummary};
pub use session::{BattleSession, BattleSettlement, Combatant, CreatureRecordUpdate, MoveSlot};
pub use turn::{AttackReport, TurnOutcome};
