//! In-memory registry of battle sessions
//!
//! The map lock is held only long enough to find, insert or remove a slot.
//! Everything that reads and then mutates a session runs under that
//! session's own mutex, so two requests for the same battle never
//! interleave while requests for different battles never wait on each
//! other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use arena_protocol::BattleId;

use super::session::BattleSession;
use crate::rng::RandomSource;

/// A session together with the random source its turns draw from
pub(crate) struct SessionSlot {
    pub session: BattleSession,
    pub rng: Box<dyn RandomSource>,
}

pub(crate) type SharedSlot = Arc<Mutex<SessionSlot>>;

#[derive(Default)]
pub(crate) struct SessionStore {
    sessions: RwLock<HashMap<BattleId, SharedSlot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: BattleSession, rng: Box<dyn RandomSource>) -> SharedSlot {
        let battle_id = session.battle_id();
        let slot = Arc::new(Mutex::new(SessionSlot { session, rng }));
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(battle_id, Arc::clone(&slot));
        slot
    }

    pub fn get(&self, battle_id: &BattleId) -> Option<SharedSlot> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(battle_id)
            .cloned()
    }

    pub fn remove(&self, battle_id: &BattleId) -> Option<SharedSlot> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(battle_id)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn ids(&self) -> Vec<BattleId> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// Drop every ended session; returns how many were removed
    pub fn prune_ended(&self) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, slot| !lock(slot).session.is_ended());
        before - sessions.len()
    }
}

/// Lock a session slot, recovering from a panic in another holder
pub(crate) fn lock(slot: &SharedSlot) -> MutexGuard<'_, SessionSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
