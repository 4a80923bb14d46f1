use arena_protocol::{BattleId, CreatureId, ErrorKind, MoveId, Phase};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Why a battle operation was rejected
///
/// Every variant is raised before any session state is touched, except
/// [`BattleError::InvalidTransition`], which signals a broken invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Creature not found: {0}")]
    CreatureNotFound(CreatureId),

    #[error("Move not found in catalog: {0}")]
    MoveNotFound(MoveId),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Battle not found: {0}")]
    BattleNotFound(BattleId),

    #[error("This battle is already over.")]
    BattleAlreadyEnded(BattleId),

    #[error("This battle is still in progress.")]
    BattleInProgress(BattleId),

    #[error("{actor} is not the creature fighting in this battle.")]
    InvalidActor { actor: CreatureId },

    #[error("{creature} doesn't know that move.")]
    MoveNotKnown { creature: String, move_id: MoveId },

    #[error("{move_name} has no PP left!")]
    MoveNotAvailable { move_id: MoveId, move_name: String },

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
}

impl BattleError {
    /// Wire code reported to the client
    pub fn kind(&self) -> ErrorKind {
        match self {
            BattleError::CreatureNotFound(_) => ErrorKind::CreatureNotFound,
            BattleError::MoveNotFound(_) => ErrorKind::MoveNotFound,
            BattleError::BattleNotFound(_) => ErrorKind::BattleNotFound,
            BattleError::BattleAlreadyEnded(_) => ErrorKind::BattleAlreadyEnded,
            BattleError::InvalidActor { .. } => ErrorKind::InvalidActor,
            BattleError::MoveNotKnown { .. } | BattleError::MoveNotAvailable { .. } => {
                ErrorKind::MoveNotAvailable
            }
            BattleError::CatalogUnavailable(_)
            | BattleError::BattleInProgress(_)
            | BattleError::InvalidTransition { .. } => ErrorKind::InvalidState,
        }
    }

    /// Expected game-state outcomes the player can simply retry around
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BattleError::MoveNotAvailable { .. }
                | BattleError::MoveNotKnown { .. }
                | BattleError::InvalidActor { .. }
                | BattleError::BattleAlreadyEnded(_)
        )
    }
}

impl From<CatalogError> for BattleError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CreatureNotFound(id) => BattleError::CreatureNotFound(id),
            CatalogError::MoveNotFound(id) => BattleError::MoveNotFound(id),
            CatalogError::Malformed(details) => BattleError::CatalogUnavailable(details),
        }
    }
}

pub type BattleResult<T> = Result<T, BattleError>;
