//! Shared enums used by both requests and responses

use serde::{Deserialize, Serialize};

/// Kind of encounter a battle was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleType {
    Wild,
    Trainer,
}

impl BattleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleType::Wild => "wild",
            BattleType::Trainer => "trainer",
        }
    }
}

/// Step within a battle's turn life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SelectingCommand,
    ResolvingTurn,
    Ended,
}

impl Phase {
    /// Whether `next` is a legal successor of this phase.
    ///
    /// `SelectingCommand -> ResolvingTurn -> SelectingCommand | Ended`, and an
    /// explicit end from `SelectingCommand`. Nothing leaves `Ended`.
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::SelectingCommand, Phase::ResolvingTurn)
                | (Phase::SelectingCommand, Phase::Ended)
                | (Phase::ResolvingTurn, Phase::SelectingCommand)
                | (Phase::ResolvingTurn, Phase::Ended)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Ended
    }
}

/// How a finished battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWon,
    EnemyWon,
    Draw,
    PlayerFled,
}

impl Outcome {
    pub fn winner(self) -> Option<Winner> {
        match self {
            Outcome::PlayerWon => Some(Winner::Player),
            Outcome::EnemyWon => Some(Winner::Enemy),
            Outcome::Draw | Outcome::PlayerFled => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player,
    Enemy,
}

/// Coarse battle status reported after each turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    InProgress,
    Ended,
}

impl From<Phase> for BattleStatus {
    fn from(phase: Phase) -> Self {
        if phase.is_terminal() {
            BattleStatus::Ended
        } else {
            BattleStatus::InProgress
        }
    }
}

/// Type matchup category of a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    Ineffective,
    NotVeryEffective,
    Normal,
    SuperEffective,
}

impl Effectiveness {
    /// Categorize a combined type multiplier (0, 0.25, 0.5, 1, 2, 4, ...)
    pub fn from_multiplier(multiplier: f32) -> Self {
        if multiplier <= 0.0 {
            Effectiveness::Ineffective
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Normal
        }
    }

    /// Battle text for the matchup, if any is shown
    pub fn message(self) -> Option<&'static str> {
        match self {
            Effectiveness::Ineffective => Some("It had no effect..."),
            Effectiveness::NotVeryEffective => Some("It's not very effective..."),
            Effectiveness::Normal => None,
            Effectiveness::SuperEffective => Some("It's super effective!"),
        }
    }
}

/// Why a battle is being ended from outside turn resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    #[default]
    Flee,
    Draw,
}

impl EndReason {
    pub fn outcome(self) -> Outcome {
        match self {
            EndReason::Flee => Outcome::PlayerFled,
            EndReason::Draw => Outcome::Draw,
        }
    }
}

/// Machine-readable failure code carried by `success: false` responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    CreatureNotFound,
    MoveNotFound,
    BattleNotFound,
    BattleAlreadyEnded,
    InvalidActor,
    MoveNotAvailable,
    /// Session is in a state the request cannot apply to (a server-side defect)
    InvalidState,
}

impl ErrorKind {
    /// Whether the session is gone, leaving only a return to a non-battle screen
    pub fn session_lost(self) -> bool {
        self == ErrorKind::BattleNotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        assert!(Phase::SelectingCommand.can_advance_to(Phase::ResolvingTurn));
        assert!(Phase::ResolvingTurn.can_advance_to(Phase::SelectingCommand));
        assert!(Phase::ResolvingTurn.can_advance_to(Phase::Ended));
        assert!(Phase::SelectingCommand.can_advance_to(Phase::Ended));

        assert!(!Phase::SelectingCommand.can_advance_to(Phase::SelectingCommand));
        assert!(!Phase::ResolvingTurn.can_advance_to(Phase::ResolvingTurn));
        assert!(!Phase::Ended.can_advance_to(Phase::SelectingCommand));
        assert!(!Phase::Ended.can_advance_to(Phase::ResolvingTurn));
        assert!(!Phase::Ended.can_advance_to(Phase::Ended));
    }

    #[test]
    fn test_effectiveness_from_multiplier() {
        assert_eq!(Effectiveness::from_multiplier(0.0), Effectiveness::Ineffective);
        assert_eq!(Effectiveness::from_multiplier(0.25), Effectiveness::NotVeryEffective);
        assert_eq!(Effectiveness::from_multiplier(0.5), Effectiveness::NotVeryEffective);
        assert_eq!(Effectiveness::from_multiplier(1.0), Effectiveness::Normal);
        assert_eq!(Effectiveness::from_multiplier(2.0), Effectiveness::SuperEffective);
        assert_eq!(Effectiveness::from_multiplier(4.0), Effectiveness::SuperEffective);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(Outcome::PlayerWon.winner(), Some(Winner::Player));
        assert_eq!(Outcome::EnemyWon.winner(), Some(Winner::Enemy));
        assert_eq!(Outcome::PlayerFled.winner(), None);
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_battle_type_names() {
        assert_eq!(BattleType::Wild.as_str(), "wild");
        assert_eq!(BattleType::Trainer.as_str(), "trainer");
    }

    #[test]
    fn test_end_reason_defaults_to_flee() {
        assert_eq!(EndReason::default().outcome(), Outcome::PlayerFled);
        assert_eq!(EndReason::Draw.outcome(), Outcome::Draw);
    }
}
