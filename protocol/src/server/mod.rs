//! Responses the battle server sends back

mod view;

use serde::{Deserialize, Serialize};

use crate::battle::{BattleStatus, Effectiveness, ErrorKind, Outcome, Winner};
use crate::ids::MoveId;

pub use view::{BattleSessionView, CombatantView, MoveView};

/// Response to a start request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle: Option<BattleSessionView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl StartResponse {
    pub fn ok(battle: BattleSessionView) -> Self {
        Self {
            success: true,
            battle: Some(battle),
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            battle: None,
            error: Some(error.into()),
            error_kind: Some(kind),
        }
    }
}

/// What one side did during a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub move_id: MoveId,
    pub move_name: String,
    pub hit: bool,
    pub critical: bool,
    pub effectiveness: Effectiveness,
    pub damage: u32,
}

/// Successful turn resolution, flattened into [`UseMoveResponse`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub move_id: MoveId,
    pub move_name: String,
    pub hit: bool,
    pub critical: bool,
    pub effectiveness: Effectiveness,
    pub damage_dealt: u32,
    /// Player creature HP after the whole turn (including any counter-attack)
    pub attacker_hp: u32,
    /// Opponent creature HP after the whole turn
    pub target_hp: u32,
    pub battle_status: BattleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    /// Turn counter after resolution
    pub turn: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy_action: Option<ActionSummary>,
    /// Player creature's moves with PP after this turn
    #[serde(default)]
    pub player_moves: Vec<MoveView>,
}

/// Response to a use-move request
///
/// Failures (no PP, wrong actor, battle over) keep `success: false` with a
/// human-readable `message`; the turn fields are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseMoveResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(flatten)]
    pub result: Option<TurnResult>,
}

impl UseMoveResponse {
    pub fn ok(result: TurnResult, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_kind: None,
            result: Some(result),
        }
    }

    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_kind: Some(kind),
            result: None,
        }
    }

    pub fn battle_status(&self) -> Option<BattleStatus> {
        self.result.as_ref().map(|r| r.battle_status)
    }
}

/// Response to an end request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl EndResponse {
    pub fn ok(outcome: Outcome, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            outcome: Some(outcome),
            error_kind: None,
        }
    }

    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            outcome: None,
            error_kind: Some(kind),
        }
    }
}

/// Response to a state request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle: Option<BattleSessionView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl StateResponse {
    pub fn ok(battle: BattleSessionView) -> Self {
        Self {
            success: true,
            battle: Some(battle),
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            battle: None,
            error: Some(error.into()),
            error_kind: Some(kind),
        }
    }
}

/// Any response, matching the request kind it answers
///
/// Serialized flat, without a variant tag. Clients decode the concrete
/// response type for the endpoint they posted to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerResponse {
    Start(StartResponse),
    UseMove(UseMoveResponse),
    End(EndResponse),
    State(StateResponse),
}

impl ServerResponse {
    /// Serialize just the inner response body
    pub fn to_body(&self) -> crate::Result<String> {
        crate::encode(self)
    }
}
