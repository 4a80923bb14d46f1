//! Requests the client sends to the battle server

use serde::{Deserialize, Serialize};

use crate::battle::{BattleType, EndReason};
use crate::ids::{BattleId, CreatureId, MoveId, PlayerId};
use crate::{ProtocolError, Result};

/// Start a battle between one player creature and one opponent creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    pub player_id: PlayerId,
    pub player_creature_id: CreatureId,
    pub enemy_creature_id: CreatureId,
    pub battle_type: BattleType,
}

/// Use one of the acting creature's moves this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseMoveRequest {
    pub battle_id: BattleId,
    pub acting_creature_id: CreatureId,
    pub move_id: MoveId,
}

/// End a battle outside of turn resolution (defaults to fleeing)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndRequest {
    pub battle_id: BattleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<EndReason>,
}

/// Fetch the current view of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRequest {
    pub battle_id: BattleId,
}

/// Any request, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    Start(StartRequest),
    UseMove(UseMoveRequest),
    End(EndRequest),
    State(StateRequest),
}

impl ClientRequest {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Start(_) => Endpoint::Start,
            Self::UseMove(_) => Endpoint::UseMove,
            Self::End(_) => Endpoint::End,
            Self::State(_) => Endpoint::State,
        }
    }

    /// Parse a request body received on `path`
    pub fn from_body(path: &str, body: &str) -> Result<Self> {
        let request = match Endpoint::from_path(path)? {
            Endpoint::Start => Self::Start(crate::decode(body)?),
            Endpoint::UseMove => Self::UseMove(crate::decode(body)?),
            Endpoint::End => Self::End(crate::decode(body)?),
            Endpoint::State => Self::State(crate::decode(body)?),
        };
        Ok(request)
    }
}

/// HTTP-style routes the requests are posted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    UseMove,
    End,
    State,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Start => "/battle/start",
            Self::UseMove => "/battle/use-move",
            Self::End => "/battle/end",
            Self::State => "/battle/state",
        }
    }

    pub fn from_path(path: &str) -> Result<Self> {
        match path.trim_end_matches('/') {
            "/battle/start" => Ok(Self::Start),
            "/battle/use-move" => Ok(Self::UseMove),
            "/battle/end" => Ok(Self::End),
            "/battle/state" => Ok(Self::State),
            other => Err(ProtocolError::UnknownEndpoint(other.to_string())),
        }
    }
}

impl From<StartRequest> for ClientRequest {
    fn from(request: StartRequest) -> Self {
        Self::Start(request)
    }
}

impl From<UseMoveRequest> for ClientRequest {
    fn from(request: UseMoveRequest) -> Self {
        Self::UseMove(request)
    }
}

impl From<EndRequest> for ClientRequest {
    fn from(request: EndRequest) -> Self {
        Self::End(request)
    }
}

impl From<StateRequest> for ClientRequest {
    fn from(request: StateRequest) -> Self {
        Self::State(request)
    }
}
