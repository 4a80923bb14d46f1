//! Request/response contract between the battle client and the battle server.
//!
//! Every interaction with a battle session goes through one of four
//! request/response pairs:
//!
//! ```text
//! StartRequest   ──> StartResponse    (creates a session)
//! UseMoveRequest ──> UseMoveResponse  (resolves one turn)
//! EndRequest     ──> EndResponse      (flee / forced end)
//! StateRequest   ──> StateResponse    (resync a mirror)
//! ```
//!
//! Game-state failures (no PP left, wrong actor, battle already over) are
//! reported inside the response with `success: false`; only malformed
//! payloads surface as [`ProtocolError`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod battle;
pub mod client;
pub mod ids;
pub mod server;

pub use battle::{BattleStatus, BattleType, EndReason, Effectiveness, ErrorKind, Outcome, Phase, Winner};
pub use client::{ClientRequest, Endpoint, EndRequest, StartRequest, StateRequest, UseMoveRequest};
pub use ids::{BattleId, CreatureId, MoveId, PlayerId};
pub use server::{
    ActionSummary, BattleSessionView, CombatantView, EndResponse, MoveView, ServerResponse,
    StartResponse, StateResponse, TurnResult, UseMoveResponse,
};

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Empty payload")]
    EmptyPayload,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Serialize a request or response to its JSON wire format
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Parse a JSON payload into a request or response
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<T> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(ProtocolError::EmptyPayload);
    }
    Ok(serde_json::from_str(payload)?)
}
