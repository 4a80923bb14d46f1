//! The only channel between a client and a battle server

mod http;
mod local;

use arena_protocol::{
    EndRequest, EndResponse, ProtocolError, StartRequest, StartResponse, StateRequest,
    StateResponse, UseMoveRequest, UseMoveResponse,
};
use async_trait::async_trait;
use thiserror::Error;

pub use http::{HttpTransport, HttpTransportConfig};
pub use local::LocalTransport;

/// Failure to get any response at all
///
/// Game-state failures are not transport errors; they arrive as responses
/// with `success: false`.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {status}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Battle server unavailable: {0}")]
    Unavailable(String),
}

/// Request/response calls against a battle server
///
/// Passed to [`BattleController`](crate::BattleController) at construction
/// so tests can swap in an in-process server or a scripted fake.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn start(&self, request: StartRequest) -> Result<StartResponse, TransportError>;

    async fn use_move(&self, request: UseMoveRequest) -> Result<UseMoveResponse, TransportError>;

    async fn end(&self, request: EndRequest) -> Result<EndResponse, TransportError>;

    async fn state(&self, request: StateRequest) -> Result<StateResponse, TransportError>;
}
