use arena_battle::BattleServer;
use arena_protocol::{
    EndRequest, EndResponse, StartRequest, StartResponse, StateRequest, StateResponse,
    UseMoveRequest, UseMoveResponse,
};
use async_trait::async_trait;

use super::{Transport, TransportError};

/// Calls a [`BattleServer`] in the same process
#[derive(Clone)]
pub struct LocalTransport {
    server: BattleServer,
}

impl LocalTransport {
    pub fn new(server: BattleServer) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &BattleServer {
        &self.server
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn start(&self, request: StartRequest) -> Result<StartResponse, TransportError> {
        Ok(self.server.start(request))
    }

    async fn use_move(&self, request: UseMoveRequest) -> Result<UseMoveResponse, TransportError> {
        Ok(self.server.use_move(request))
    }

    async fn end(&self, request: EndRequest) -> Result<EndResponse, TransportError> {
        Ok(self.server.end(request))
    }

    async fn state(&self, request: StateRequest) -> Result<StateResponse, TransportError> {
        Ok(self.server.state(request))
    }
}
