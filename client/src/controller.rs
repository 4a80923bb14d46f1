use anyhow::{Context, Result, bail};
use arena_protocol::{MoveId, Outcome, StartRequest, StateRequest};
use tracing::{debug, warn};

use crate::machine::{reduce, ClientEvent, ClientPhase, ClientState, Effect};
use crate::mirror::BattleMirror;
use crate::transport::Transport;

/// Shown for any failure that produced no usable response
pub const TRANSPORT_ERROR_MESSAGE: &str = "Could not reach the battle server. Please try again.";

/// Drives a [`ClientState`] through an injected [`Transport`]
///
/// Each method feeds one intent to the reducer, runs the effect it asks for
/// (if any) and feeds the response back in. When a method returns, no
/// request is in flight.
pub struct BattleController<T: Transport> {
    transport: T,
    state: ClientState,
}

impl<T: Transport> BattleController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: ClientState::new(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn phase(&self) -> ClientPhase {
        self.state.phase
    }

    pub fn mirror(&self) -> Option<&BattleMirror> {
        self.state.mirror.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn start(&mut self, request: StartRequest) -> &ClientState {
        self.dispatch(ClientEvent::StartBattle(request)).await
    }

    pub async fn select_move(&mut self, move_id: Option<MoveId>) -> &ClientState {
        self.dispatch(ClientEvent::SelectMove(move_id)).await
    }

    pub async fn confirm_move(&mut self) -> &ClientState {
        self.dispatch(ClientEvent::ConfirmMove).await
    }

    pub async fn flee(&mut self) -> &ClientState {
        self.dispatch(ClientEvent::RequestFlee).await
    }

    pub async fn dismiss_message(&mut self) -> &ClientState {
        self.dispatch(ClientEvent::DismissMessage).await
    }

    pub async fn return_to_idle(&mut self) -> &ClientState {
        self.dispatch(ClientEvent::ReturnToIdle).await
    }

    /// Replace the mirror with the server's current view of the session
    pub async fn resync(&mut self) -> Result<()> {
        if self.state.is_locked() {
            bail!("Cannot resync while a request is in flight");
        }
        let battle_id = self
            .state
            .mirror
            .as_ref()
            .map(|m| m.battle_id)
            .context("No battle to resync")?;

        let response = self
            .transport
            .state(StateRequest { battle_id })
            .await
            .context("Failed to fetch battle state")?;

        if !response.success {
            bail!(
                "Resync failed: {}",
                response.error.as_deref().unwrap_or("unknown error")
            );
        }
        let view = response.battle.context("State response carried no battle")?;

        let mirror = BattleMirror::from_view(view);
        if mirror.is_ended() {
            self.state.phase = ClientPhase::Ended;
            self.state.selected_move = None;
        }
        self.state.mirror = Some(mirror);
        Ok(())
    }

    async fn dispatch(&mut self, event: ClientEvent) -> &ClientState {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            let (state, effect) = reduce(std::mem::take(&mut self.state), event);
            self.state = state;
            if let Some(effect) = effect {
                next = Some(self.execute(effect).await);
            }
        }
        &self.state
    }

    /// Run one transport call and translate the reply into an event
    async fn execute(&self, effect: Effect) -> ClientEvent {
        match effect {
            Effect::Start(request) => match self.transport.start(request).await {
                Ok(response) => match response.battle {
                    Some(view) if response.success => ClientEvent::StartSucceeded(view),
                    _ => ClientEvent::StartFailed(
                        response
                            .error
                            .unwrap_or_else(|| "The battle could not be started.".to_string()),
                    ),
                },
                Err(e) => transport_failed("start", e),
            },

            Effect::UseMove(request) => match self.transport.use_move(request).await {
                Ok(response) if response.success => match response.result {
                    Some(result) => ClientEvent::MoveResolved {
                        result,
                        message: response.message,
                    },
                    None => {
                        warn!("Use-move response without turn result");
                        ClientEvent::TransportFailed(TRANSPORT_ERROR_MESSAGE.to_string())
                    }
                },
                Ok(response) => {
                    debug!(kind = ?response.error_kind, message = %response.message, "Move rejected");
                    ClientEvent::MoveRejected {
                        kind: response.error_kind,
                        message: response.message,
                    }
                }
                Err(e) => transport_failed("use-move", e),
            },

            Effect::End(request) => match self.transport.end(request).await {
                Ok(response) if response.success => ClientEvent::EndAcknowledged {
                    outcome: response.outcome.unwrap_or(Outcome::PlayerFled),
                    message: response.message,
                },
                Ok(response) => ClientEvent::EndFailed {
                    kind: response.error_kind,
                    message: response.message,
                },
                Err(e) => transport_failed("end", e),
            },
        }
    }
}

fn transport_failed(call: &str, error: impl std::fmt::Display) -> ClientEvent {
    warn!(call, error = %error, "Transport failure");
    ClientEvent::TransportFailed(TRANSPORT_ERROR_MESSAGE.to_string())
}
