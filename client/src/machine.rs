//! Battle client state machine
//!
//! [`reduce`] is a pure function from `(state, event)` to the next state and
//! at most one [`Effect`]. Effects are transport calls; whoever runs the
//! machine executes them and feeds the response back in as another event.
//!
//! ```text
//! Idle ──StartBattle──> Starting ──StartSucceeded──> AwaitingCommand
//!                          │                          │  ▲
//!                     StartFailed           ConfirmMove  MoveResolved / MoveRejected
//!                          ▼                          ▼  │
//!                     StartFailed               ResolvingTurn
//!
//! AwaitingCommand ──RequestFlee──> (fleeing) ──EndAcknowledged──> Ended
//! Ended | StartFailed ──ReturnToIdle──> Idle
//! ```
//!
//! `ResolvingTurn` and an in-flight flee are the input lock: selection,
//! confirmation and flee intents are ignored until the response arrives.
//! Every failure response releases the lock.

use arena_battle::BattleEvent;
use arena_protocol::{
    BattleSessionView, BattleStatus, EndRequest, ErrorKind, MoveId, Outcome, StartRequest,
    TurnResult, UseMoveRequest,
};

use crate::mirror::BattleMirror;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientPhase {
    #[default]
    Idle,
    Starting,
    AwaitingCommand,
    ResolvingTurn,
    Ended,
    /// Start request failed; shown as a dedicated error screen
    StartFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientState {
    pub phase: ClientPhase,
    pub mirror: Option<BattleMirror>,
    pub selected_move: Option<MoveId>,
    /// One-item queue: a new message replaces an undismissed one
    pub message: Option<String>,
    pub last_error: Option<String>,
    /// An end request is in flight
    pub fleeing: bool,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether move selection and flee intents are currently accepted
    pub fn accepts_commands(&self) -> bool {
        self.phase == ClientPhase::AwaitingCommand && !self.fleeing
    }

    pub fn is_locked(&self) -> bool {
        self.phase == ClientPhase::ResolvingTurn || self.fleeing
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    // User intents
    StartBattle(StartRequest),
    SelectMove(Option<MoveId>),
    ConfirmMove,
    RequestFlee,
    DismissMessage,
    ReturnToIdle,

    // Transport responses
    StartSucceeded(BattleSessionView),
    StartFailed(String),
    MoveResolved { result: TurnResult, message: String },
    MoveRejected { kind: Option<ErrorKind>, message: String },
    EndAcknowledged { outcome: Outcome, message: String },
    EndFailed { kind: Option<ErrorKind>, message: String },
    /// Network error or undecodable response
    TransportFailed(String),
}

/// A transport call requested by the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Start(StartRequest),
    UseMove(UseMoveRequest),
    End(EndRequest),
}

pub fn reduce(mut state: ClientState, event: ClientEvent) -> (ClientState, Option<Effect>) {
    use ClientPhase::*;

    match event {
        ClientEvent::StartBattle(request) => {
            if !matches!(state.phase, Idle | StartFailed) {
                return (state, None);
            }
            let state = ClientState {
                phase: Starting,
                ..ClientState::default()
            };
            (state, Some(Effect::Start(request)))
        }

        ClientEvent::SelectMove(move_id) => {
            if !state.accepts_commands() {
                return (state, None);
            }
            state.selected_move = match move_id {
                Some(id) if state.selected_move.as_ref() == Some(&id) => None,
                Some(id) if knows_move(&state, &id) => Some(id),
                Some(_) => state.selected_move.take(),
                None => None,
            };
            (state, None)
        }

        ClientEvent::ConfirmMove => {
            if !state.accepts_commands() {
                return (state, None);
            }
            let Some((battle_id, acting_creature_id)) = state
                .mirror
                .as_ref()
                .map(|m| (m.battle_id, m.player_creature_id().clone()))
            else {
                return (state, None);
            };
            let Some(move_id) = state.selected_move.take() else {
                return (state, None);
            };
            let request = UseMoveRequest {
                battle_id,
                acting_creature_id,
                move_id,
            };
            state.phase = ResolvingTurn;
            state.last_error = None;
            (state, Some(Effect::UseMove(request)))
        }

        ClientEvent::RequestFlee => {
            if !state.accepts_commands() {
                return (state, None);
            }
            let Some(battle_id) = state.mirror.as_ref().map(|m| m.battle_id) else {
                return (state, None);
            };
            let request = EndRequest {
                battle_id,
                reason: None,
            };
            state.fleeing = true;
            state.selected_move = None;
            state.last_error = None;
            (state, Some(Effect::End(request)))
        }

        ClientEvent::DismissMessage => {
            state.message = None;
            (state, None)
        }

        ClientEvent::ReturnToIdle => {
            if !matches!(state.phase, Ended | StartFailed) {
                return (state, None);
            }
            (ClientState::default(), None)
        }

        ClientEvent::StartSucceeded(view) => {
            if state.phase != Starting {
                return (state, None);
            }
            let intro = BattleEvent::BattleStarted {
                battle_type: view.battle_type,
                player: view.player.species.clone(),
                enemy: view.enemy.species.clone(),
            };
            let mirror = BattleMirror::from_view(view);
            state.phase = if mirror.is_ended() { Ended } else { AwaitingCommand };
            state.message = intro.format();
            state.mirror = Some(mirror);
            (state, None)
        }

        ClientEvent::StartFailed(error) => {
            if state.phase != Starting {
                return (state, None);
            }
            state.phase = StartFailed;
            state.last_error = Some(error);
            (state, None)
        }

        ClientEvent::MoveResolved { result, message } => {
            if state.phase != ResolvingTurn {
                return (state, None);
            }
            if let Some(mirror) = state.mirror.as_mut() {
                mirror.apply_turn(&result);
            }
            state.phase = match result.battle_status {
                BattleStatus::Ended => Ended,
                BattleStatus::InProgress => AwaitingCommand,
            };
            state.message = Some(message);
            (state, None)
        }

        ClientEvent::MoveRejected { kind, message } => {
            if state.phase != ResolvingTurn {
                return (state, None);
            }
            state.phase = after_failure(kind);
            state.last_error = Some(message);
            (state, None)
        }

        ClientEvent::EndAcknowledged { outcome, message } => {
            if !state.fleeing {
                return (state, None);
            }
            if let Some(mirror) = state.mirror.as_mut() {
                mirror.finish(outcome);
            }
            state.fleeing = false;
            state.phase = Ended;
            state.message = Some(message);
            (state, None)
        }

        ClientEvent::EndFailed { kind, message } => {
            if !state.fleeing {
                return (state, None);
            }
            state.fleeing = false;
            state.phase = after_failure(kind);
            state.last_error = Some(message);
            (state, None)
        }

        ClientEvent::TransportFailed(error) => {
            match state.phase {
                Starting => state.phase = StartFailed,
                ResolvingTurn => state.phase = AwaitingCommand,
                AwaitingCommand if state.fleeing => {}
                _ => return (state, None),
            }
            state.fleeing = false;
            state.last_error = Some(error);
            (state, None)
        }
    }
}

/// Where a rejected request leaves the client: only a lost session ends it
fn after_failure(kind: Option<ErrorKind>) -> ClientPhase {
    match kind {
        Some(kind) if kind.session_lost() => ClientPhase::Ended,
        _ => ClientPhase::AwaitingCommand,
    }
}

fn knows_move(state: &ClientState, move_id: &MoveId) -> bool {
    state
        .mirror
        .as_ref()
        .is_some_and(|mirror| mirror.knows_move(move_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_protocol::{
        BattleId, BattleType, CombatantView, Effectiveness, MoveView, Phase, Winner,
    };
    use pretty_assertions::assert_eq;

    fn start_request() -> StartRequest {
        StartRequest {
            player_id: "player-1".into(),
            player_creature_id: "starter-1".into(),
            enemy_creature_id: "wild-7".into(),
            battle_type: BattleType::Wild,
        }
    }

    fn combatant(id: &str, species: &str, hp: u32) -> CombatantView {
        CombatantView {
            creature_id: id.into(),
            species: species.to_string(),
            level: 12,
            types: vec![],
            current_hp: hp,
            max_hp: hp,
            moves: vec![MoveView {
                move_id: "ember".into(),
                name: "Ember".to_string(),
                element: "Fire".to_string(),
                power: 40,
                accuracy: 100,
                current_pp: 25,
                max_pp: 25,
            }],
        }
    }

    fn view() -> BattleSessionView {
        BattleSessionView {
            battle_id: BattleId::new(),
            player_id: "player-1".into(),
            battle_type: BattleType::Wild,
            turn: 1,
            phase: Phase::SelectingCommand,
            outcome: None,
            player: combatant("starter-1", "Emberling", 45),
            enemy: combatant("wild-7", "Puddlepup", 35),
        }
    }

    fn turn_result(status: BattleStatus) -> TurnResult {
        TurnResult {
            move_id: "ember".into(),
            move_name: "Ember".to_string(),
            hit: true,
            critical: false,
            effectiveness: Effectiveness::Normal,
            damage_dealt: 10,
            attacker_hp: 39,
            target_hp: 25,
            battle_status: status,
            winner: None,
            outcome: None,
            turn: 2,
            enemy_action: None,
            player_moves: vec![],
        }
    }

    fn run(state: ClientState, events: Vec<ClientEvent>) -> ClientState {
        events
            .into_iter()
            .fold(state, |state, event| reduce(state, event).0)
    }

    fn awaiting() -> ClientState {
        run(
            ClientState::new(),
            vec![
                ClientEvent::StartBattle(start_request()),
                ClientEvent::StartSucceeded(view()),
            ],
        )
    }

    #[test]
    fn test_start_flow() {
        let (state, effect) = reduce(ClientState::new(), ClientEvent::StartBattle(start_request()));
        assert_eq!(state.phase, ClientPhase::Starting);
        assert_eq!(effect, Some(Effect::Start(start_request())));

        let (state, effect) = reduce(state, ClientEvent::StartSucceeded(view()));
        assert_eq!(state.phase, ClientPhase::AwaitingCommand);
        assert_eq!(effect, None);
        assert_eq!(
            state.message.as_deref(),
            Some("A wild Puddlepup appeared! Go, Emberling!")
        );
        assert!(state.mirror.is_some());
    }

    #[test]
    fn test_start_failure_has_its_own_screen() {
        let state = run(
            ClientState::new(),
            vec![
                ClientEvent::StartBattle(start_request()),
                ClientEvent::StartFailed("Creature not found: wild-7".to_string()),
            ],
        );
        assert_eq!(state.phase, ClientPhase::StartFailed);
        assert_eq!(state.last_error.as_deref(), Some("Creature not found: wild-7"));

        // Retry is allowed from the error screen
        let (retry, effect) = reduce(state.clone(), ClientEvent::StartBattle(start_request()));
        assert_eq!(retry.phase, ClientPhase::Starting);
        assert_eq!(retry.last_error, None);
        assert!(effect.is_some());

        let (idle, _) = reduce(state, ClientEvent::ReturnToIdle);
        assert_eq!(idle, ClientState::default());
    }

    #[test]
    fn test_select_move_toggles() {
        let state = awaiting();
        let (state, _) = reduce(state, ClientEvent::SelectMove(Some("ember".into())));
        assert_eq!(state.selected_move, Some("ember".into()));

        let (state, _) = reduce(state, ClientEvent::SelectMove(Some("ember".into())));
        assert_eq!(state.selected_move, None);

        let (state, _) = reduce(state, ClientEvent::SelectMove(Some("hyper_beam".into())));
        assert_eq!(state.selected_move, None);

        let (state, _) = reduce(state, ClientEvent::SelectMove(Some("ember".into())));
        let (state, _) = reduce(state, ClientEvent::SelectMove(None));
        assert_eq!(state.selected_move, None);
    }

    #[test]
    fn test_confirm_requires_selection() {
        let state = awaiting();
        let (state, effect) = reduce(state, ClientEvent::ConfirmMove);
        assert_eq!(state.phase, ClientPhase::AwaitingCommand);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_confirm_locks_input() {
        let state = awaiting();
        let battle_id = state.mirror.as_ref().unwrap().battle_id;
        let (state, _) = reduce(state, ClientEvent::SelectMove(Some("ember".into())));
        let (state, effect) = reduce(state, ClientEvent::ConfirmMove);

        assert_eq!(state.phase, ClientPhase::ResolvingTurn);
        assert_eq!(state.selected_move, None);
        assert!(state.is_locked());
        assert_eq!(
            effect,
            Some(Effect::UseMove(UseMoveRequest {
                battle_id,
                acting_creature_id: "starter-1".into(),
                move_id: "ember".into(),
            }))
        );

        // Input is ignored while the turn resolves
        let (locked, effect) = reduce(state.clone(), ClientEvent::SelectMove(Some("ember".into())));
        assert_eq!(locked, state);
        assert_eq!(effect, None);
        let (locked, effect) = reduce(state.clone(), ClientEvent::ConfirmMove);
        assert_eq!(locked, state);
        assert_eq!(effect, None);
        let (_, effect) = reduce(state, ClientEvent::RequestFlee);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_move_resolved_updates_mirror() {
        let state = run(
            awaiting(),
            vec![
                ClientEvent::SelectMove(Some("ember".into())),
                ClientEvent::ConfirmMove,
                ClientEvent::MoveResolved {
                    result: turn_result(BattleStatus::InProgress),
                    message: "Emberling used Ember!".to_string(),
                },
            ],
        );

        assert_eq!(state.phase, ClientPhase::AwaitingCommand);
        assert_eq!(state.message.as_deref(), Some("Emberling used Ember!"));
        let mirror = state.mirror.unwrap();
        assert_eq!(mirror.enemy.current_hp, 25);
        assert_eq!(mirror.player.current_hp, 39);
        assert_eq!(mirror.pp(&"ember".into()), Some(24));
    }

    #[test]
    fn test_winning_turn_ends_battle() {
        let mut result = turn_result(BattleStatus::Ended);
        result.target_hp = 0;
        result.winner = Some(Winner::Player);
        result.outcome = Some(Outcome::PlayerWon);

        let state = run(
            awaiting(),
            vec![
                ClientEvent::SelectMove(Some("ember".into())),
                ClientEvent::ConfirmMove,
                ClientEvent::MoveResolved {
                    result,
                    message: "You won the battle!".to_string(),
                },
            ],
        );

        assert_eq!(state.phase, ClientPhase::Ended);
        assert_eq!(state.mirror.as_ref().unwrap().outcome, Some(Outcome::PlayerWon));

        let (state, effect) = reduce(state, ClientEvent::SelectMove(Some("ember".into())));
        assert_eq!(effect, None);
        assert_eq!(state.selected_move, None);

        let (state, _) = reduce(state, ClientEvent::ReturnToIdle);
        assert_eq!(state.phase, ClientPhase::Idle);
        assert_eq!(state.mirror, None);
    }

    #[test]
    fn test_rejection_releases_lock_without_touching_mirror() {
        let before = awaiting();
        let state = run(
            before.clone(),
            vec![
                ClientEvent::SelectMove(Some("ember".into())),
                ClientEvent::ConfirmMove,
                ClientEvent::MoveRejected {
                    kind: Some(ErrorKind::MoveNotAvailable),
                    message: "Ember has no PP left!".to_string(),
                },
            ],
        );

        assert_eq!(state.phase, ClientPhase::AwaitingCommand);
        assert!(!state.is_locked());
        assert_eq!(state.last_error.as_deref(), Some("Ember has no PP left!"));
        assert_eq!(state.mirror, before.mirror);
    }

    #[test]
    fn test_transport_failure_releases_lock() {
        let state = run(
            awaiting(),
            vec![
                ClientEvent::SelectMove(Some("ember".into())),
                ClientEvent::ConfirmMove,
                ClientEvent::TransportFailed("connection refused".to_string()),
            ],
        );
        assert_eq!(state.phase, ClientPhase::AwaitingCommand);
        assert_eq!(state.last_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_lost_session_ends_battle() {
        let state = run(
            awaiting(),
            vec![
                ClientEvent::SelectMove(Some("ember".into())),
                ClientEvent::ConfirmMove,
                ClientEvent::MoveRejected {
                    kind: Some(ErrorKind::BattleNotFound),
                    message: "Battle not found".to_string(),
                },
            ],
        );
        assert_eq!(state.phase, ClientPhase::Ended);

        let (state, effect) = reduce(state, ClientEvent::RequestFlee);
        assert_eq!(effect, None);
        let (state, _) = reduce(state, ClientEvent::ReturnToIdle);
        assert_eq!(state.phase, ClientPhase::Idle);
    }

    #[test]
    fn test_flee_flow() {
        let state = awaiting();
        let battle_id = state.mirror.as_ref().unwrap().battle_id;

        let (state, effect) = reduce(state, ClientEvent::RequestFlee);
        assert_eq!(
            effect,
            Some(Effect::End(EndRequest {
                battle_id,
                reason: None,
            }))
        );
        assert!(state.fleeing);
        assert!(!state.accepts_commands());

        let (state, _) = reduce(
            state,
            ClientEvent::EndAcknowledged {
                outcome: Outcome::PlayerFled,
                message: "Got away safely!".to_string(),
            },
        );
        assert_eq!(state.phase, ClientPhase::Ended);
        assert!(!state.fleeing);
        assert_eq!(state.mirror.unwrap().outcome, Some(Outcome::PlayerFled));
    }

    #[test]
    fn test_failed_flee_can_be_retried() {
        let state = run(
            awaiting(),
            vec![
                ClientEvent::RequestFlee,
                ClientEvent::TransportFailed("timed out".to_string()),
            ],
        );
        assert_eq!(state.phase, ClientPhase::AwaitingCommand);
        assert!(!state.fleeing);

        let (_, effect) = reduce(state, ClientEvent::RequestFlee);
        assert!(matches!(effect, Some(Effect::End(_))));
    }

    #[test]
    fn test_dismiss_message() {
        let state = awaiting();
        assert!(state.message.is_some());
        let (state, _) = reduce(state, ClientEvent::DismissMessage);
        assert_eq!(state.message, None);
    }

    #[test]
    fn test_stray_responses_are_ignored() {
        let idle = ClientState::new();
        let (state, _) = reduce(
            idle.clone(),
            ClientEvent::MoveResolved {
                result: turn_result(BattleStatus::Ended),
                message: String::new(),
            },
        );
        assert_eq!(state, idle);

        let (state, _) = reduce(idle.clone(), ClientEvent::TransportFailed("x".to_string()));
        assert_eq!(state, idle);
    }
}
