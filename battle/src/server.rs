//! Maps transport requests onto the engine
//!
//! Every engine error becomes a `success: false` response carrying its
//! [`ErrorKind`](arena_protocol::ErrorKind) and display message; nothing a
//! client sends can make [`BattleServer::handle`] fail.

use std::sync::Arc;

use arena_protocol::{
    ClientRequest, EndRequest, EndResponse, ProtocolError, ServerResponse, StartRequest,
    StartResponse, StateRequest, StateResponse, UseMoveRequest, UseMoveResponse,
};
use tracing::warn;

use crate::engine::BattleEngine;

#[derive(Clone)]
pub struct BattleServer {
    engine: Arc<BattleEngine>,
}

impl BattleServer {
    pub fn new(engine: Arc<BattleEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<BattleEngine> {
        &self.engine
    }

    pub fn handle(&self, request: ClientRequest) -> ServerResponse {
        match request {
            ClientRequest::Start(req) => ServerResponse::Start(self.start(req)),
            ClientRequest::UseMove(req) => ServerResponse::UseMove(self.use_move(req)),
            ClientRequest::End(req) => ServerResponse::End(self.end(req)),
            ClientRequest::State(req) => ServerResponse::State(self.state(req)),
        }
    }

    /// Decode a JSON body posted to `path`, dispatch it and encode the reply
    pub fn handle_body(&self, path: &str, body: &str) -> Result<String, ProtocolError> {
        let request = ClientRequest::from_body(path, body)?;
        self.handle(request).to_body()
    }

    pub fn start(&self, req: StartRequest) -> StartResponse {
        match self.engine.start_battle(
            req.player_id,
            &req.player_creature_id,
            &req.enemy_creature_id,
            req.battle_type,
        ) {
            Ok(view) => StartResponse::ok(view),
            Err(e) => {
                warn!(error = %e, "Start rejected");
                StartResponse::failed(e.kind(), e.to_string())
            }
        }
    }

    pub fn use_move(&self, req: UseMoveRequest) -> UseMoveResponse {
        match self
            .engine
            .use_move(&req.battle_id, &req.acting_creature_id, &req.move_id)
        {
            Ok(outcome) => UseMoveResponse::ok(outcome.to_turn_result(), outcome.message()),
            Err(e) => UseMoveResponse::failed(e.kind(), e.to_string()),
        }
    }

    pub fn end(&self, req: EndRequest) -> EndResponse {
        match self.engine.end_battle(&req.battle_id, req.reason) {
            Ok(summary) => EndResponse::ok(summary.outcome, summary.message()),
            Err(e) => {
                warn!(battle_id = %req.battle_id, error = %e, "End rejected");
                EndResponse::failed(e.kind(), e.to_string())
            }
        }
    }

    pub fn state(&self, req: StateRequest) -> StateResponse {
        match self.engine.battle(&req.battle_id) {
            Ok(view) => StateResponse::ok(view),
            Err(e) => StateResponse::failed(e.kind(), e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::rng::ScriptedRngProvider;
    use arena_protocol::{BattleId, BattleStatus, BattleType, Endpoint, ErrorKind, Outcome, Winner};
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"{
        "moves": [
            { "id": "ember", "name": "Ember", "element": "Fire", "category": "special",
              "power": 40, "accuracy": 100, "max_pp": 25 },
            { "id": "tackle", "name": "Tackle", "element": "Normal", "category": "physical",
              "power": 40, "accuracy": 100, "max_pp": 35 }
        ],
        "creatures": [
            { "id": "starter-1", "species": "Emberling", "level": 15, "types": ["Fire"],
              "stats": { "attack": 55, "defense": 40, "special_attack": 55, "special_defense": 40 },
              "max_hp": 45, "moves": [{ "move_id": "ember" }, { "move_id": "tackle", "current_pp": 0 }] },
            { "id": "wild-7", "species": "Puddlepup", "level": 12, "types": ["Normal"],
              "stats": { "attack": 30, "defense": 40, "special_attack": 30, "special_defense": 40 },
              "max_hp": 35, "current_hp": 10, "moves": [{ "move_id": "tackle" }] }
        ]
    }"#;

    fn server(script: Vec<u32>) -> BattleServer {
        let catalog = InMemoryCatalog::from_json(CATALOG).unwrap();
        let engine = BattleEngine::new(Arc::new(catalog))
            .with_rng_provider(Arc::new(ScriptedRngProvider::new(script)));
        BattleServer::new(Arc::new(engine))
    }

    fn start(server: &BattleServer) -> BattleId {
        let response = server.start(StartRequest {
            player_id: "player-1".into(),
            player_creature_id: "starter-1".into(),
            enemy_creature_id: "wild-7".into(),
            battle_type: BattleType::Wild,
        });
        assert!(response.success);
        response.battle.unwrap().battle_id
    }

    #[test]
    fn test_start_failure_response() {
        let server = server(vec![]);
        let response = server.start(StartRequest {
            player_id: "player-1".into(),
            player_creature_id: "nobody".into(),
            enemy_creature_id: "wild-7".into(),
            battle_type: BattleType::Wild,
        });

        assert!(!response.success);
        assert_eq!(response.battle, None);
        assert_eq!(response.error_kind, Some(ErrorKind::CreatureNotFound));
        assert_eq!(response.error.as_deref(), Some("Creature not found: nobody"));
    }

    #[test]
    fn test_winning_move_response() {
        let server = server(vec![0, 15]);
        let battle_id = start(&server);

        let response = server.use_move(UseMoveRequest {
            battle_id,
            acting_creature_id: "starter-1".into(),
            move_id: "ember".into(),
        });

        assert!(response.success);
        assert_eq!(response.battle_status(), Some(BattleStatus::Ended));
        let result = response.result.unwrap();
        assert_eq!(result.damage_dealt, 10);
        assert_eq!(result.target_hp, 0);
        assert_eq!(result.attacker_hp, 45);
        assert_eq!(result.winner, Some(Winner::Player));
        assert_eq!(result.enemy_action, None);
        assert_eq!(
            response.message,
            "Emberling used Ember!\nThe opposing Puddlepup fainted!\nYou won the battle!"
        );
    }

    #[test]
    fn test_no_pp_is_a_failed_response() {
        let server = server(vec![]);
        let battle_id = start(&server);

        let response = server.use_move(UseMoveRequest {
            battle_id,
            acting_creature_id: "starter-1".into(),
            move_id: "tackle".into(),
        });

        assert!(!response.success);
        assert_eq!(response.message, "Tackle has no PP left!");
        assert_eq!(response.error_kind, Some(ErrorKind::MoveNotAvailable));
        assert_eq!(response.result, None);
    }

    #[test]
    fn test_end_twice() {
        let server = server(vec![]);
        let battle_id = start(&server);

        let first = server.end(EndRequest {
            battle_id,
            reason: None,
        });
        let second = server.end(EndRequest {
            battle_id,
            reason: None,
        });

        assert_eq!(first.outcome, Some(Outcome::PlayerFled));
        assert_eq!(first.message, "Got away safely!");
        assert!(second.success);
        assert_eq!(second.outcome, Some(Outcome::PlayerFled));
    }

    #[test]
    fn test_state_of_missing_battle() {
        let server = server(vec![]);
        let response = server.state(StateRequest {
            battle_id: BattleId::new(),
        });
        assert!(!response.success);
        assert_eq!(response.error_kind, Some(ErrorKind::BattleNotFound));
    }

    #[test]
    fn test_handle_body_roundtrip() {
        let server = server(vec![]);
        let battle_id = start(&server);

        let body = format!(r#"{{ "battle_id": "{}" }}"#, battle_id);
        let reply = server.handle_body(Endpoint::State.path(), &body).unwrap();
        let response: StateResponse = arena_protocol::decode(&reply).unwrap();

        assert!(response.success);
        assert_eq!(response.battle.unwrap().turn, 1);

        let err = server.handle_body("/battle/teleport", "{}").unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownEndpoint(_)));
    }

    #[test]
    fn test_rejected_move_body_decodes_as_use_move_response() {
        let server = server(vec![]);
        let battle_id = start(&server);

        let body = format!(
            r#"{{ "battle_id": "{}", "acting_creature_id": "starter-1", "move_id": "tackle" }}"#,
            battle_id
        );
        let reply = server.handle_body(Endpoint::UseMove.path(), &body).unwrap();
        let response: UseMoveResponse = arena_protocol::decode(&reply).unwrap();

        assert!(!response.success);
        assert_eq!(response.message, "Tackle has no PP left!");
        assert_eq!(response.error_kind, Some(ErrorKind::MoveNotAvailable));
        assert_eq!(response.result, None);
    }
}
