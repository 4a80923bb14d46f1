//! Client-side copy of the last known session state
//!
//! The mirror is never authoritative. It only changes when a server response
//! says so, and a later state request can always replace it wholesale.

use arena_protocol::{
    BattleId, BattleSessionView, BattleStatus, BattleType, CombatantView, CreatureId, MoveId,
    Outcome, Phase, PlayerId, TurnResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleMirror {
    pub battle_id: BattleId,
    pub player_id: PlayerId,
    pub battle_type: BattleType,
    pub turn: u32,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    pub player: CombatantView,
    pub enemy: CombatantView,
}

impl BattleMirror {
    pub fn from_view(view: BattleSessionView) -> Self {
        Self {
            battle_id: view.battle_id,
            player_id: view.player_id,
            battle_type: view.battle_type,
            turn: view.turn,
            phase: view.phase,
            outcome: view.outcome,
            player: view.player,
            enemy: view.enemy,
        }
    }

    pub fn player_creature_id(&self) -> &CreatureId {
        &self.player.creature_id
    }

    pub fn is_ended(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn knows_move(&self, move_id: &MoveId) -> bool {
        self.player.move_view(move_id).is_some()
    }

    /// Remaining PP of one of the player's moves
    pub fn pp(&self, move_id: &MoveId) -> Option<u8> {
        self.player.move_view(move_id).map(|m| m.current_pp)
    }

    /// Apply a resolved turn
    pub fn apply_turn(&mut self, result: &TurnResult) {
        self.player.current_hp = result.attacker_hp.min(self.player.max_hp);
        self.enemy.current_hp = result.target_hp.min(self.enemy.max_hp);

        if result.player_moves.is_empty() {
            spend_pp(&mut self.player, &result.move_id);
        } else {
            self.player.moves = result.player_moves.clone();
        }
        if let Some(enemy_action) = &result.enemy_action {
            spend_pp(&mut self.enemy, &enemy_action.move_id);
        }

        self.turn = result.turn;
        self.outcome = result.outcome;
        self.phase = match result.battle_status {
            BattleStatus::Ended => Phase::Ended,
            BattleStatus::InProgress => Phase::SelectingCommand,
        };
    }

    /// Record an end acknowledged by the server
    pub fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Ended;
        self.outcome = Some(outcome);
    }
}

fn spend_pp(combatant: &mut CombatantView, move_id: &MoveId) {
    if let Some(m) = combatant.moves.iter_mut().find(|m| &m.move_id == move_id) {
        m.current_pp = m.current_pp.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_protocol::{ActionSummary, Effectiveness, MoveView, Winner};

    fn move_view(id: &str, pp: u8) -> MoveView {
        MoveView {
            move_id: id.into(),
            name: id.to_string(),
            element: "Normal".to_string(),
            power: 40,
            accuracy: 100,
            current_pp: pp,
            max_pp: 35,
        }
    }

    fn combatant(id: &str, hp: u32) -> CombatantView {
        CombatantView {
            creature_id: id.into(),
            species: id.to_string(),
            level: 10,
            types: vec!["Normal".to_string()],
            current_hp: hp,
            max_hp: hp,
            moves: vec![move_view("tackle", 35), move_view("growl", 40)],
        }
    }

    fn mirror() -> BattleMirror {
        BattleMirror::from_view(BattleSessionView {
            battle_id: BattleId::new(),
            player_id: "player-1".into(),
            battle_type: BattleType::Wild,
            turn: 1,
            phase: Phase::SelectingCommand,
            outcome: None,
            player: combatant("starter-1", 45),
            enemy: combatant("wild-7", 35),
        })
    }

    fn turn_result(status: BattleStatus) -> TurnResult {
        TurnResult {
            move_id: "tackle".into(),
            move_name: "Tackle".to_string(),
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
            enemy_action: Some(ActionSummary {
                move_id: "growl".into(),
                move_name: "Growl".to_string(),
                hit: true,
                critical: false,
                effectiveness: Effectiveness::Normal,
                damage: 0,
            }),
            player_moves: Vec::new(),
        }
    }

    #[test]
    fn test_apply_turn_without_move_list() {
        let mut mirror = mirror();
        mirror.apply_turn(&turn_result(BattleStatus::InProgress));

        assert_eq!(mirror.player.current_hp, 39);
        assert_eq!(mirror.enemy.current_hp, 25);
        assert_eq!(mirror.pp(&"tackle".into()), Some(34));
        assert_eq!(mirror.pp(&"growl".into()), Some(40));
        assert_eq!(mirror.enemy.move_view(&"growl".into()).unwrap().current_pp, 39);
        assert_eq!(mirror.turn, 2);
        assert_eq!(mirror.phase, Phase::SelectingCommand);
    }

    #[test]
    fn test_apply_turn_prefers_server_pp() {
        let mut mirror = mirror();
        let mut result = turn_result(BattleStatus::Ended);
        result.player_moves = vec![move_view("tackle", 12), move_view("growl", 40)];
        result.winner = Some(Winner::Player);
        result.outcome = Some(Outcome::PlayerWon);

        mirror.apply_turn(&result);

        assert_eq!(mirror.pp(&"tackle".into()), Some(12));
        assert_eq!(mirror.phase, Phase::Ended);
        assert_eq!(mirror.outcome, Some(Outcome::PlayerWon));
        assert!(mirror.is_ended());
    }

    #[test]
    fn test_finish() {
        let mut mirror = mirror();
        mirror.finish(Outcome::PlayerFled);
        assert!(mirror.is_ended());
        assert_eq!(mirror.outcome, Some(Outcome::PlayerFled));
        assert!(mirror.knows_move(&"growl".into()));
        assert!(!mirror.knows_move(&"ember".into()));
    }
}
