use serde::{Deserialize, Serialize};

use super::{
    chat::ChatMessage,
    game::{GamePhase, GameResult, NightActionKind},
    role::Role,
};
use crate::rules::view::GameView;

/// Inbound intent from one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    SetReady {
        ready: bool,
    },
    NightAction {
        action: NightActionKind,
        target_id: String,
    },
    Vote {
        target_id: String,
    },
    StartGame,
    Chat {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyPlayer {
    pub id: String,
    pub name: String,
    pub ready: bool,
    pub is_host: bool,
}

/// Outbound notification to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    HostStatus {
        is_host: bool,
    },
    LobbyState {
        players: Vec<LobbyPlayer>,
        can_start: bool,
    },
    RoleAssigned {
        role: Role,
    },
    PhaseChanged {
        phase: GamePhase,
        day: u32,
        killed: Option<String>,
        eliminated: Option<String>,
    },
    GameState {
        view: GameView,
    },
    GameEnded {
        result: GameResult,
    },
    Chat {
        line: ChatMessage,
    },
    // sent once on join
    ChatHistory {
        lines: Vec<ChatMessage>,
    },
    Notice {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_wire_format() {
        let intent: Intent = serde_json::from_str(
            r#"{"type":"night_action","action":"kill","target_id":"abc"}"#,
        )
        .unwrap();
        assert_eq!(
            intent,
            Intent::NightAction {
                action: NightActionKind::Kill,
                target_id: "abc".to_string()
            }
        );

        let start: Intent = serde_json::from_str(r#"{"type":"start_game"}"#).unwrap();
        assert_eq!(start, Intent::StartGame);
    }

    #[test]
    fn test_phase_changed_wire_format() {
        let json = serde_json::to_value(ServerMessage::PhaseChanged {
            phase: GamePhase::Day,
            day: 2,
            killed: Some("p1".to_string()),
            eliminated: None,
        })
        .unwrap();
        assert_eq!(json["type"], "phase_changed");
        assert_eq!(json["phase"], "day");
        assert_eq!(json["killed"], "p1");
    }
}
