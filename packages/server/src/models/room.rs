use serde::{Deserialize, Serialize};

use super::game::{Game, GamePhase, GameResult};

/// Public summary of one room, safe to show to anyone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSummary {
    pub room_id: String,
    pub phase: GamePhase,
    pub day: u32,
    pub players: usize,
    pub alive: usize,
    pub max_players: usize,
    pub result: GameResult,
}

impl RoomSummary {
    pub fn of(game: &Game) -> Self {
        RoomSummary {
            room_id: game.room_id.clone(),
            phase: game.phase,
            day: game.day_count,
            players: game.roster.count(),
            alive: game.roster.alive_count(),
            max_players: game.config.max_players,
            result: game.result,
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase == GamePhase::Lobby && self.players < self.max_players
    }
}
