use serde::{Deserialize, Serialize};

use crate::models::{
    game::{Game, GamePhase, GameResult},
    player::Player,
    role::{Role, Verdict},
};

/// What a viewer may know about one player's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RoleReveal {
    Role(Role),
    Verdict(Verdict),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub alive: bool,
    pub role: Option<RoleReveal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub room_id: String,
    pub phase: GamePhase,
    pub day: u32,
    pub result: GameResult,
    pub your_id: String,
    pub your_role: Role,
    pub players: Vec<PlayerView>,
}

fn reveal(game: &Game, viewer: &Player, target: &Player) -> Option<RoleReveal> {
    if !target.role.is_assigned() {
        return None;
    }
    if game.phase == GamePhase::Ended || target.is_dead || target.id == viewer.id {
        return Some(RoleReveal::Role(target.role));
    }
    game.investigations
        .get(&viewer.id)
        .and_then(|checked| checked.get(&target.id))
        .map(|verdict| RoleReveal::Verdict(*verdict))
}

/// Projects the session onto what `viewer_id` is allowed to see.
pub fn build_view(game: &Game, viewer_id: &str) -> Option<GameView> {
    let viewer = game.roster.get(viewer_id)?;
    let players = game
        .roster
        .iter()
        .map(|p| PlayerView {
            id: p.id.clone(),
            name: p.name.clone(),
            alive: p.is_alive(),
            role: reveal(game, viewer, p),
        })
        .collect();

    Some(GameView {
        room_id: game.room_id.clone(),
        phase: game.phase,
        day: game.day_count,
        result: game.result,
        your_id: viewer.id.clone(),
        your_role: viewer.role,
        players,
    })
}
