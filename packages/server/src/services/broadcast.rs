//! Outbound fan-out. Every function here runs with the session lock held and
//! never waits on a player; a dead channel only affects its own player.

use crate::models::{
    chat::ChatMessage,
    game::{Game, GamePhase, Transition},
    messages::{LobbyPlayer, ServerMessage},
};

pub fn broadcast(game: &mut Game, message: ServerMessage) {
    for player in game.roster.iter_mut() {
        player.send(message.clone());
    }
}

pub fn send_to(game: &mut Game, player_id: &str, message: ServerMessage) -> bool {
    game.roster
        .get_mut(player_id)
        .is_some_and(|player| player.send(message))
}

pub fn lobby_players(game: &Game) -> Vec<LobbyPlayer> {
    game.roster
        .iter()
        .map(|p| LobbyPlayer {
            id: p.id.clone(),
            name: p.name.clone(),
            ready: p.is_ready,
            is_host: game.is_host(&p.id),
        })
        .collect()
}

pub fn broadcast_lobby(game: &mut Game) {
    let message = ServerMessage::LobbyState {
        players: lobby_players(game),
        can_start: game.can_start().is_ok(),
    };
    broadcast(game, message);
}

/// Sends every connected player the view they are allowed to see.
pub fn push_views(game: &mut Game) {
    let views: Vec<_> = game
        .roster
        .iter()
        .filter(|p| p.is_connected())
        .filter_map(|p| game.view_for(&p.id))
        .collect();

    for view in views {
        let player_id = view.your_id.clone();
        send_to(game, &player_id, ServerMessage::GameState { view });
    }
}

/// Private roles first, then the public phase change and fresh views.
pub fn announce_start(game: &mut Game) {
    for player in game.roster.iter_mut() {
        let role = player.role;
        player.send(ServerMessage::RoleAssigned { role });
    }
    let phase_changed = ServerMessage::PhaseChanged {
        phase: game.phase,
        day: game.day_count,
        killed: None,
        eliminated: None,
    };
    broadcast(game, phase_changed);
    flush_chat(game);
    push_views(game);
}

pub fn announce_transition(game: &mut Game, transition: &Transition) {
    broadcast(
        game,
        ServerMessage::PhaseChanged {
            phase: transition.to,
            day: transition.day,
            killed: transition.killed.clone(),
            eliminated: transition.eliminated.clone(),
        },
    );
    if transition.to == GamePhase::Ended {
        broadcast(
            game,
            ServerMessage::GameEnded {
                result: transition.result,
            },
        );
    }
    flush_chat(game);
    push_views(game);
}

/// Delivers every log line not yet sent, system lines included.
pub fn flush_chat(game: &mut Game) {
    for line in game.chat_log.take_undelivered() {
        deliver_chat(game, &line);
    }
}

/// The lines a newcomer may read, sent in one message.
pub fn send_history(game: &mut Game, player_id: &str) {
    let Some(role) = game.roster.get(player_id).map(|p| p.role) else {
        return;
    };
    let lines: Vec<ChatMessage> = game.chat_log.visible_to(role).into_iter().cloned().collect();
    if !lines.is_empty() {
        send_to(game, player_id, ServerMessage::ChatHistory { lines });
    }
}

/// Delivers a chat line to everyone whose role may read it.
pub fn deliver_chat(game: &mut Game, line: &ChatMessage) {
    for player in game.roster.iter_mut() {
        if line.message_type.visible_to(player.role) {
            player.send(ServerMessage::Chat { line: line.clone() });
        }
    }
}
