use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::broadcast;
use crate::{
    error::GameError,
    models::{
        game::{Game, GamePhase, Rejection, Transition},
        messages::{Intent, ServerMessage},
        player::Outbound,
    },
};

/// One game behind its own lock. Every read or write of the game goes
/// through this mutex, timers included.
pub type Session = Arc<Mutex<Game>>;

pub fn new_session(game: Game) -> Session {
    Arc::new(Mutex::new(game))
}

pub async fn join(session: &Session, name: &str, outbound: Outbound) -> Result<String, GameError> {
    let mut game = session.lock().await;
    let player_id = game.join(name, Some(outbound))?;
    info!("room {}: {} joined as {}", game.room_id, name, player_id);

    let is_host = game.is_host(&player_id);
    broadcast::send_to(&mut game, &player_id, ServerMessage::HostStatus { is_host });
    broadcast::send_history(&mut game, &player_id);
    broadcast::broadcast_lobby(&mut game);
    Ok(player_id)
}

/// Removes a player. Never fails the game; the next resolution simply
/// ignores whatever the player left behind.
pub async fn disconnect(session: &Session, player_id: &str) {
    let mut game = session.lock().await;
    if !game.leave(player_id) {
        return;
    }
    info!("room {}: player {} left", game.room_id, player_id);

    if game.phase == GamePhase::Lobby {
        if let Some(host_id) = game.host_id.clone() {
            broadcast::send_to(&mut game, &host_id, ServerMessage::HostStatus { is_host: true });
        }
        broadcast::broadcast_lobby(&mut game);
    } else {
        broadcast::push_views(&mut game);
    }
}

/// Validates and applies one intent. Rejections leave the game untouched
/// and are echoed to the sender as a notice.
pub async fn handle_intent(
    session: &Session,
    player_id: &str,
    intent: Intent,
) -> Result<(), Rejection> {
    let mut game = session.lock().await;

    let applied = match intent {
        Intent::SetReady { ready } => game.set_ready(player_id, ready).map(|_| {
            broadcast::broadcast_lobby(&mut game);
        }),
        Intent::StartGame => {
            let started = {
                let mut rng = rand::thread_rng();
                game.start(player_id, &mut rng)
            };
            started.map(|_| {
                broadcast::announce_start(&mut game);
                arm_phase_timer(session, &game);
            })
        }
        Intent::NightAction { action, target_id } => {
            game.submit_night_action(player_id, action, &target_id)
        }
        Intent::Vote { target_id } => game.submit_vote(player_id, &target_id),
        Intent::Chat { text } => game.post_chat(player_id, &text).map(|_| {
            broadcast::flush_chat(&mut game);
        }),
    };

    if let Err(rejection) = &applied {
        debug!(
            "room {}: rejected intent from {}: {}",
            game.room_id, player_id, rejection
        );
        broadcast::send_to(
            &mut game,
            player_id,
            ServerMessage::Notice {
                message: rejection.to_string(),
            },
        );
    }
    applied
}

/// Schedules the end of the current phase. The timer remembers the phase
/// sequence number and does nothing if the phase has moved on by then.
fn arm_phase_timer(session: &Session, game: &Game) {
    let Some(duration) = game.phase_duration() else {
        return;
    };
    let seq = game.phase_seq;
    let session = Arc::clone(session);
    debug!(
        "room {}: {:?} ends in {:?} (seq {})",
        game.room_id, game.phase, duration, seq
    );

    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        advance_if_current(&session, seq).await;
    });
}

/// Resolves the phase only if it is still the one identified by `seq`.
pub async fn advance_if_current(session: &Session, seq: u64) -> Option<Transition> {
    let mut game = session.lock().await;
    if game.phase_seq != seq {
        debug!(
            "room {}: stale timer (seq {} != {})",
            game.room_id, seq, game.phase_seq
        );
        return None;
    }
    advance_locked(session, &mut game)
}

/// Ends the current night or day right away.
pub async fn force_next_phase(session: &Session) -> Option<Transition> {
    let mut game = session.lock().await;
    advance_locked(session, &mut game)
}

fn advance_locked(session: &Session, game: &mut Game) -> Option<Transition> {
    let transition = game.advance()?;
    broadcast::announce_transition(game, &transition);
    // Ended has no duration, so the timer chain stops there
    arm_phase_timer(session, game);
    Some(transition)
}
