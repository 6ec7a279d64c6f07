use crate::{
    error::GameError,
    models::{game::Game, player::Outbound, room::RoomSummary},
    services::game_service::{self, Session},
    state::AppState,
};

pub async fn create_room(state: &AppState) -> String {
    let room_id = uuid::Uuid::new_v4().simple().to_string();
    let game = Game::new(room_id.clone(), state.config.as_ref().clone());
    state
        .rooms
        .lock()
        .await
        .insert(room_id.clone(), game_service::new_session(game));
    log::info!("room {} created", room_id);
    room_id
}

pub async fn get_session(state: &AppState, room_id: &str) -> Result<Session, GameError> {
    state
        .rooms
        .lock()
        .await
        .get(room_id)
        .cloned()
        .ok_or_else(|| GameError::RoomNotFound(room_id.to_string()))
}

pub async fn join_room(
    state: &AppState,
    room_id: &str,
    name: &str,
    outbound: Outbound,
) -> Result<String, GameError> {
    let session = get_session(state, room_id).await?;
    game_service::join(&session, name, outbound).await
}

pub async fn leave_room(state: &AppState, room_id: &str, player_id: &str) -> Result<(), GameError> {
    let session = get_session(state, room_id).await?;
    game_service::disconnect(&session, player_id).await;
    Ok(())
}

pub async fn get_room_info(state: &AppState, room_id: &str) -> Result<RoomSummary, GameError> {
    let session = get_session(state, room_id).await?;
    let game = session.lock().await;
    Ok(RoomSummary::of(&game))
}

pub async fn get_rooms(state: &AppState) -> Vec<RoomSummary> {
    // release the registry before touching any game lock
    let sessions: Vec<Session> = state.rooms.lock().await.values().cloned().collect();

    let mut rooms = Vec::with_capacity(sessions.len());
    for session in sessions {
        rooms.push(RoomSummary::of(&*session.lock().await));
    }
    rooms.sort_by(|a, b| a.room_id.cmp(&b.room_id));
    rooms
}

pub async fn delete_room(state: &AppState, room_id: &str) -> bool {
    let removed = state.rooms.lock().await.remove(room_id).is_some();
    if removed {
        log::info!("room {} deleted", room_id);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::GameConfig;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_create_and_join_room() {
        let state = AppState::with_config(GameConfig::default());
        let room_id = create_room(&state).await;

        let (tx, _rx) = mpsc::unbounded_channel();
        let player_id = join_room(&state, &room_id, "alice", tx).await.unwrap();
        assert!(!player_id.is_empty());

        let info = get_room_info(&state, &room_id).await.unwrap();
        assert_eq!(info.players, 1);
        assert!(info.is_open());
    }

    #[tokio::test]
    async fn test_join_unknown_room() {
        let state = AppState::with_config(GameConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let err = join_room(&state, "nope", "alice", tx).await.unwrap_err();
        assert_eq!(err, GameError::RoomNotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn test_rooms_are_independent() {
        let state = AppState::with_config(GameConfig::default());
        let first = create_room(&state).await;
        let second = create_room(&state).await;

        let (tx, _rx) = mpsc::unbounded_channel();
        join_room(&state, &first, "alice", tx.clone()).await.unwrap();
        // same name is fine in another room
        join_room(&state, &second, "alice", tx).await.unwrap();

        assert_eq!(get_rooms(&state).await.len(), 2);
        assert!(delete_room(&state, &first).await);
        assert!(!delete_room(&state, &first).await);
        assert_eq!(get_rooms(&state).await.len(), 1);
    }
}
