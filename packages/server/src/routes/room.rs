use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{error::GameError, services::room_service, state::AppState, utils::websocket};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        // curl -X POST http://localhost:8080/api/room/create
        .route("/create", post(create_room))
        // curl http://localhost:8080/api/room/rooms
        .route("/rooms", get(get_rooms))
        // curl -X DELETE http://localhost:8080/api/room/{roomid}/delete
        .route("/:roomid/delete", delete(delete_room))
        // websocat "ws://localhost:8080/api/room/{roomid}/ws?name=alice"
        .route("/:roomid/ws", get(websocket::handler))
        .with_state(state)
}

pub async fn create_room(State(state): State<AppState>) -> impl IntoResponse {
    let room_id = room_service::create_room(&state).await;
    (StatusCode::OK, Json(CreateRoomResponse { room_id }))
}

async fn get_rooms(State(state): State<AppState>) -> impl IntoResponse {
    let rooms = room_service::get_rooms(&state).await;
    (StatusCode::OK, Json(rooms))
}

async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, GameError> {
    if room_service::delete_room(&state, &room_id).await {
        Ok((
            StatusCode::OK,
            Json(format!("Room {} deleted successfully", room_id)),
        ))
    } else {
        Err(GameError::RoomNotFound(room_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{config::GameConfig, room::RoomSummary};
    use axum::{body::to_bytes, body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_create_room() {
        let state = AppState::with_config(GameConfig::default());
        let app = routes(state.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/create")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let created: CreateRoomResponse = serde_json::from_slice(&body).unwrap();
        assert!(state.rooms.lock().await.contains_key(&created.room_id));
    }

    #[tokio::test]
    async fn test_get_rooms() {
        let state = AppState::with_config(GameConfig::default());
        let app = routes(state.clone());
        let room_id = room_service::create_room(&state).await;

        let request = Request::builder()
            .method("GET")
            .uri("/rooms")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let rooms: Vec<RoomSummary> =
            serde_json::from_slice(&body).expect("Failed to parse response body");
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_id, room_id);
    }

    #[tokio::test]
    async fn test_delete_missing_room() {
        let app = routes(AppState::with_config(GameConfig::default()));

        let request = Request::builder()
            .method("DELETE")
            .uri("/missing/delete")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
