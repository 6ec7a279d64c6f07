use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::GameError,
    models::game::{GamePhase, GameResult},
    services::{game_service, room_service},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct PhaseAdvanceResponse {
    pub advanced: bool,
    pub phase: Option<GamePhase>,
    pub day: Option<u32>,
    pub result: Option<GameResult>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .nest(
            "/:roomid",
            Router::new()
                .route("/state", get(get_game_state))
                // debug: end the current night or day now
                .route("/phase/next", post(advance_phase_handler)),
        )
        .with_state(state)
}

async fn get_game_state(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, GameError> {
    let summary = room_service::get_room_info(&state, &room_id).await?;
    Ok((StatusCode::OK, Json(summary)))
}

async fn advance_phase_handler(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, GameError> {
    if !state.config.manual_advance {
        return Err(GameError::ManualAdvanceDisabled);
    }
    let session = room_service::get_session(&state, &room_id).await?;
    let response = match game_service::force_next_phase(&session).await {
        Some(transition) => PhaseAdvanceResponse {
            advanced: true,
            phase: Some(transition.to),
            day: Some(transition.day),
            result: Some(transition.result),
        },
        None => PhaseAdvanceResponse {
            advanced: false,
            phase: None,
            day: None,
            result: None,
        },
    };
    Ok((StatusCode::OK, Json(response)))
}
