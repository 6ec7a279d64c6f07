use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("room {0} not found")]
    RoomNotFound(String),
    #[error("the game has already started")]
    GameInProgress,
    #[error("a player named {0} is already in the room")]
    NameTaken(String),
    #[error("player name must not be empty")]
    InvalidName,
    #[error("the room is full ({0} players)")]
    RoomFull(usize),
    #[error("manual phase advance is disabled")]
    ManualAdvanceDisabled,
}

impl GameError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            GameError::GameInProgress | GameError::NameTaken(_) | GameError::RoomFull(_) => {
                StatusCode::CONFLICT
            }
            GameError::InvalidName => StatusCode::BAD_REQUEST,
            GameError::ManualAdvanceDisabled => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));
        (self.status_code(), body).into_response()
    }
}
