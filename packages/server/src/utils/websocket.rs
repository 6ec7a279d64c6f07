use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::messages::{Intent, ServerMessage};
use crate::services::{game_service, room_service};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JoinParams {
    pub name: String,
}

pub async fn handler(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Query(params): Query<JoinParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let session = match room_service::get_session(&state, &room_id).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };
    ws.on_upgrade(move |socket| handle_socket(socket, session, room_id, params.name))
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(text) => Some(Message::Text(text)),
        Err(e) => {
            warn!("failed to encode {:?}: {}", message, e);
            None
        }
    }
}

fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::SetReady { .. } => "set_ready",
        Intent::NightAction { .. } => "night_action",
        Intent::Vote { .. } => "vote",
        Intent::StartGame => "start_game",
        Intent::Chat { .. } => "chat",
    }
}

pub async fn handle_socket(
    ws: WebSocket,
    session: game_service::Session,
    room_id: String,
    name: String,
) {
    let (mut sender, mut receiver) = ws.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    let notices = tx.clone();

    let player_id = match game_service::join(&session, &name, tx).await {
        Ok(player_id) => player_id,
        Err(e) => {
            info!("room {}: refused {}: {}", room_id, name, e);
            let refusal = ServerMessage::Notice {
                message: e.to_string(),
            };
            if let Some(frame) = encode(&refusal) {
                let _ = sender.send(frame).await;
            }
            let _ = sender.close().await;
            return;
        }
    };
    info!("room {}: websocket open for {}", room_id, player_id);

    // per-recipient ordering comes from this single writer
    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let Some(frame) = encode(&message) else {
                continue;
            };
            if sender.send(frame).await.is_err() {
                break;
            }
        }
    });

    let receive_session = session.clone();
    let receive_player = player_id.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => match serde_json::from_str::<Intent>(&text) {
                    Ok(intent) => {
                        let kind = intent_name(&intent);
                        if let Err(rejection) =
                            game_service::handle_intent(&receive_session, &receive_player, intent)
                                .await
                        {
                            debug!("{} from {} refused: {}", kind, receive_player, rejection);
                        }
                    }
                    Err(e) => {
                        let _ = notices.send(ServerMessage::Notice {
                            message: format!("malformed message: {}", e),
                        });
                    }
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // whichever side finishes first takes the other down with it
    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => send_task.abort(),
    }

    game_service::disconnect(&session, &player_id).await;
    info!("room {}: websocket closed for {}", room_id, player_id);
}
