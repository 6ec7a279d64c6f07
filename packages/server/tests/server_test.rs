use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mafia_server::{
    app,
    models::{config::GameConfig, game::GamePhase, room::RoomSummary},
};
use serde_json::Value;
use tower::ServiceExt;

fn app(manual_advance: bool) -> Router {
    app::create_app_with_config(GameConfig {
        manual_advance,
        ..GameConfig::default()
    })
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn create(app: &Router) -> String {
    let (status, body) = call(app, "POST", "/api/room/create").await;
    assert_eq!(status, StatusCode::OK);
    body["room_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_room_lifecycle() {
    let app = app(false);
    let room_id = create(&app).await;

    let (status, body) = call(&app, "GET", &format!("/api/game/{}/state", room_id)).await;
    assert_eq!(status, StatusCode::OK);
    let summary: RoomSummary = serde_json::from_value(body).unwrap();
    assert_eq!(summary.room_id, room_id);
    assert_eq!(summary.phase, GamePhase::Lobby);
    assert_eq!(summary.players, 0);

    let (status, body) = call(&app, "GET", "/api/room/rooms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = call(&app, "DELETE", &format!("/api/room/{}/delete", room_id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "GET", &format!("/api/game/{}/state", room_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&room_id));
}

#[tokio::test]
async fn test_manual_advance_is_gated() {
    let locked = app(false);
    let room_id = create(&locked).await;
    let (status, _) = call(&locked, "POST", &format!("/api/game/{}/phase/next", room_id)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let open = app(true);
    let room_id = create(&open).await;
    let (status, body) = call(&open, "POST", &format!("/api/game/{}/phase/next", room_id)).await;
    assert_eq!(status, StatusCode::OK);
    // nothing to resolve in the lobby
    assert_eq!(body["advanced"], Value::Bool(false));
}

#[tokio::test]
async fn test_unknown_routes() {
    let app = app(true);

    let (status, _) = call(&app, "POST", "/api/game/nope/phase/next").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", "/api/room/nope/delete").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
