use std::{net::SocketAddr, time::Duration};

use futures::{SinkExt, StreamExt};
use mafia_server::{app, utils::test_setup::setup_test_env};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> SocketAddr {
    setup_test_env();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app::create_app()).await.unwrap();
    });
    addr
}

async fn create_room(addr: SocketAddr) -> String {
    let created: Value = reqwest::Client::new()
        .post(format!("http://{}/api/room/create", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    created["room_id"].as_str().unwrap().to_string()
}

async fn connect(addr: SocketAddr, room_id: &str, name: &str) -> Client {
    let url = format!("ws://{}/api/room/{}/ws?name={}", addr, room_id, name);
    let (client, _) = connect_async(url).await.unwrap();
    client
}

/// Reads frames until one of the wanted type arrives.
async fn expect(client: &mut Client, kind: &str) -> Value {
    let wait = async {
        while let Some(frame) = client.next().await {
            if let Message::Text(text) = frame.unwrap() {
                let message: Value = serde_json::from_str(&text).unwrap();
                if message["type"] == kind {
                    return message;
                }
            }
        }
        panic!("socket closed before {}", kind);
    };
    tokio::time::timeout(Duration::from_secs(10), wait)
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {}", kind))
}

async fn say(client: &mut Client, intent: Value) {
    client
        .send(Message::Text(intent.to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_join_reports_host_and_lobby() {
    let addr = spawn_server().await;
    let room_id = create_room(addr).await;

    let mut alice = connect(addr, &room_id, "alice").await;
    assert_eq!(expect(&mut alice, "host_status").await["is_host"], true);

    let mut bob = connect(addr, &room_id, "bob").await;
    assert_eq!(expect(&mut bob, "host_status").await["is_host"], false);

    // alice hears about bob through a fresh lobby snapshot
    expect(&mut alice, "lobby_state").await;
    let lobby = expect(&mut alice, "lobby_state").await;
    assert_eq!(lobby["players"].as_array().unwrap().len(), 2);
    assert_eq!(lobby["can_start"], false);
}

#[tokio::test]
async fn test_duplicate_name_is_refused() {
    let addr = spawn_server().await;
    let room_id = create_room(addr).await;

    let _alice = connect(addr, &room_id, "alice").await;
    let mut impostor = connect(addr, &room_id, "alice").await;
    let notice = expect(&mut impostor, "notice").await;
    assert!(notice["message"].as_str().unwrap().contains("alice"));
}

#[tokio::test]
async fn test_malformed_intent_gets_notice() {
    let addr = spawn_server().await;
    let room_id = create_room(addr).await;

    let mut alice = connect(addr, &room_id, "alice").await;
    expect(&mut alice, "lobby_state").await;
    alice
        .send(Message::Text("{\"type\":\"dance\"}".to_string()))
        .await
        .unwrap();
    let notice = expect(&mut alice, "notice").await;
    assert!(notice["message"].as_str().unwrap().starts_with("malformed"));
}

#[tokio::test]
async fn test_out_of_phase_intent_gets_notice() {
    let addr = spawn_server().await;
    let room_id = create_room(addr).await;

    let mut alice = connect(addr, &room_id, "alice").await;
    expect(&mut alice, "lobby_state").await;
    say(&mut alice, json!({"type": "vote", "target_id": "anyone"})).await;
    let notice = expect(&mut alice, "notice").await;
    assert!(notice["message"].as_str().unwrap().contains("Lobby"));
}

#[tokio::test]
async fn test_four_player_game_plays_out() {
    let addr = spawn_server().await;
    let room_id = create_room(addr).await;

    let mut clients = Vec::new();
    for name in ["alice", "bob", "carol", "dave"] {
        let mut client = connect(addr, &room_id, name).await;
        expect(&mut client, "host_status").await;
        clients.push(client);
    }
    for client in clients.iter_mut() {
        say(client, json!({"type": "set_ready", "ready": true})).await;
    }
    // wait for the last ready flag to land before the host starts
    loop {
        let lobby = expect(&mut clients[0], "lobby_state").await;
        if lobby["can_start"] == true {
            break;
        }
    }
    say(&mut clients[0], json!({"type": "start_game"})).await;

    for client in clients.iter_mut() {
        let assigned = expect(client, "role_assigned").await;
        assert!(["don", "mafia", "sheriff", "civilian"]
            .contains(&assigned["role"].as_str().unwrap()));
        let night = expect(client, "phase_changed").await;
        assert_eq!(night["phase"], "night");
        assert_eq!(night["day"], 1);
    }

    // two mafia against two civilians is already parity, so the first
    // night timer ends the game
    for client in clients.iter_mut() {
        let ended = expect(client, "game_ended").await;
        assert_eq!(ended["result"], "mafia_win");
        let view = expect(client, "game_state").await;
        assert_eq!(view["view"]["phase"], "ended");
        assert!(view["view"]["players"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| !p["role"].is_null()));
    }
}
