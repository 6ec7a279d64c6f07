use serde::Serialize;
use tokio::sync::mpsc;

use super::{messages::ServerMessage, role::Role};

/// Per-player outbound notification channel.
pub type Outbound = mpsc::UnboundedSender<ServerMessage>;

#[derive(Clone, Debug, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub is_dead: bool,
    pub is_ready: bool,
    #[serde(skip)]
    pub outbound: Option<Outbound>,
}

impl Player {
    pub fn new(name: String, outbound: Option<Outbound>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            role: Role::Unassigned,
            is_dead: false,
            is_ready: false,
            outbound,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn is_connected(&self) -> bool {
        self.outbound.is_some()
    }

    /// Best-effort delivery. A closed channel marks the player disconnected
    /// and is not retried.
    pub fn send(&mut self, message: ServerMessage) -> bool {
        let Some(tx) = &self.outbound else {
            return false;
        };
        if tx.send(message).is_err() {
            log::warn!("dropping outbound channel of player {} ({})", self.id, self.name);
            self.outbound = None;
            return false;
        }
        true
    }
}
