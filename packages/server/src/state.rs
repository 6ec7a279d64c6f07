use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

use crate::models::config::GameConfig;
use crate::services::game_service::Session;

/// Session registry. The map lock is only held to find or insert a
/// session; each game has its own lock.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<Mutex<HashMap<String, Session>>>,
    pub config: Arc<GameConfig>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(GameConfig::from_env())
    }

    pub fn with_config(config: GameConfig) -> Self {
        AppState {
            rooms: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
