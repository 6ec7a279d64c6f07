use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::{
    chat::{ChatLog, ChatMessage, ChatMessageType},
    config::GameConfig,
    player::{Outbound, Player},
    role::Verdict,
    roster::Roster,
};
use crate::error::GameError;
use crate::rules::{
    assignment, day,
    night::{self, NightOutcome},
    victory,
    view::{self, GameView},
};

/// viewer id -> (checked player id -> verdict)
pub type Investigations = HashMap<String, HashMap<String, Verdict>>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Lobby, // waiting for players to ready up
    Night,
    Day,
    Ended,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    InProgress,
    MafiaWin,
    CivilianWin,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NightActionKind {
    Kill,  // mafia and don
    Check, // sheriff and don
}

#[derive(Debug, Clone, Default)]
pub struct NightActions {
    pub kills: HashMap<String, String>,
    pub checks: HashMap<String, String>,
}

impl NightActions {
    pub fn is_empty(&self) -> bool {
        self.kills.is_empty() && self.checks.is_empty()
    }

    pub fn clear(&mut self) {
        self.kills.clear();
        self.checks.clear();
    }
}

/// Why an intent was dropped. Never fatal; at most echoed back to the sender.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,
    #[error("not allowed during the {0:?} phase")]
    WrongPhase(GamePhase),
    #[error("unknown player")]
    UnknownPlayer,
    #[error("dead players cannot act")]
    PlayerDead,
    #[error("your role cannot do that")]
    NotPermitted,
    #[error("only the host can start the game")]
    NotHost,
    #[error("at least {0} players are needed")]
    NotEnoughPlayers(usize),
    #[error("not every player is ready")]
    NotAllReady,
    #[error("invalid target")]
    InvalidTarget,
    #[error("empty message")]
    EmptyMessage,
}

/// Result of resolving a night or a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: GamePhase,
    pub to: GamePhase,
    pub day: u32,
    pub killed: Option<String>,
    pub eliminated: Option<String>,
    pub result: GameResult,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub room_id: String,
    pub phase: GamePhase,
    // bumped on every phase change; timers compare against it
    pub phase_seq: u64,
    pub day_count: u32,
    pub result: GameResult,
    pub host_id: Option<String>,
    pub roster: Roster,
    pub night_actions: NightActions,
    pub votes: HashMap<String, String>,
    pub investigations: Investigations,
    pub chat_log: ChatLog,
    pub config: GameConfig,
}

impl Game {
    pub fn new(room_id: String, config: GameConfig) -> Self {
        Game {
            chat_log: ChatLog::new(room_id.clone()),
            room_id,
            phase: GamePhase::Lobby,
            phase_seq: 0,
            day_count: 0,
            result: GameResult::InProgress,
            host_id: None,
            roster: Roster::new(),
            night_actions: NightActions::default(),
            votes: HashMap::new(),
            investigations: Investigations::new(),
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    pub fn is_host(&self, player_id: &str) -> bool {
        self.host_id.as_deref() == Some(player_id)
    }

    /// Adds a player to the lobby and returns the new player id. The first
    /// player to join becomes host.
    pub fn join(&mut self, name: &str, outbound: Option<Outbound>) -> Result<String, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidName);
        }
        if self.phase != GamePhase::Lobby {
            return Err(GameError::GameInProgress);
        }
        if self.roster.contains_name(name) {
            return Err(GameError::NameTaken(name.to_string()));
        }
        if self.roster.count() >= self.config.max_players {
            return Err(GameError::RoomFull(self.config.max_players));
        }

        let player = Player::new(name.to_string(), outbound);
        let player_id = player.id.clone();
        self.roster.add(player);
        if self.host_id.is_none() {
            self.host_id = Some(player_id.clone());
        }
        Ok(player_id)
    }

    /// Drops a player from the roster. Once the game has ended the roster is
    /// frozen, so only the outbound channel is released.
    pub fn leave(&mut self, player_id: &str) -> bool {
        if self.is_over() {
            if let Some(player) = self.roster.get_mut(player_id) {
                player.outbound = None;
            }
            return false;
        }

        let removed = self.roster.remove(player_id).is_some();
        if removed && self.is_host(player_id) {
            self.host_id = self.roster.first().map(|p| p.id.clone());
        }
        removed
    }

    pub fn can_start(&self) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.phase != GamePhase::Lobby {
            return Err(Rejection::WrongPhase(self.phase));
        }
        if self.roster.count() < self.config.min_players {
            return Err(Rejection::NotEnoughPlayers(self.config.min_players));
        }
        if self.roster.ready_count() != self.roster.count() {
            return Err(Rejection::NotAllReady);
        }
        Ok(())
    }

    /// Lobby -> Night. Deals roles and opens day 1.
    pub fn start<R: Rng + ?Sized>(&mut self, requester: &str, rng: &mut R) -> Result<(), Rejection> {
        self.can_start()?;
        if !self.roster.contains(requester) {
            return Err(Rejection::UnknownPlayer);
        }
        if !self.is_host(requester) {
            return Err(Rejection::NotHost);
        }
        if !assignment::assign_roles(&mut self.roster, rng) {
            return Err(Rejection::NotEnoughPlayers(self.config.min_players));
        }

        self.day_count = 1;
        self.enter_phase(GamePhase::Night);
        self.chat_log
            .add_system_message("Night 1 falls over the town".to_string());
        log::info!(
            "room {}: game started with {} players",
            self.room_id,
            self.roster.count()
        );
        Ok(())
    }

    pub fn set_ready(&mut self, player_id: &str, ready: bool) -> Result<(), Rejection> {
        self.expect_phase(GamePhase::Lobby)?;
        let player = self
            .roster
            .get_mut(player_id)
            .ok_or(Rejection::UnknownPlayer)?;
        player.is_ready = ready;
        Ok(())
    }

    pub fn submit_night_action(
        &mut self,
        actor_id: &str,
        action: NightActionKind,
        target_id: &str,
    ) -> Result<(), Rejection> {
        self.expect_phase(GamePhase::Night)?;
        let actor = self.living_actor(actor_id)?;
        let permitted = match action {
            NightActionKind::Kill => actor.role.can_kill(),
            NightActionKind::Check => actor.role.can_check(),
        };
        if !permitted {
            return Err(Rejection::NotPermitted);
        }
        if !self.roster.is_alive(target_id) {
            return Err(Rejection::InvalidTarget);
        }

        let intents = match action {
            NightActionKind::Kill => &mut self.night_actions.kills,
            NightActionKind::Check => &mut self.night_actions.checks,
        };
        intents.insert(actor_id.to_string(), target_id.to_string());
        Ok(())
    }

    pub fn submit_vote(&mut self, voter_id: &str, target_id: &str) -> Result<(), Rejection> {
        self.expect_phase(GamePhase::Day)?;
        self.living_actor(voter_id)?;
        if !self.roster.is_alive(target_id) {
            return Err(Rejection::InvalidTarget);
        }
        self.votes
            .insert(voter_id.to_string(), target_id.to_string());
        Ok(())
    }

    /// Records a chat line. Night chat is a mafia-only channel.
    pub fn post_chat(&mut self, author_id: &str, text: &str) -> Result<ChatMessage, Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejection::EmptyMessage);
        }
        let author = self.living_actor(author_id)?;
        let message_type = match self.phase {
            GamePhase::Night if author.role.is_mafia_aligned() => ChatMessageType::Mafia,
            GamePhase::Night => return Err(Rejection::NotPermitted),
            _ => ChatMessageType::Public,
        };

        let content: String = text.chars().take(self.config.max_chat_len).collect();
        let message = ChatMessage::new(
            author.id.clone(),
            author.name.clone(),
            content,
            message_type,
        );
        self.chat_log.add_message(message.clone());
        Ok(message)
    }

    /// Resolves the current night or day and moves to the next phase.
    /// Lobby and Ended have nothing to resolve.
    pub fn advance(&mut self) -> Option<Transition> {
        match self.phase {
            GamePhase::Night => Some(self.end_night()),
            GamePhase::Day => Some(self.end_day()),
            GamePhase::Lobby | GamePhase::Ended => None,
        }
    }

    fn end_night(&mut self) -> Transition {
        let NightOutcome { killed, checks } = night::resolve_night(
            &mut self.roster,
            &mut self.night_actions,
            &mut self.investigations,
        );
        log::debug!(
            "room {}: night {} resolved with {} checks",
            self.room_id,
            self.day_count,
            checks.len()
        );

        let line = match killed.as_deref().and_then(|id| self.roster.get(id)) {
            Some(victim) => format!("{} was killed during the night", victim.name),
            None => "Nobody died tonight".to_string(),
        };
        self.chat_log.add_system_message(line);

        self.votes.clear();
        let result = victory::check_winner(&self.roster);
        self.conclude(GamePhase::Night, result, killed, None)
    }

    fn end_day(&mut self) -> Transition {
        let outcome = day::resolve_day(&mut self.roster, &mut self.votes);

        let line = match outcome.eliminated.as_deref().and_then(|id| self.roster.get(id)) {
            Some(player) => format!("The town eliminated {}", player.name),
            None => "The town could not agree on anyone".to_string(),
        };
        self.chat_log.add_system_message(line);

        let result = victory::check_winner(&self.roster);
        self.conclude(GamePhase::Day, result, None, outcome.eliminated)
    }

    fn conclude(
        &mut self,
        from: GamePhase,
        result: GameResult,
        killed: Option<String>,
        eliminated: Option<String>,
    ) -> Transition {
        let to = if result != GameResult::InProgress {
            self.result = result;
            self.chat_log.add_system_message(match result {
                GameResult::MafiaWin => "The mafia takes the town".to_string(),
                _ => "The town is free of the mafia".to_string(),
            });
            log::info!("room {}: game over, {:?}", self.room_id, result);
            GamePhase::Ended
        } else if from == GamePhase::Night {
            GamePhase::Day
        } else {
            self.day_count += 1;
            self.chat_log
                .add_system_message(format!("Night {} falls over the town", self.day_count));
            GamePhase::Night
        };

        self.enter_phase(to);
        Transition {
            from,
            to,
            day: self.day_count,
            killed,
            eliminated,
            result,
        }
    }

    fn enter_phase(&mut self, phase: GamePhase) {
        log::info!(
            "room {}: {:?} -> {:?} (day {})",
            self.room_id,
            self.phase,
            phase,
            self.day_count
        );
        self.phase = phase;
        self.phase_seq += 1;
    }

    fn expect_phase(&self, phase: GamePhase) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.phase != phase {
            return Err(Rejection::WrongPhase(self.phase));
        }
        Ok(())
    }

    fn living_actor(&self, player_id: &str) -> Result<&Player, Rejection> {
        let player = self.roster.get(player_id).ok_or(Rejection::UnknownPlayer)?;
        if player.is_dead {
            return Err(Rejection::PlayerDead);
        }
        Ok(player)
    }

    /// How long the current phase lasts before its timer fires.
    pub fn phase_duration(&self) -> Option<Duration> {
        match self.phase {
            GamePhase::Night => Some(self.config.night_duration),
            GamePhase::Day => Some(self.config.day_duration),
            GamePhase::Lobby | GamePhase::Ended => None,
        }
    }

    pub fn view_for(&self, viewer_id: &str) -> Option<GameView> {
        view::build_view(self, viewer_id)
    }
}
