pub mod chat;
pub mod config;
pub mod game;
pub mod messages;
pub mod player;
pub mod role;
pub mod room;
pub mod roster;
