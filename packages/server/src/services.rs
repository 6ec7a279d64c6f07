pub mod broadcast;
pub mod game_service;
pub mod room_service;
