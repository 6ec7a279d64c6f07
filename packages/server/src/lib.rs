pub mod app;
pub mod error;
pub mod models;
pub mod routes;
pub mod rules;
pub mod services;
pub mod state;
pub mod utils;
