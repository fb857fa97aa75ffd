// Public API for integration tests and potential library usage

pub mod broadcast;
pub mod config;
pub mod game;
pub mod phrases;
pub mod protocol;
pub mod state;
pub mod types;
pub mod ws;
