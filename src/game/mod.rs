//! Game rules: the world model and the round resolution engine.

pub mod engine;
pub mod entities;
pub mod error;
pub mod grid;
pub mod orders;
pub mod replay;
pub mod state;
pub mod systems;
pub mod types;
