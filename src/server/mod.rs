//! Server layer root module.
//!
//! This module organizes the backend server components:
//! - Player channels (transport, connection, per-player actor)
//! - Game session orchestration (round loop, flags, result)
//! - Status board and the read-only HTTP routes
//! - Result callback

pub mod callback;
pub mod game_session;
pub mod http_error;
pub mod player_channel;
pub mod router;
pub mod state;
pub mod status;
