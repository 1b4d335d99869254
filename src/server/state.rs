//! Application state for the status HTTP server.

use actix::Addr;

use crate::server::status::StatusBoard;

/// Shared application state, injected into HTTP handlers.
pub struct AppState {
    /// Address of the status board fed by the running game.
    pub status_board: Addr<StatusBoard>,
}

impl AppState {
    pub fn new(status_board: Addr<StatusBoard>) -> Self {
        AppState { status_board }
    }
}
