//! Player-facing calls.
//!
//! The game session never talks to a player directly: a [`PlayerChannel`](super::channel::PlayerChannel)
//! drives one of these transports on its behalf.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::options::GameOptions;
use crate::game::orders::WireOrder;
use crate::game::state::GameState;
use crate::game::types::TankId;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no reply within {0:?}")]
    Timeout(Duration),

    #[error("connection closed by player")]
    Closed,

    #[error("malformed message: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),
}

/// Game parameters uploaded to each player once, before the first round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParams {
    pub tank_speed: u32,
    pub shell_speed: u32,
    pub tank_hp: u32,
    pub tank_score: u32,
    pub flag_score: u32,
    pub max_round: u32,
    pub round_timeout_ms: u64,
}

impl From<&GameOptions> for GameParams {
    fn from(options: &GameOptions) -> Self {
        Self {
            tank_speed: options.tank_speed,
            shell_speed: options.shell_speed,
            tank_hp: options.tank_hp,
            tank_score: options.tank_score,
            flag_score: options.flag_score,
            max_round: options.max_round,
            round_timeout_ms: options.round_timeout_ms,
        }
    }
}

/// Everything a player receives before the first round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub map: Vec<Vec<u8>>,
    pub params: GameParams,
    pub tanks: Vec<TankId>,
}

/// The calls the server makes on a remote player.
#[allow(async_fn_in_trait)]
pub trait PlayerTransport {
    async fn upload_map(&mut self, map: &[Vec<u8>]) -> Result<(), TransportError>;

    async fn upload_params(&mut self, params: &GameParams) -> Result<(), TransportError>;

    async fn assign_tanks(&mut self, tanks: &[TankId]) -> Result<(), TransportError>;

    async fn latest_state(&mut self, state: &GameState) -> Result<(), TransportError>;

    async fn next_orders(&mut self) -> Result<Vec<WireOrder>, TransportError>;
}

/// Send map, parameters and tank assignment, in that order.
pub async fn upload_setup<T: PlayerTransport>(transport: &mut T, setup: &GameSetup) -> Result<(), TransportError> {
    transport.upload_map(&setup.map).await?;
    transport.upload_params(&setup.params).await?;
    transport.assign_tanks(&setup.tanks).await
}

/// One round trip: push the state, then ask for orders.
pub async fn exchange<T: PlayerTransport>(
    transport: &mut T,
    state: &GameState,
) -> Result<Vec<WireOrder>, TransportError> {
    transport.latest_state(state).await?;
    transport.next_orders().await
}
