use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::GameResult;
use crate::game::types::Position;

/// Snapshot published on `/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub game_id: Uuid,
    /// Rounds resolved so far.
    pub rounds_played: u32,
    pub max_round: u32,
    pub live_tanks_a: usize,
    pub live_tanks_b: usize,
    pub flags_a: u32,
    pub flags_b: u32,
    pub flag_pos: Option<Position>,
    pub finished: bool,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct RoundCompleted(pub GameStatus);

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct GameFinished(pub GameResult);

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "GameStatus")]
pub struct GetStatus;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Option<GameResult>")]
pub struct GetResult;
