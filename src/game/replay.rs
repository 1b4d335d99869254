//! Replay frames.
//!
//! A frame is captured every time destroyed entities are purged, so a viewer can
//! follow each sub-step. Entities destroyed earlier in the same round stay in the
//! frames with a `Destroyed` status.

use serde::{Deserialize, Serialize};

use crate::game::types::{Direction, Position, TankId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Alive,
    Destroyed,
}

impl Status {
    pub fn of(destroyed: bool) -> Self {
        if destroyed { Status::Destroyed } else { Status::Alive }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayTank {
    pub id: TankId,
    pub dir: Direction,
    pub pos: Position,
    pub status: Status,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayShell {
    pub id: TankId,
    pub dir: Direction,
    pub pos: Position,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub step: u32,
    pub tanks: Vec<ReplayTank>,
    pub shells: Vec<ReplayShell>,
    pub flag: Option<Position>,
}
