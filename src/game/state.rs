use serde::{Deserialize, Serialize};

use crate::game::entities::{Shell, Tank};
use crate::game::types::{Direction, Position, TankId};

/// What one player is allowed to see at the start of a round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub tanks: Vec<TankView>,
    pub shells: Vec<ShellView>,
    pub your_flags: u32,
    pub enemy_flags: u32,
    pub flag_pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankView {
    pub id: TankId,
    pub pos: Position,
    pub dir: Direction,
    pub hp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellView {
    pub id: TankId,
    pub pos: Position,
    pub dir: Direction,
}

impl From<&Tank> for TankView {
    fn from(tank: &Tank) -> Self {
        Self {
            id: tank.id(),
            pos: tank.pos(),
            dir: tank.dir(),
            hp: tank.hp(),
        }
    }
}

impl From<&Shell> for ShellView {
    fn from(shell: &Shell) -> Self {
        Self {
            id: shell.id(),
            pos: shell.pos(),
            dir: shell.dir(),
        }
    }
}
