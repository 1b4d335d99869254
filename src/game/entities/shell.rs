use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::game::types::{Direction, Position, TankId};

/// A shell in flight. It keeps the id of the tank that fired it and never turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shell {
    body: Body,
}

impl Shell {
    pub fn new(id: TankId, pos: Position, dir: Direction) -> Self {
        Self {
            body: Body::new(id, pos, dir),
        }
    }

    pub fn id(&self) -> TankId {
        self.body.id()
    }

    pub fn pos(&self) -> Position {
        self.body.pos()
    }

    pub fn dir(&self) -> Direction {
        self.body.dir()
    }

    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }

    pub(crate) fn advance(&mut self) {
        self.body.advance();
    }

    pub(crate) fn destroy(&mut self) {
        self.body.destroy();
    }
}
