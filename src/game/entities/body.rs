//! Motion and lifecycle shared by tanks and shells.

use serde::{Deserialize, Serialize};

use crate::game::types::{Direction, Position, TankId};

/// The movable part of an entity: where it is, where it faces, and whether it is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    id: TankId,
    pos: Position,
    dir: Direction,
    destroyed: bool,
}

impl Body {
    pub fn new(id: TankId, pos: Position, dir: Direction) -> Self {
        Self {
            id,
            pos,
            dir,
            destroyed: false,
        }
    }

    pub fn id(&self) -> TankId {
        self.id
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn advance(&mut self) {
        self.pos = self.pos.step(self.dir);
    }

    pub(crate) fn withdraw(&mut self) {
        self.pos = self.pos.withdraw(self.dir);
    }

    pub(crate) fn face(&mut self, dir: Direction) {
        self.dir = dir;
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, pos: Position) {
        self.pos = pos;
    }

    pub(crate) fn destroy(&mut self) {
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdraw_reverts_advance() {
        let mut body = Body::new(1, Position::new(2, 2), Direction::Down);
        body.advance();
        assert_eq!(body.pos(), Position::new(3, 2));
        body.withdraw();
        assert_eq!(body.pos(), Position::new(2, 2));
    }
}
