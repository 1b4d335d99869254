use serde::{Deserialize, Serialize};

use super::body::Body;
use super::shell::Shell;
use crate::game::types::{Direction, Position, TankId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tank {
    body: Body,
    hp: u32,
    /// Id of this tank's shell while it is still in flight.
    live_shell: Option<TankId>,
}

impl Tank {
    pub fn new(id: TankId, pos: Position, dir: Direction, hp: u32) -> Self {
        Self {
            body: Body::new(id, pos, dir),
            hp,
            live_shell: None,
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

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }

    pub fn has_live_shell(&self) -> bool {
        self.live_shell.is_some()
    }

    /// Fire one cell ahead in `dir`. Returns `None` while the previous shell is still flying.
    pub fn fire(&mut self, dir: Direction) -> Option<Shell> {
        if self.live_shell.is_some() {
            return None;
        }
        self.live_shell = Some(self.id());
        Some(Shell::new(self.id(), self.pos().step(dir), dir))
    }

    /// Lose one hit point; the tank is destroyed when none remain.
    pub fn hit(&mut self) {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.body.destroy();
        }
    }

    pub fn turn_to(&mut self, dir: Direction) {
        self.body.face(dir);
    }

    pub(crate) fn shell_gone(&mut self) {
        self.live_shell = None;
    }

    pub(crate) fn advance(&mut self) {
        self.body.advance();
    }

    pub(crate) fn withdraw(&mut self) {
        self.body.withdraw();
    }

    #[cfg(test)]
    pub(crate) fn move_to(&mut self, pos: Position) {
        self.body.place(pos);
    }
}
