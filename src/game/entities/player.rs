use std::collections::BTreeSet;

use log::info;
use serde::{Deserialize, Serialize};

use crate::game::types::{Side, TankId};

/// One seat of the game: its address, the tanks it commands, and its captured flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub name: String,
    tanks: BTreeSet<TankId>,
    captures: u32,
}

impl Player {
    pub fn new(side: Side, name: impl Into<String>, tanks: impl IntoIterator<Item = TankId>) -> Self {
        Self {
            side,
            name: name.into(),
            tanks: tanks.into_iter().collect(),
            captures: 0,
        }
    }

    pub fn tanks(&self) -> &BTreeSet<TankId> {
        &self.tanks
    }

    pub fn owns(&self, tank: TankId) -> bool {
        self.tanks.contains(&tank)
    }

    pub fn captures(&self) -> u32 {
        self.captures
    }

    pub fn capture_flag(&mut self, tank: TankId) {
        self.captures += 1;
        info!("[Engine] {} captures a flag with tank {}", self.name, tank);
    }
}
