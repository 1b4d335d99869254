//! Authoritative game state and the per-round resolution.
//!
//! [`StateMachine::apply`] runs the phases of a round in a fixed order, each one
//! finishing before the next starts:
//!
//! 1. shells in flight advance, sub-step by sub-step
//! 2. new shells are fired
//! 3. tanks turn
//! 4. tanks move, sub-step by sub-step
//!
//! Within a phase, orders are taken in submission order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::entities::{Player, Shell, Tank};
use crate::game::error::EngineError;
use crate::game::grid::GameMap;
use crate::game::orders::TankOrder;
use crate::game::replay::{ReplayFrame, ReplayShell, ReplayTank, Status};
use crate::game::state::{GameState, ShellView, TankView};
use crate::game::systems::{check_flag, resolve_fire, resolve_moves, resolve_shells, resolve_turns};
use crate::game::types::{Position, Side, TankId};

/// Per-round step counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub tank_speed: u32,
    pub shell_speed: u32,
}

/// What happened during one call to [`StateMachine::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    pub destroyed_tanks: Vec<TankId>,
    pub destroyed_shells: usize,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub a: u32,
    pub b: u32,
}

pub struct StateMachine {
    pub(crate) map: GameMap,
    pub(crate) rules: Rules,
    pub(crate) tanks: BTreeMap<TankId, Tank>,
    pub(crate) shells: Vec<Shell>,
    pub(crate) flag: Option<Position>,
    pub(crate) players: [Player; 2],
    destroyed_tanks: Vec<Tank>,
    destroyed_shells: Vec<Shell>,
    replay: Vec<ReplayFrame>,
    replay_step: u32,
}

impl StateMachine {
    pub fn new(map: GameMap, tanks: impl IntoIterator<Item = Tank>, players: [Player; 2], rules: Rules) -> Self {
        Self {
            map,
            rules,
            tanks: tanks.into_iter().map(|tank| (tank.id(), tank)).collect(),
            shells: Vec::new(),
            flag: None,
            players,
            destroyed_tanks: Vec::new(),
            destroyed_shells: Vec::new(),
            replay: Vec::new(),
            replay_step: 1,
        }
    }

    /// Resolve one round of orders. Orders for tanks that are gone are ignored.
    pub fn apply(&mut self, orders: &[TankOrder]) -> Result<RoundOutcome, EngineError> {
        self.destroyed_tanks.clear();
        self.destroyed_shells.clear();

        resolve_shells(self)?;
        resolve_fire(self, orders)?;
        resolve_turns(self, orders);
        resolve_moves(self, orders)?;

        Ok(RoundOutcome {
            destroyed_tanks: self.destroyed_tanks.iter().map(Tank::id).collect(),
            destroyed_shells: self.destroyed_shells.len(),
            game_over: self.game_over(),
        })
    }

    /// Put a flag on the map center. A tank already standing there takes it at once.
    pub fn generate_flag(&mut self) -> Position {
        let pos = self.map.center();
        self.flag = Some(pos);
        log::info!("[Engine] Generate flag at ({}, {})", pos.row, pos.col);
        check_flag(self);
        pos
    }

    /// The view sent to `side`: its own tanks, visible enemy tanks and shells, and the flag.
    pub fn report_state(&self, side: Side) -> GameState {
        let me = self.player(side);
        let enemy = self.player(side.other());

        let mut tanks: Vec<TankView> = me
            .tanks()
            .iter()
            .filter_map(|id| self.live_tank(*id))
            .map(TankView::from)
            .collect();
        tanks.extend(
            enemy
                .tanks()
                .iter()
                .filter_map(|id| self.live_tank(*id))
                .filter(|tank| self.map.is_visible(tank.pos()))
                .map(TankView::from),
        );

        // The flag is shared with both players whatever the terrain under it.
        GameState {
            tanks,
            shells: self
                .shells
                .iter()
                .filter(|shell| self.map.is_visible(shell.pos()))
                .map(ShellView::from)
                .collect(),
            your_flags: me.captures(),
            enemy_flags: enemy.captures(),
            flag_pos: self.flag,
        }
    }

    /// True once either side has no tank left.
    pub fn game_over(&self) -> bool {
        Side::BOTH.into_iter().any(|side| self.live_tanks_of(side) == 0)
    }

    pub fn count_score(&self, tank_score: u32, flag_score: u32) -> Scores {
        let score = |side: Side| {
            self.live_tanks_of(side) as u32 * tank_score + self.player(side).captures() * flag_score
        };
        Scores {
            a: score(Side::A),
            b: score(Side::B),
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn live_tanks_of(&self, side: Side) -> usize {
        self.player(side)
            .tanks()
            .iter()
            .filter(|id| self.live_tank(**id).is_some())
            .count()
    }

    pub fn live_tank_count(&self) -> usize {
        self.tanks.values().filter(|tank| !tank.is_destroyed()).count()
    }

    pub fn tank(&self, id: TankId) -> Option<&Tank> {
        self.tanks.get(&id)
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn flag(&self) -> Option<Position> {
        self.flag
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    /// Take the replay frames captured since the last call.
    pub fn drain_replay(&mut self) -> Vec<ReplayFrame> {
        std::mem::take(&mut self.replay)
    }

    /// Capture the current state, including what was destroyed this round.
    pub fn record_frame(&mut self) {
        let mut tanks: Vec<ReplayTank> = self
            .tanks
            .values()
            .chain(&self.destroyed_tanks)
            .map(|tank| ReplayTank {
                id: tank.id(),
                dir: tank.dir(),
                pos: tank.pos(),
                status: Status::of(tank.is_destroyed()),
                owner: self.owner_name(tank.id()),
            })
            .collect();
        tanks.sort_by_key(|tank| tank.id);

        let mut shells: Vec<ReplayShell> = self
            .shells
            .iter()
            .chain(&self.destroyed_shells)
            .map(|shell| ReplayShell {
                id: shell.id(),
                dir: shell.dir(),
                pos: shell.pos(),
                status: Status::of(shell.is_destroyed()),
            })
            .collect();
        shells.sort_by_key(|shell| shell.id);

        self.replay.push(ReplayFrame {
            step: self.replay_step,
            tanks,
            shells,
            flag: self.flag,
        });
        self.replay_step += 1;
    }

    pub(crate) fn live_tank(&self, id: TankId) -> Option<&Tank> {
        self.tanks.get(&id).filter(|tank| !tank.is_destroyed())
    }

    pub(crate) fn live_tank_mut(&mut self, id: TankId) -> Option<&mut Tank> {
        self.tanks.get_mut(&id).filter(|tank| !tank.is_destroyed())
    }

    pub(crate) fn owner_of(&self, id: TankId) -> Option<Side> {
        self.players.iter().find(|player| player.owns(id)).map(|player| player.side)
    }

    fn owner_name(&self, id: TankId) -> String {
        self.owner_of(id)
            .map(|side| self.player(side).name.clone())
            .unwrap_or_default()
    }

    /// The tank on `pos`, destroyed or not, as long as it has not been purged yet.
    pub(crate) fn tank_at(&self, pos: Position) -> Result<Option<TankId>, EngineError> {
        let found: Vec<TankId> = self
            .tanks
            .values()
            .filter(|tank| tank.pos() == pos)
            .map(Tank::id)
            .collect();
        match found.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(EngineError::StackedTanks { pos, tanks: found }),
        }
    }

    pub(crate) fn hit(&mut self, id: TankId) {
        if let Some(tank) = self.tanks.get_mut(&id) {
            tank.hit();
        }
    }

    /// Move destroyed tanks and shells out of the live sets and record a frame.
    pub(crate) fn purge(&mut self) {
        let dead: Vec<TankId> = self
            .tanks
            .values()
            .filter(|tank| tank.is_destroyed())
            .map(Tank::id)
            .collect();
        for id in dead {
            if let Some(tank) = self.tanks.remove(&id) {
                log::info!("[Engine] Tank {} destroyed at ({}, {})", id, tank.pos().row, tank.pos().col);
                self.destroyed_tanks.push(tank);
            }
        }

        let (gone, live): (Vec<Shell>, Vec<Shell>) =
            std::mem::take(&mut self.shells).into_iter().partition(Shell::is_destroyed);
        self.shells = live;
        for shell in &gone {
            if let Some(owner) = self.tanks.get_mut(&shell.id()) {
                owner.shell_gone();
            }
        }
        self.destroyed_shells.extend(gone);

        self.record_frame();
    }

    #[cfg(test)]
    pub(crate) fn tank_mut(&mut self, id: TankId) -> &mut Tank {
        self.tanks.get_mut(&id).expect("tank exists")
    }

    #[cfg(test)]
    pub(crate) fn add_tank(&mut self, tank: Tank) {
        self.tanks.insert(tank.id(), tank);
    }

    #[cfg(test)]
    pub(crate) fn add_shell(&mut self, shell: Shell) {
        self.shells.push(shell);
    }
}
