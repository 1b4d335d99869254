//! Fire resolution.

use log::debug;

use crate::game::engine::StateMachine;
use crate::game::error::EngineError;
use crate::game::orders::{OrderKind, TankOrder};

/// Spawn the requested shells, then check where they landed.
///
/// Every shell exists before any of them is checked, so a tank killed by a
/// shell fired this round still gets its own shot out.
pub fn resolve_fire(sm: &mut StateMachine, orders: &[TankOrder]) -> Result<(), EngineError> {
    let mut fresh = Vec::new();
    for order in orders {
        let OrderKind::Fire(dir) = order.kind else {
            continue;
        };
        let Some(tank) = sm.live_tank_mut(order.tank_id) else {
            continue;
        };
        if let Some(shell) = tank.fire(dir) {
            debug!("[Engine] Tank {} fires {:?} from ({}, {})", order.tank_id, dir, tank.pos().row, tank.pos().col);
            fresh.push(shell);
        }
    }

    for shell in fresh.iter_mut() {
        let pos = shell.pos();
        if sm.map.is_barrier(pos) {
            shell.destroy();
        } else if let Some(tank) = sm.tank_at(pos)? {
            shell.destroy();
            sm.hit(tank);
        }
    }

    sm.shells.extend(fresh);
    sm.purge();
    Ok(())
}
