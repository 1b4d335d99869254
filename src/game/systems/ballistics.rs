//! Shells in flight.

use crate::game::engine::StateMachine;
use crate::game::error::EngineError;

/// Advance every shell `shell_speed` single cells. After each cell, shells on a
/// barrier are destroyed, and shells on a tank are destroyed and hit it once.
pub fn resolve_shells(sm: &mut StateMachine) -> Result<(), EngineError> {
    for _ in 0..sm.rules.shell_speed {
        for shell in sm.shells.iter_mut() {
            shell.advance();
        }

        for i in 0..sm.shells.len() {
            let pos = sm.shells[i].pos();
            if sm.map.is_barrier(pos) {
                sm.shells[i].destroy();
            } else if let Some(tank) = sm.tank_at(pos)? {
                sm.shells[i].destroy();
                sm.hit(tank);
            }
        }

        sm.purge();
    }
    Ok(())
}
