//! Turning tanks.

use crate::game::engine::StateMachine;
use crate::game::orders::{OrderKind, TankOrder};

/// Turning in place is always allowed.
pub fn resolve_turns(sm: &mut StateMachine, orders: &[TankOrder]) {
    for order in orders {
        if let OrderKind::TurnTo(dir) = order.kind {
            if let Some(tank) = sm.live_tank_mut(order.tank_id) {
                tank.turn_to(dir);
            }
        }
    }
}
