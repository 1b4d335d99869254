//! Moving tanks.

use crate::game::engine::StateMachine;
use crate::game::error::EngineError;
use crate::game::orders::{OrderKind, TankOrder};
use crate::game::systems::flag::check_flag;
use crate::game::types::TankId;

/// Move the ordered tanks `tank_speed` single cells.
///
/// Each sub-step blocks head-on pairs, advances the rest, pulls back any mover
/// left on a barrier or on a shared cell, then checks the flag and the shells
/// under the movers.
pub fn resolve_moves(sm: &mut StateMachine, orders: &[TankOrder]) -> Result<(), EngineError> {
    let mut movers: Vec<TankId> = orders
        .iter()
        .filter(|order| order.kind == OrderKind::Move)
        .map(|order| order.tank_id)
        .filter(|id| sm.live_tank(*id).is_some())
        .collect();

    for _ in 0..sm.rules.tank_speed {
        let blocked: Vec<TankId> = movers
            .iter()
            .copied()
            .filter(|id| faces_oncoming_tank(sm, *id, &movers))
            .collect();
        movers.retain(|id| !blocked.contains(id));

        for id in &movers {
            if let Some(tank) = sm.tanks.get_mut(id) {
                tank.advance();
            }
        }
        withdraw_until_settled(sm, &mut movers)?;

        check_flag(sm);

        for id in &movers {
            let Some(pos) = sm.tanks.get(id).map(|tank| tank.pos()) else {
                continue;
            };
            let mut hits = 0;
            for shell in sm.shells.iter_mut().filter(|s| !s.is_destroyed() && s.pos() == pos) {
                shell.destroy();
                hits += 1;
            }
            for _ in 0..hits {
                sm.hit(*id);
            }
        }

        movers.retain(|id| sm.live_tank(*id).is_some());
        sm.purge();
    }
    Ok(())
}

/// True when the cell ahead of `id` holds another mover facing the opposite way.
fn faces_oncoming_tank(sm: &StateMachine, id: TankId, movers: &[TankId]) -> bool {
    let Some(tank) = sm.tanks.get(&id) else {
        return false;
    };
    let ahead = tank.pos().step(tank.dir());
    movers
        .iter()
        .filter_map(|other| sm.tanks.get(other))
        .any(|other| other.pos() == ahead && other.dir().is_opposing(tank.dir()))
}

/// Pull movers back one cell until no tank sits on a barrier or shares a cell.
///
/// Every pass retires at least one mover, so `movers.len() + 1` passes always
/// suffice; an invalid tank that did not move cannot be fixed here.
fn withdraw_until_settled(sm: &mut StateMachine, movers: &mut Vec<TankId>) -> Result<(), EngineError> {
    for _ in 0..=movers.len() {
        let invalid = invalid_tanks(sm);
        if invalid.is_empty() {
            return Ok(());
        }

        let retreating: Vec<TankId> = invalid.iter().copied().filter(|id| movers.contains(id)).collect();
        if retreating.is_empty() {
            return Err(EngineError::UnresolvableOverlap { tanks: invalid });
        }
        for id in &retreating {
            if let Some(tank) = sm.tanks.get_mut(id) {
                tank.withdraw();
            }
        }
        movers.retain(|id| !retreating.contains(id));
    }

    Err(EngineError::UnresolvableOverlap { tanks: invalid_tanks(sm) })
}

fn invalid_tanks(sm: &StateMachine) -> Vec<TankId> {
    sm.tanks
        .values()
        .filter(|tank| {
            let pos = tank.pos();
            sm.map.is_barrier(pos) || sm.tanks.values().filter(|t| t.pos() == pos).count() > 1
        })
        .map(|tank| tank.id())
        .collect()
}
