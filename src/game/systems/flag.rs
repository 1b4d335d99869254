use crate::game::engine::StateMachine;

/// A tank standing on the flag captures it for its owner.
pub fn check_flag(sm: &mut StateMachine) {
    let Some(flag) = sm.flag else {
        return;
    };
    let Some(tank) = sm.tanks.values().find(|tank| tank.pos() == flag).map(|tank| tank.id()) else {
        return;
    };

    sm.flag = None;
    if let Some(side) = sm.owner_of(tank) {
        sm.players[side.index()].capture_flag(tank);
    }
}
