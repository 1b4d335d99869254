/// Game rule constants.
///
/// This module defines the fixed parts of the rules that are not passed on the
/// command line: the tank limit and the starting layout.
use crate::game::types::Position;

/// Maximum number of tanks a single side may field.
pub const MAX_TANKS_PER_SIDE: u32 = 5;

/// Spawn cells for side A, in tank id order. Side B is mirrored through the map center.
pub const BURN_POSITIONS: [Position; MAX_TANKS_PER_SIDE as usize] = [
    Position::new(1, 1),
    Position::new(1, 2),
    Position::new(2, 1),
    Position::new(2, 2),
    Position::new(1, 3),
];
