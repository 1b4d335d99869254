use crate::game::types::{Position, TankId};

/// Broken engine invariants. These point at a resolution bug, never at player input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("found more than one tank at {pos:?}: {tanks:?}")]
    StackedTanks { pos: Position, tanks: Vec<TankId> },

    #[error("tanks {tanks:?} are on invalid cells and none of them moved this round")]
    UnresolvableOverlap { tanks: Vec<TankId> },
}
