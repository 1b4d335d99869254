//! Game entities module.
//!
//! Tanks and shells share a `Body` for position, facing and lifecycle; players
//! own a fixed set of tank ids.

pub mod body;
pub mod player;
pub mod shell;
pub mod tank;

pub use body::*;
pub use player::*;
pub use shell::*;
pub use tank::*;
