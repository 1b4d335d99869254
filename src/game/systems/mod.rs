//! Resolution phases, one module per phase.

pub mod ballistics;
pub mod fire;
pub mod flag;
pub mod movement;
pub mod turn;

pub use ballistics::*;
pub use fire::*;
pub use flag::*;
pub use movement::*;
pub use turn::*;
