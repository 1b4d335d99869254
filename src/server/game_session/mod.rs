//! Game orchestration: the round loop, the flag schedule and the final result.

pub mod flag_schedule;
pub mod lifecycle;
pub mod messages;
pub mod result;
pub mod server;
pub mod turn_resolution;

pub use lifecycle::run_match;
pub use server::GameSession;
