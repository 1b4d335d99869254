/// Main configuration module.
///
/// Re-exports submodules for game rules, networking and process options.
pub mod game;
pub mod network;
pub mod options;
