//! Player channels.
//!
//! Each remote player is reached through a [`PlayerChannel`] actor wrapping a
//! [`PlayerTransport`]. The game session only holds the [`PlayerHandle`].

pub mod channel;
pub mod connect;
pub mod handle;
pub mod messages;
pub mod tcp;
pub mod transport;

#[cfg(test)]
pub(crate) mod scripted;

pub use channel::PlayerChannel;
pub use handle::PlayerHandle;
pub use transport::{GameParams, GameSetup};
