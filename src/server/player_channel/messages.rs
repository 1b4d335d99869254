use actix::prelude::*;

use crate::game::orders::TankOrder;
use crate::game::state::GameState;

/// Push the round's state to the player and ask for its orders.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct PushState {
    pub round: u32,
    pub state: GameState,
}

/// End of game: the channel drops its connection.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct StopChannel;

/// A validated batch, tagged with the round it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOrders {
    pub round: u32,
    pub orders: Vec<TankOrder>,
}
