use std::time::Duration;

use actix::Recipient;
use log::{debug, warn};
use tokio::sync::mpsc;

use super::messages::{PushState, RoundOrders, StopChannel};
use crate::game::orders::TankOrder;
use crate::game::state::GameState;

/// The game session's side of a player channel.
pub struct PlayerHandle {
    pub address: String,
    state_tx: Recipient<PushState>,
    stop_tx: Recipient<StopChannel>,
    orders_rx: mpsc::UnboundedReceiver<RoundOrders>,
}

impl PlayerHandle {
    pub fn new(
        address: String,
        state_tx: Recipient<PushState>,
        stop_tx: Recipient<StopChannel>,
        orders_rx: mpsc::UnboundedReceiver<RoundOrders>,
    ) -> Self {
        Self {
            address,
            state_tx,
            stop_tx,
            orders_rx,
        }
    }

    pub fn push_state(&self, round: u32, state: GameState) {
        self.state_tx.do_send(PushState { round, state });
    }

    /// Throw away batches left over from earlier rounds.
    pub fn drain_stale(&mut self) -> usize {
        let mut dropped = 0;
        while self.orders_rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }

    /// Orders for `round`, or nothing if they do not arrive within `ceiling`.
    pub async fn next_orders(&mut self, round: u32, ceiling: Duration) -> Vec<TankOrder> {
        await_round(&mut self.orders_rx, &self.address, round, ceiling).await
    }

    pub fn stop(&self) {
        self.stop_tx.do_send(StopChannel);
    }
}

async fn await_round(
    orders_rx: &mut mpsc::UnboundedReceiver<RoundOrders>,
    address: &str,
    round: u32,
    ceiling: Duration,
) -> Vec<TankOrder> {
    let deadline = tokio::time::Instant::now() + ceiling;
    loop {
        match tokio::time::timeout_at(deadline, orders_rx.recv()).await {
            Ok(Some(batch)) if batch.round == round => return batch.orders,
            Ok(Some(batch)) => {
                debug!("[PlayerHandle] Late batch of round {} from {} ignored", batch.round, address);
            }
            Ok(None) => {
                warn!("[PlayerHandle] Channel to {} is gone", address);
                return Vec::new();
            }
            Err(_) => {
                warn!("[PlayerHandle] No orders from {} for round {} within {:?}", address, round, ceiling);
                return Vec::new();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Direction;

    #[tokio::test]
    async fn skips_batches_tagged_with_another_round() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(RoundOrders { round: 3, orders: vec![TankOrder::moving(1)] }).unwrap();
        tx.send(RoundOrders { round: 4, orders: vec![TankOrder::fire(1, Direction::Up)] }).unwrap();

        let orders = await_round(&mut rx, "a:1", 4, Duration::from_millis(200)).await;
        assert_eq!(orders, vec![TankOrder::fire(1, Direction::Up)]);
    }

    #[tokio::test]
    async fn missing_batch_is_empty_after_ceiling() {
        let (_tx, mut rx) = mpsc::unbounded_channel::<RoundOrders>();
        let orders = await_round(&mut rx, "a:1", 0, Duration::from_millis(20)).await;
        assert!(orders.is_empty());
    }
}
