//! Player channel actor.
//!
//! One actor per player. It owns the transport, so calls to a player are
//! serialized: the setup upload runs before any round, and each round trip
//! finishes before the next [`PushState`] is looked at.

use std::collections::BTreeSet;

use actix::prelude::*;
use log::{debug, info, warn};
use tokio::sync::mpsc;

use super::handle::PlayerHandle;
use super::messages::{PushState, RoundOrders, StopChannel};
use super::transport::{GameSetup, PlayerTransport, exchange, upload_setup};
use crate::game::orders::validate_batch;
use crate::game::types::TankId;

pub struct PlayerChannel<T> {
    address: String,
    owned: BTreeSet<TankId>,
    setup: GameSetup,
    /// Taken out while a call is in flight.
    transport: Option<T>,
    orders_tx: mpsc::UnboundedSender<RoundOrders>,
}

impl<T> PlayerChannel<T>
where
    T: PlayerTransport + Unpin + 'static,
{
    pub fn new(address: String, transport: T, setup: GameSetup, orders_tx: mpsc::UnboundedSender<RoundOrders>) -> Self {
        Self {
            address,
            owned: setup.tanks.iter().copied().collect(),
            setup,
            transport: Some(transport),
            orders_tx,
        }
    }

    /// Start the actor and return the handle the game session drives it with.
    pub fn spawn(address: String, transport: T, setup: GameSetup) -> PlayerHandle {
        let (orders_tx, orders_rx) = mpsc::unbounded_channel();
        let addr = Self::new(address.clone(), transport, setup, orders_tx).start();
        PlayerHandle::new(address, addr.clone().recipient(), addr.recipient(), orders_rx)
    }
}

impl<T> Actor for PlayerChannel<T>
where
    T: PlayerTransport + Unpin + 'static,
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let Some(mut transport) = self.transport.take() else {
            return;
        };
        let setup = self.setup.clone();
        ctx.wait(
            async move {
                let uploaded = upload_setup(&mut transport, &setup).await;
                (transport, uploaded)
            }
            .into_actor(self)
            .map(|(transport, uploaded), act, _| {
                match uploaded {
                    Ok(()) => info!("[PlayerChannel] Setup sent to {}", act.address),
                    Err(err) => warn!("[PlayerChannel] Failed to send setup to {}: {}", act.address, err),
                }
                act.transport = Some(transport);
            }),
        );
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        debug!("[PlayerChannel] Channel to {} closed", self.address);
    }
}

impl<T> Handler<PushState> for PlayerChannel<T>
where
    T: PlayerTransport + Unpin + 'static,
{
    type Result = AtomicResponse<Self, ()>;

    fn handle(&mut self, msg: PushState, _: &mut Self::Context) -> Self::Result {
        let PushState { round, state } = msg;
        let transport = self.transport.take();
        let owned = self.owned.clone();
        let address = self.address.clone();

        AtomicResponse::new(Box::pin(
            async move {
                let Some(mut transport) = transport else {
                    return (None, Vec::new());
                };
                let orders = match exchange(&mut transport, &state).await {
                    Ok(batch) => validate_batch(&owned, batch).unwrap_or_else(|rejection| {
                        warn!("[PlayerChannel] {} {}; batch of round {} dropped", address, rejection, round);
                        Vec::new()
                    }),
                    Err(err) => {
                        warn!("[PlayerChannel] Round {} with {} failed: {}", round, address, err);
                        Vec::new()
                    }
                };
                (Some(transport), orders)
            }
            .into_actor(self)
            .map(move |(transport, orders), act, _| {
                if transport.is_some() {
                    act.transport = transport;
                }
                if act.orders_tx.send(RoundOrders { round, orders }).is_err() {
                    debug!("[PlayerChannel] Orders of round {} from {} had no reader", round, act.address);
                }
            }),
        ))
    }
}

impl<T> Handler<StopChannel> for PlayerChannel<T>
where
    T: PlayerTransport + Unpin + 'static,
{
    type Result = ();

    fn handle(&mut self, _: StopChannel, ctx: &mut Self::Context) {
        ctx.stop();
    }
}
