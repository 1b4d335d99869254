//! In-memory transport for driving channels and sessions in tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::transport::{GameParams, PlayerTransport, TransportError};
use crate::game::orders::WireOrder;
use crate::game::state::GameState;
use crate::game::types::TankId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UploadMap,
    UploadParams,
    AssignTanks(Vec<TankId>),
    LatestState(GameState),
    NextOrders,
}

/// Answers `next_orders` from a script, then with empty batches once the script runs out.
pub struct ScriptedTransport {
    replies: VecDeque<Result<Vec<WireOrder>, TransportError>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<Vec<WireOrder>, TransportError>>) -> Self {
        Self {
            replies: replies.into(),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PlayerTransport for ScriptedTransport {
    async fn upload_map(&mut self, _: &[Vec<u8>]) -> Result<(), TransportError> {
        self.record(Call::UploadMap);
        Ok(())
    }

    async fn upload_params(&mut self, _: &GameParams) -> Result<(), TransportError> {
        self.record(Call::UploadParams);
        Ok(())
    }

    async fn assign_tanks(&mut self, tanks: &[TankId]) -> Result<(), TransportError> {
        self.record(Call::AssignTanks(tanks.to_vec()));
        Ok(())
    }

    async fn latest_state(&mut self, state: &GameState) -> Result<(), TransportError> {
        self.record(Call::LatestState(state.clone()));
        Ok(())
    }

    async fn next_orders(&mut self) -> Result<Vec<WireOrder>, TransportError> {
        self.record(Call::NextOrders);
        self.replies.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}
