//! JSON-lines transport over TCP.
//!
//! Each request is one line of JSON tagged `{"action": ..., "data": ...}`; the
//! player answers every request with exactly one line, either `Ack` or `Orders`.
//! A reply that misses its timeout is still owed and gets skipped when it
//! finally arrives, so one slow answer does not shift every later one.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use super::transport::{GameParams, PlayerTransport, TransportError};
use crate::game::orders::WireOrder;
use crate::game::state::GameState;
use crate::game::types::TankId;

#[derive(Serialize, Debug)]
#[serde(tag = "action", content = "data")]
pub enum PlayerRequest<'a> {
    UploadMap(&'a [Vec<u8>]),
    UploadParameters(&'a GameParams),
    AssignTanks(&'a [TankId]),
    LatestState(&'a GameState),
    GetNewOrders,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "action", content = "data")]
pub enum PlayerReply {
    Ack,
    Orders(Vec<WireOrder>),
}

pub struct TcpTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    timeout: Duration,
    /// Requests whose reply has not been read yet.
    owed: usize,
}

impl TcpTransport {
    /// Open a connection to `address` (`host:port`). Every read is bounded by `timeout`.
    pub async fn connect(address: &str, timeout: Duration) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(address).await?;
        stream.set_nodelay(true)?;
        Ok(Self::from_stream(stream, timeout))
    }

    pub fn from_stream(stream: TcpStream, timeout: Duration) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
            timeout,
            owed: 0,
        }
    }

    async fn call(&mut self, request: &PlayerRequest<'_>) -> Result<PlayerReply, TransportError> {
        let mut line = serde_json::to_string(request)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;

        self.owed += 1;

        loop {
            let mut reply = String::new();
            let read = tokio::time::timeout(self.timeout, self.reader.read_line(&mut reply))
                .await
                .map_err(|_| TransportError::Timeout(self.timeout))??;
            if read == 0 {
                return Err(TransportError::Closed);
            }
            self.owed -= 1;
            if self.owed == 0 {
                return Ok(serde_json::from_str(reply.trim_end())?);
            }
            debug!("[TcpTransport] Skipping late reply: {}", reply.trim_end());
        }
    }

    async fn expect_ack(&mut self, request: &PlayerRequest<'_>) -> Result<(), TransportError> {
        match self.call(request).await? {
            PlayerReply::Ack => Ok(()),
            other => Err(TransportError::UnexpectedReply(format!("{other:?}"))),
        }
    }
}

impl PlayerTransport for TcpTransport {
    async fn upload_map(&mut self, map: &[Vec<u8>]) -> Result<(), TransportError> {
        self.expect_ack(&PlayerRequest::UploadMap(map)).await
    }

    async fn upload_params(&mut self, params: &GameParams) -> Result<(), TransportError> {
        self.expect_ack(&PlayerRequest::UploadParameters(params)).await
    }

    async fn assign_tanks(&mut self, tanks: &[TankId]) -> Result<(), TransportError> {
        self.expect_ack(&PlayerRequest::AssignTanks(tanks)).await
    }

    async fn latest_state(&mut self, state: &GameState) -> Result<(), TransportError> {
        self.expect_ack(&PlayerRequest::LatestState(state)).await
    }

    async fn next_orders(&mut self) -> Result<Vec<WireOrder>, TransportError> {
        match self.call(&PlayerRequest::GetNewOrders).await? {
            PlayerReply::Orders(orders) => Ok(orders),
            other => Err(TransportError::UnexpectedReply(format!("{other:?}"))),
        }
    }
}
