//! Status board actor.
//!
//! Holds the latest round summary and, once the game is settled, its result.
//! HTTP handlers query it; the game session feeds it.

use actix::prelude::*;
use log::info;
use uuid::Uuid;

use crate::server::game_session::messages::{GameFinished, GameStatus, GetResult, GetStatus, RoundCompleted};
use crate::server::game_session::result::GameResult;

pub struct StatusBoard {
    status: GameStatus,
    result: Option<GameResult>,
}

impl StatusBoard {
    pub fn new(game_id: Uuid, max_round: u32) -> Self {
        Self {
            status: GameStatus {
                game_id,
                rounds_played: 0,
                max_round,
                live_tanks_a: 0,
                live_tanks_b: 0,
                flags_a: 0,
                flags_b: 0,
                flag_pos: None,
                finished: false,
            },
            result: None,
        }
    }
}

impl Actor for StatusBoard {
    type Context = Context<Self>;
}

impl Handler<RoundCompleted> for StatusBoard {
    type Result = ();

    fn handle(&mut self, msg: RoundCompleted, _: &mut Context<Self>) {
        self.status = msg.0;
    }
}

impl Handler<GameFinished> for StatusBoard {
    type Result = ();

    fn handle(&mut self, msg: GameFinished, _: &mut Context<Self>) {
        info!("[StatusBoard] game_id={} finished", self.status.game_id);
        self.status.finished = true;
        self.result = Some(msg.0);
    }
}

impl Handler<GetStatus> for StatusBoard {
    type Result = MessageResult<GetStatus>;

    fn handle(&mut self, _: GetStatus, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.status.clone())
    }
}

impl Handler<GetResult> for StatusBoard {
    type Result = MessageResult<GetResult>;

    fn handle(&mut self, _: GetResult, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.result.clone())
    }
}
