//! A whole match: connect, play, settle.

use actix::Addr;
use log::{error, info};

use super::messages::GameFinished;
use super::result::GameResult;
use super::server::GameSession;
use crate::game::types::Side;
use crate::server::player_channel::PlayerChannel;
use crate::server::player_channel::connect::join_players;
use crate::server::status::StatusBoard;

pub async fn run_match(session: GameSession, status_board: Addr<StatusBoard>) -> GameResult {
    let session = session.with_status_board(status_board.clone());
    let options = session.options.clone();

    let result = match join_players(&options.player_a, &options.player_b, options.round_timeout()).await {
        (Some(transport_a), Some(transport_b)) => {
            info!("[GameSession] Connected to both players");
            let players = [
                PlayerChannel::spawn(options.player_a.clone(), transport_a, session.setup_for(Side::A)),
                PlayerChannel::spawn(options.player_b.clone(), transport_b, session.setup_for(Side::B)),
            ];
            session.play(players).await
        }
        (a, b) => {
            let result = GameResult::forfeit(&options.player_a, &options.player_b, a.is_some(), b.is_some());
            error!("[GameSession] game_id={} not played: {:?}", session.game_id, result.reason);
            result
        }
    };

    status_board.do_send(GameFinished(result.clone()));
    result
}
