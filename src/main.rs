//! Main entry point for the tank arena server.
//!
//! Parses the game options, loads the map, starts the status HTTP server and
//! plays one match between the two configured players.

use std::io;

use actix::Actor;
use actix_web::{App, HttpServer, web};
use log::{error, info};
use uuid::Uuid;

use config::network::{IDLE_AFTER_GAME, status_bind};
use config::options::GameOptions;
use game::grid::GameMap;
use server::callback::report_result;
use server::game_session::{GameSession, run_match};
use server::status::StatusBoard;

mod config;
mod game;
mod server;


#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = GameOptions::from_args(std::env::args().skip(1)).map_err(|err| {
        error!("Invalid arguments: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    info!("Parameters parsed: {:?}", options);

    let map = GameMap::load_file(&options.map_file).map_err(|err| {
        error!("Failed to load map {}: {}", options.map_file.display(), err);
        io::Error::new(io::ErrorKind::InvalidData, err)
    })?;
    info!("Map loaded: {}x{}", map.size(), map.size());

    let game_id = Uuid::new_v4();
    let max_round = options.max_round;
    let session = GameSession::new(game_id, options, map).map_err(|err| {
        error!("Map cannot hold the starting tanks: {}", err);
        io::Error::new(io::ErrorKind::InvalidData, err)
    })?;
    let status_board = StatusBoard::new(game_id, max_round).start();

    // Shared application state for the status handlers.
    let state = web::Data::new(server::state::AppState::new(status_board.clone()));
    let bind = status_bind();
    let http = HttpServer::new(move || App::new().app_data(state.clone()).configure(server::router::config))
        .bind(&bind)?
        .run();
    let http_handle = http.handle();
    actix_web::rt::spawn(http);
    info!("Status server listening on {}", bind);

    let result = run_match(session, status_board).await;
    report_result(&result).await;

    info!("Game finished; serving status for another {:?}", IDLE_AFTER_GAME);
    actix_web::rt::time::sleep(IDLE_AFTER_GAME).await;
    http_handle.stop(true).await;
    Ok(())
}
