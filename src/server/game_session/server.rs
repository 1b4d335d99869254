//! The round orchestrator.
//!
//! A [`GameSession`] actor owns the engine and drives both player channels
//! through the rounds: push the state, collect both batches, resolve, maybe
//! spawn a flag. It never talks to a transport directly.

use actix::prelude::*;
use log::{error, info, warn};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::flag_schedule::FlagSchedule;
use super::messages::{GameStatus, RoundCompleted};
use super::result::GameResult;
use super::turn_resolution::start_round;
use crate::config::game::BURN_POSITIONS;
use crate::config::options::GameOptions;
use crate::game::engine::{Rules, StateMachine};
use crate::game::entities::{Player, Tank};
use crate::game::grid::GameMap;
use crate::game::types::{Direction, Position, Side, TankId};
use crate::server::player_channel::{GameParams, GameSetup, PlayerHandle};
use crate::server::status::StatusBoard;

/// Starting layouts the map cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("tank {tank} would start off the {size}x{size} map at {pos:?}")]
    OffGrid { tank: TankId, pos: Position, size: usize },

    #[error("tank {tank} would start on a barrier at {pos:?}")]
    OnBarrier { tank: TankId, pos: Position },

    #[error("tanks {first} and {second} would both start at {pos:?}")]
    Shared { first: TankId, second: TankId, pos: Position },
}

pub struct GameSession {
    pub game_id: Uuid,
    pub options: GameOptions,
    pub engine: StateMachine,
    pub(super) flag_schedule: FlagSchedule,
    pub(super) players: Option<[PlayerHandle; 2]>,
    pub(super) rounds_played: u32,
    status_board: Option<Addr<StatusBoard>>,
    result_tx: Option<oneshot::Sender<GameResult>>,
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[GameSession] game_id={} starts: {} vs {}, {} rounds",
            self.game_id, self.options.player_a, self.options.player_b, self.options.max_round
        );
        self.engine.record_frame();
        self.log_replay();
        start_round(self, ctx, 0);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        if let Some(result_tx) = self.result_tx.take() {
            warn!("[GameSession] game_id={} stopped before settling", self.game_id);
            let _ = result_tx.send(GameResult::aborted("game session stopped"));
        }
    }
}

impl GameSession {
    /// Build the session, refusing maps whose starting cells cannot hold every tank.
    pub fn new(game_id: Uuid, options: GameOptions, map: GameMap) -> Result<Self, LayoutError> {
        let n = options.tanks_per_side;
        let tanks = spawn_tanks(&options, &map)?;
        let players = [
            Player::new(Side::A, options.player_a.clone(), 1..=n),
            Player::new(Side::B, options.player_b.clone(), n + 1..=2 * n),
        ];
        let rules = Rules {
            tank_speed: options.tank_speed,
            shell_speed: options.shell_speed,
        };
        Ok(Self {
            game_id,
            flag_schedule: FlagSchedule::new(options.max_round, n),
            engine: StateMachine::new(map, tanks, players, rules),
            options,
            players: None,
            rounds_played: 0,
            status_board: None,
            result_tx: None,
        })
    }

    pub fn with_status_board(mut self, status_board: Addr<StatusBoard>) -> Self {
        self.status_board = Some(status_board);
        self
    }

    /// What `side` receives before the first round.
    pub fn setup_for(&self, side: Side) -> GameSetup {
        GameSetup {
            map: self.engine.map().codes(),
            params: GameParams::from(&self.options),
            tanks: self.engine.player(side).tanks().iter().copied().collect(),
        }
    }

    /// Start the session actor and wait for the game to settle.
    pub async fn play(mut self, players: [PlayerHandle; 2]) -> GameResult {
        let (result_tx, result_rx) = oneshot::channel();
        self.players = Some(players);
        self.result_tx = Some(result_tx);
        let _session = self.start();
        result_rx
            .await
            .unwrap_or_else(|_| GameResult::aborted("game session dropped its result"))
    }

    /// Flags only count when the game went the full distance.
    pub fn calculate_result(&self, ended_early: bool) -> GameResult {
        let flag_score = if ended_early { 0 } else { self.options.flag_score };
        let scores = self.engine.count_score(self.options.tank_score, flag_score);
        GameResult::from_scores(&self.options.player_a, &self.options.player_b, scores)
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            game_id: self.game_id,
            rounds_played: self.rounds_played,
            max_round: self.options.max_round,
            live_tanks_a: self.engine.live_tanks_of(Side::A),
            live_tanks_b: self.engine.live_tanks_of(Side::B),
            flags_a: self.engine.player(Side::A).captures(),
            flags_b: self.engine.player(Side::B).captures(),
            flag_pos: self.engine.flag(),
            finished: false,
        }
    }

    pub(super) fn publish_status(&self) {
        if let Some(board) = &self.status_board {
            board.do_send(RoundCompleted(self.status()));
        }
    }

    /// Write the frames captured since the last call to the `replay` log target.
    pub(super) fn log_replay(&mut self) {
        for frame in self.engine.drain_replay() {
            match serde_json::to_string(&frame) {
                Ok(json) => info!(target: "replay", "{}", json),
                Err(err) => warn!("[GameSession] Failed to encode replay frame {}: {}", frame.step, err),
            }
        }
    }

    /// Close both channels, hand the result over and stop.
    pub(super) fn settle(&mut self, ctx: &mut Context<Self>, result: GameResult) {
        if let Some(players) = &self.players {
            for player in players {
                player.stop();
            }
        }
        match serde_json::to_string(&result) {
            Ok(json) => info!("[GameSession] game_id={} result: {}", self.game_id, json),
            Err(_) => info!("[GameSession] game_id={} result: {:?}", self.game_id, result),
        }
        info!(
            "[GameSession] game_id={} played {} round(s), {} flag(s) generated",
            self.game_id,
            self.rounds_played,
            self.flag_schedule.generated()
        );
        if let Some(result_tx) = self.result_tx.take() {
            if result_tx.send(result).is_err() {
                error!("[GameSession] game_id={} result had no reader", self.game_id);
            }
        }
        ctx.stop();
    }
}

/// Side A starts on the fixed cells facing down, side B on their mirror image facing up.
pub fn spawn_tanks(options: &GameOptions, map: &GameMap) -> Result<Vec<Tank>, LayoutError> {
    let n = options.tanks_per_side as usize;
    let last = map.size() as i32 - 1;
    let spawn = |id: TankId, pos: Position, dir: Direction| Tank::new(id, pos, dir, options.tank_hp);

    let side_a = BURN_POSITIONS.iter().take(n).zip(1..).map(|(pos, id)| spawn(id, *pos, Direction::Down));
    let side_b = BURN_POSITIONS
        .iter()
        .take(n)
        .zip(options.tanks_per_side + 1..)
        .map(|(pos, id)| spawn(id, Position::new(last - pos.row, last - pos.col), Direction::Up));
    let tanks: Vec<Tank> = side_a.chain(side_b).collect();

    for (i, tank) in tanks.iter().enumerate() {
        let pos = tank.pos();
        if map.cell(pos).is_none() {
            return Err(LayoutError::OffGrid { tank: tank.id(), pos, size: map.size() });
        }
        if map.is_barrier(pos) {
            return Err(LayoutError::OnBarrier { tank: tank.id(), pos });
        }
        if let Some(other) = tanks[..i].iter().find(|other| other.pos() == pos) {
            return Err(LayoutError::Shared { first: other.id(), second: tank.id(), pos });
        }
    }
    Ok(tanks)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::game::entities::Shell;
    use crate::game::orders::{TankOrder, WireOrder};
    use crate::game::state::GameState;
    use crate::server::game_session::messages::GetStatus;
    use crate::server::game_session::result::Outcome;
    use crate::server::player_channel::PlayerChannel;
    use crate::server::player_channel::scripted::{Call, ScriptedTransport};
    use crate::server::player_channel::transport::TransportError;

    type Script = Vec<Result<Vec<WireOrder>, TransportError>>;

    fn open_map(size: usize) -> GameMap {
        let row = vec!["0"; size].join(" ");
        let text = format!("size: {size}\n{}", vec![row; size].join("\n"));
        text.parse().unwrap()
    }

    fn options(tanks_per_side: u32, max_round: u32) -> GameOptions {
        GameOptions {
            map_file: PathBuf::from("unused"),
            tanks_per_side,
            tank_speed: 1,
            shell_speed: 1,
            tank_hp: 1,
            tank_score: 1,
            flag_score: 1,
            max_round,
            round_timeout_ms: 200,
            player_a: "a:1".into(),
            player_b: "b:2".into(),
        }
    }

    fn players(session: &GameSession, script_a: Script, script_b: Script) -> ([PlayerHandle; 2], Arc<Mutex<Vec<Call>>>) {
        let a = ScriptedTransport::new(script_a);
        let b = ScriptedTransport::new(script_b);
        let calls_a = a.calls();
        let handles = [
            PlayerChannel::spawn("a:1".into(), a, session.setup_for(Side::A)),
            PlayerChannel::spawn("b:2".into(), b, session.setup_for(Side::B)),
        ];
        (handles, calls_a)
    }

    fn batch(orders: &[TankOrder]) -> Result<Vec<WireOrder>, TransportError> {
        Ok(orders.iter().copied().map(WireOrder::from).collect())
    }

    fn states(calls: &Mutex<Vec<Call>>) -> Vec<GameState> {
        calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                Call::LatestState(state) => Some(state.clone()),
                _ => None,
            })
            .collect()
    }

    /// Walk `tank` onto the map center, drop a flag under it and walk it back.
    fn capture_flag_with(session: &mut GameSession, tank: TankId) {
        let home = session.engine.tank(tank).unwrap().pos();
        let center = session.engine.map().center();
        session.engine.tank_mut(tank).move_to(center);
        session.engine.generate_flag();
        session.engine.tank_mut(tank).move_to(home);
    }

    /// Tank 2 drives left along row 6 into the shell tank 1 drops down column 1.
    fn shootout() -> (Script, Script) {
        let script_a = vec![batch(&[]), batch(&[TankOrder::fire(1, Direction::Down)])];
        let mut script_b = vec![batch(&[TankOrder::turn_to(2, Direction::Left)])];
        script_b.extend((0..5).map(|_| batch(&[TankOrder::moving(2)])));
        (script_a, script_b)
    }

    #[test]
    fn spawns_mirrored_sides() {
        let tanks = spawn_tanks(&options(2, 10), &open_map(20)).unwrap();
        let layout: Vec<(TankId, Position, Direction)> = tanks.iter().map(|t| (t.id(), t.pos(), t.dir())).collect();
        assert_eq!(
            layout,
            vec![
                (1, Position::new(1, 1), Direction::Down),
                (2, Position::new(1, 2), Direction::Down),
                (3, Position::new(18, 18), Direction::Up),
                (4, Position::new(18, 17), Direction::Up),
            ]
        );
    }

    #[test]
    fn rejects_layouts_the_map_cannot_hold() {
        assert_eq!(
            spawn_tanks(&options(1, 10), &open_map(3)).unwrap_err(),
            LayoutError::Shared { first: 1, second: 2, pos: Position::new(1, 1) }
        );

        let walled: GameMap = "size: 5\n0 0 0 0 0\n0 0 0 0 0\n0 0 0 0 0\n0 0 0 1 0\n0 0 0 0 0\n".parse().unwrap();
        assert_eq!(
            spawn_tanks(&options(1, 10), &walled).unwrap_err(),
            LayoutError::OnBarrier { tank: 2, pos: Position::new(3, 3) }
        );

        assert!(matches!(
            spawn_tanks(&options(5, 10), &open_map(2)).unwrap_err(),
            LayoutError::OffGrid { .. }
        ));
        assert!(GameSession::new(Uuid::new_v4(), options(1, 10), open_map(3)).is_err());
    }

    #[actix_web::test]
    async fn idle_players_draw_and_see_the_flag() {
        let board = StatusBoard::new(Uuid::new_v4(), 4).start();
        let session = GameSession::new(Uuid::new_v4(), options(1, 4), open_map(8))
            .unwrap()
            .with_status_board(board.clone());
        // Side B tries to move side A's tank; the batch is dropped.
        let (handles, calls_a) = players(&session, vec![], vec![batch(&[TankOrder::moving(1)])]);

        let result = session.play(handles).await;

        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.summary, "A: 1,B: 1");

        let states = states(&calls_a);
        assert_eq!(states.len(), 4);
        assert_eq!(states[3].tanks[0].pos, Position::new(1, 1));
        assert_eq!(states[2].flag_pos, None);
        assert_eq!(states[3].flag_pos, Some(Position::new(4, 4)));

        let status = board.send(GetStatus).await.unwrap();
        assert_eq!(status.rounds_played, 4);
        assert_eq!(status.flag_pos, Some(Position::new(4, 4)));
    }

    #[actix_web::test]
    async fn shot_tank_ends_the_game_early() {
        let board = StatusBoard::new(Uuid::new_v4(), 10).start();
        let session = GameSession::new(Uuid::new_v4(), options(1, 10), open_map(8))
            .unwrap()
            .with_status_board(board.clone());
        let (script_a, script_b) = shootout();
        let (handles, _) = players(&session, script_a, script_b);

        let result = session.play(handles).await;

        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.winner.as_deref(), Some("a:1"));
        assert_eq!(result.summary, "A: 1,B: 0");
        let status = board.send(GetStatus).await.unwrap();
        assert_eq!(status.rounds_played, 6);
        assert_eq!(status.live_tanks_b, 0);
    }

    #[actix_web::test]
    async fn flags_are_worthless_when_the_game_ends_early() {
        let mut session = GameSession::new(Uuid::new_v4(), options(1, 10), open_map(8)).unwrap();
        capture_flag_with(&mut session, 1);
        assert_eq!(session.engine.player(Side::A).captures(), 1);
        let (script_a, script_b) = shootout();
        let (handles, _) = players(&session, script_a, script_b);

        let result = session.play(handles).await;

        assert_eq!(result.summary, "A: 1,B: 0");
    }

    #[actix_web::test]
    async fn flags_count_when_every_round_is_played() {
        let mut session = GameSession::new(Uuid::new_v4(), options(1, 2), open_map(8)).unwrap();
        capture_flag_with(&mut session, 1);
        let (handles, _) = players(&session, vec![], vec![]);

        let result = session.play(handles).await;

        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.summary, "A: 2,B: 1");
    }

    #[test]
    fn calculate_result_drops_flag_weight_only_for_early_endings() {
        let mut session = GameSession::new(Uuid::new_v4(), options(1, 10), open_map(8)).unwrap();
        capture_flag_with(&mut session, 2);

        assert_eq!(session.calculate_result(false).summary, "A: 1,B: 2");
        assert_eq!(session.calculate_result(true).summary, "A: 1,B: 1");
    }

    #[actix_web::test]
    async fn engine_failure_settles_as_a_draw() {
        let mut session = GameSession::new(Uuid::new_v4(), options(1, 10), open_map(8)).unwrap();
        session.engine.add_tank(Tank::new(9, Position::new(1, 1), Direction::Up, 1));
        session.engine.add_shell(Shell::new(2, Position::new(2, 1), Direction::Up));
        let (handles, _) = players(&session, vec![], vec![]);

        let result = session.play(handles).await;

        assert_eq!(result.outcome, Outcome::Draw);
        assert!(result.reason.unwrap().starts_with("internal error"));
    }
}
