//! Round start and resolution for [`GameSession`].
//!
//! A round pushes the state to both channels and parks the actor on the two
//! order batches; resolution applies them, maybe spawns a flag and either
//! starts the next round or settles the game.

use actix::prelude::*;
use log::{debug, error, info};

use super::result::GameResult;
use super::server::GameSession;
use crate::game::orders::TankOrder;
use crate::game::types::Side;

/// Push the state for `round` and wait for both batches, or settle once every round is played.
pub fn start_round(this: &mut GameSession, ctx: &mut Context<GameSession>, round: u32) {
    if round >= this.options.max_round {
        finish(this, ctx, false);
        return;
    }
    let Some(mut players) = this.players.take() else {
        error!("[GameSession] game_id={} has no player channels", this.game_id);
        settle_aborted(this, ctx, "player channels missing");
        return;
    };
    debug!("[GameSession] game_id={} round {} starts", this.game_id, round);

    for side in Side::BOTH {
        let player = &mut players[side.index()];
        let stale = player.drain_stale();
        if stale > 0 {
            debug!("[GameSession] Dropped {} stale batch(es) from {}", stale, player.address);
        }
        player.push_state(round, this.engine.report_state(side));
    }

    let ceiling = this.options.order_wait_ceiling();
    let collect = async move {
        let [player_a, player_b] = &mut players;
        let (mut orders, orders_b) = tokio::join!(
            player_a.next_orders(round, ceiling),
            player_b.next_orders(round, ceiling),
        );
        orders.extend(orders_b);
        (players, orders)
    };
    ctx.wait(collect.into_actor(this).map(move |(players, orders), act, ctx| {
        act.players = Some(players);
        resolve_round(act, ctx, round, orders);
    }));
}

/// Side A's orders are applied before side B's.
pub fn resolve_round(this: &mut GameSession, ctx: &mut Context<GameSession>, round: u32, orders: Vec<TankOrder>) {
    let outcome = match this.engine.apply(&orders) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("[GameSession] game_id={} aborted in round {}: {}", this.game_id, round, err);
            settle_aborted(this, ctx, format!("internal error: {err}"));
            return;
        }
    };
    this.log_replay();
    this.rounds_played = round + 1;

    if !outcome.destroyed_tanks.is_empty() {
        info!("[GameSession] Round {}: tanks destroyed {:?}", round, outcome.destroyed_tanks);
    }
    if outcome.game_over {
        info!("[GameSession] game_id={} over after round {}", this.game_id, round);
        this.publish_status();
        finish(this, ctx, true);
        return;
    }
    if this.flag_schedule.is_due(round, this.engine.live_tank_count()) {
        this.engine.generate_flag();
    }
    this.publish_status();
    start_round(this, ctx, round + 1);
}

fn finish(this: &mut GameSession, ctx: &mut Context<GameSession>, ended_early: bool) {
    this.engine.record_frame();
    this.log_replay();
    let result = this.calculate_result(ended_early);
    this.settle(ctx, result);
}

fn settle_aborted(this: &mut GameSession, ctx: &mut Context<GameSession>, reason: impl Into<String>) {
    this.settle(ctx, GameResult::aborted(reason));
}
