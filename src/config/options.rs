//! Process options.
//!
//! The server is started with eleven positional arguments:
//! `<map> <tanks> <tank_speed> <shell_speed> <tank_hp> <tank_score> <flag_score> <max_round> <round_timeout_ms> <player_a> <player_b>`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::game::MAX_TANKS_PER_SIDE;
use crate::config::network::ORDER_WAIT_GRACE;

/// Errors raised while reading the process arguments.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("missing argument <{0}>")]
    Missing(&'static str),

    #[error("argument <{name}> is not a valid number: '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("max no of tanks per side is 5, got {0}")]
    TooManyTanks(u32),

    #[error("argument <{0}> must be at least 1")]
    Zero(&'static str),
}

/// Parameters of one game, fixed for its whole duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub map_file: PathBuf,
    pub tanks_per_side: u32,
    pub tank_speed: u32,
    pub shell_speed: u32,
    pub tank_hp: u32,
    pub tank_score: u32,
    pub flag_score: u32,
    pub max_round: u32,
    pub round_timeout_ms: u64,
    pub player_a: String,
    pub player_b: String,
}

impl GameOptions {
    /// Parse the positional arguments (program name already skipped).
    pub fn from_args<I>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut next = |name: &'static str| args.next().ok_or(OptionsError::Missing(name));

        let map_file = PathBuf::from(next("map")?);
        let tanks_per_side = number("tanks", next("tanks")?)?;
        let tank_speed = number("tank_speed", next("tank_speed")?)?;
        let shell_speed = number("shell_speed", next("shell_speed")?)?;
        let tank_hp = number("tank_hp", next("tank_hp")?)?;
        let tank_score = number("tank_score", next("tank_score")?)?;
        let flag_score = number("flag_score", next("flag_score")?)?;
        let max_round = number("max_round", next("max_round")?)?;
        let round_timeout_ms = number("round_timeout_ms", next("round_timeout_ms")?)?;
        let player_a = next("player_a")?;
        let player_b = next("player_b")?;

        let options = Self {
            map_file,
            tanks_per_side,
            tank_speed,
            shell_speed,
            tank_hp,
            tank_score,
            flag_score,
            max_round,
            round_timeout_ms,
            player_a,
            player_b,
        };
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if self.tanks_per_side > MAX_TANKS_PER_SIDE {
            return Err(OptionsError::TooManyTanks(self.tanks_per_side));
        }
        for (name, value) in [
            ("tanks", self.tanks_per_side),
            ("tank_hp", self.tank_hp),
            ("max_round", self.max_round),
        ] {
            if value == 0 {
                return Err(OptionsError::Zero(name));
            }
        }
        if self.round_timeout_ms == 0 {
            return Err(OptionsError::Zero("round_timeout_ms"));
        }
        Ok(())
    }

    pub fn round_timeout(&self) -> Duration {
        Duration::from_millis(self.round_timeout_ms)
    }

    /// Upper bound on how long the game session waits for one player's batch.
    ///
    /// A round trip is a state upload plus an order request, each bounded by the round timeout.
    pub fn order_wait_ceiling(&self) -> Duration {
        self.round_timeout() * 2 + ORDER_WAIT_GRACE
    }
}

fn number<T: FromStr>(name: &'static str, value: String) -> Result<T, OptionsError> {
    value
        .trim()
        .parse()
        .map_err(|_| OptionsError::InvalidNumber { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_positional_arguments() {
        let options = GameOptions::from_args(args(&[
            "maps/arena.txt", "4", "1", "2", "2", "1", "1", "100", "2000", "playerA:9001", "playerB:9002",
        ]))
        .expect("valid arguments");

        assert_eq!(options.tanks_per_side, 4);
        assert_eq!(options.shell_speed, 2);
        assert_eq!(options.max_round, 100);
        assert_eq!(options.round_timeout(), Duration::from_millis(2000));
        assert_eq!(options.order_wait_ceiling(), Duration::from_millis(5000));
        assert_eq!(options.player_b, "playerB:9002");
    }

    #[test]
    fn rejects_more_than_five_tanks() {
        let err = GameOptions::from_args(args(&[
            "m", "6", "1", "2", "2", "1", "1", "100", "2000", "a", "b",
        ]))
        .unwrap_err();
        assert!(matches!(err, OptionsError::TooManyTanks(6)));
    }

    #[test]
    fn reports_missing_and_malformed_arguments() {
        let err = GameOptions::from_args(args(&["m", "2", "1"])).unwrap_err();
        assert!(matches!(err, OptionsError::Missing("shell_speed")));

        let err = GameOptions::from_args(args(&[
            "m", "two", "1", "2", "2", "1", "1", "100", "2000", "a", "b",
        ]))
        .unwrap_err();
        assert!(matches!(err, OptionsError::InvalidNumber { name: "tanks", .. }));
    }

    #[test]
    fn rejects_a_zero_round_timeout() {
        let err = GameOptions::from_args(args(&[
            "m", "2", "1", "2", "2", "1", "1", "100", "0", "a", "b",
        ]))
        .unwrap_err();
        assert!(matches!(err, OptionsError::Zero("round_timeout_ms")));
    }
}
