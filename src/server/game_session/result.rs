//! Final game result, as reported to the callback URL and on `/result`.

use serde::{Deserialize, Serialize};

use crate::game::engine::Scores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    #[serde(rename = "result")]
    pub outcome: Outcome,
    /// Address of the winning player.
    #[serde(rename = "win", default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Scores as `A: x,B: y`.
    #[serde(rename = "state", default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GameResult {
    /// Higher score wins, equal scores draw.
    pub fn from_scores(player_a: &str, player_b: &str, scores: Scores) -> Self {
        let winner = match scores.a.cmp(&scores.b) {
            std::cmp::Ordering::Greater => Some(player_a.to_string()),
            std::cmp::Ordering::Less => Some(player_b.to_string()),
            std::cmp::Ordering::Equal => None,
        };
        Self {
            outcome: if winner.is_some() { Outcome::Win } else { Outcome::Draw },
            winner,
            summary: format!("A: {},B: {}", scores.a, scores.b),
            reason: None,
        }
    }

    /// Result when at least one player never connected.
    pub fn forfeit(player_a: &str, player_b: &str, a_connected: bool, b_connected: bool) -> Self {
        let winner = match (a_connected, b_connected) {
            (true, false) => Some(player_a),
            (false, true) => Some(player_b),
            _ => None,
        };
        match winner {
            Some(winner) => Self {
                outcome: Outcome::Win,
                winner: Some(winner.to_string()),
                summary: String::new(),
                reason: Some(format!("Only connected to {winner}")),
            },
            None => Self::aborted("Failed to connect to both players."),
        }
    }

    /// A draw with no scores, for games that could not be played out.
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Draw,
            winner: None,
            summary: String::new(),
            reason: Some(reason.into()),
        }
    }
}
