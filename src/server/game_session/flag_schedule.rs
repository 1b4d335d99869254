//! When flags appear.
//!
//! No flag spawns in the first half of the game. The first one needs every tank
//! still alive; after that a flag is due every `half / tanks_per_side + 1`
//! rounds, counted from the middle round.

#[derive(Debug, Clone)]
pub struct FlagSchedule {
    half: i64,
    tanks_per_side: i64,
    started: bool,
    generated: u32,
}

impl FlagSchedule {
    pub fn new(max_round: u32, tanks_per_side: u32) -> Self {
        Self {
            half: i64::from(max_round) / 2,
            tanks_per_side: i64::from(tanks_per_side.max(1)),
            started: false,
            generated: 0,
        }
    }

    /// Checked once `round` has been resolved. A `true` answer is counted as a generated flag.
    pub fn is_due(&mut self, round: u32, live_tanks: usize) -> bool {
        let round = i64::from(round);
        let due = if self.started {
            let interval = self.half / self.tanks_per_side + 1;
            (round - self.half).rem_euclid(interval) == 0
        } else {
            round > self.half - 1 && live_tanks as i64 == 2 * self.tanks_per_side
        };
        if due {
            self.started = true;
            self.generated += 1;
        }
        due
    }

    pub fn generated(&self) -> u32 {
        self.generated
    }
}
