use serde::{Deserialize, Serialize};

/// Identifier of a tank. A shell carries the id of the tank that fired it.
pub type TankId = u32;

/// A cell on the map, addressed by row then column.
///
/// Stepping is a pure projection: it never looks at the map, so a position may
/// leave the grid and callers are expected to check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::Up => Self::new(self.row - 1, self.col),
            Direction::Down => Self::new(self.row + 1, self.col),
            Direction::Left => Self::new(self.row, self.col - 1),
            Direction::Right => Self::new(self.row, self.col + 1),
        }
    }

    /// Undo a `step` taken in `dir`.
    pub fn withdraw(self, dir: Direction) -> Self {
        self.step(dir.opposite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Numeric tag shared with the player protocol.
    pub fn tag(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 3,
            Direction::Right => 4,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Head-on relation used by the movement block: UP/DOWN sum to 3, LEFT/RIGHT to 7.
    pub fn is_opposing(self, other: Direction) -> bool {
        matches!(self.tag() + other.tag(), 3 | 7)
    }
}

/// One of the two seats in a game. Side A always owns the lower tank ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_follows_row_major_axes() {
        let origin = Position::new(1, 1);
        assert_eq!(origin.step(Direction::Up), Position::new(0, 1));
        assert_eq!(origin.step(Direction::Down), Position::new(2, 1));
        assert_eq!(origin.step(Direction::Left), Position::new(1, 0));
        assert_eq!(origin.step(Direction::Right), Position::new(1, 2));
    }

    #[test]
    fn withdraw_undoes_step() {
        let origin = Position::new(4, 7);
        for dir in Direction::ALL {
            assert_eq!(origin.step(dir).withdraw(dir), origin);
        }
    }

    #[test]
    fn stepping_off_the_grid_is_not_checked() {
        assert_eq!(Position::new(0, 0).step(Direction::Up), Position::new(-1, 0));
    }

    #[test]
    fn only_head_on_pairs_are_opposing() {
        assert!(Direction::Up.is_opposing(Direction::Down));
        assert!(Direction::Left.is_opposing(Direction::Right));
        assert!(Direction::Right.is_opposing(Direction::Left));
        assert!(!Direction::Up.is_opposing(Direction::Up));
        assert!(!Direction::Up.is_opposing(Direction::Left));
        assert!(!Direction::Down.is_opposing(Direction::Left));
    }
}
