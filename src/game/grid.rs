//! Static battlefield grid.
//!
//! Map files declare `size: N` and then list N rows of N space separated terrain
//! codes. Lines starting with `//` are comments and may appear anywhere.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::types::Position;

/// Terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Open,
    /// Blocks tanks and destroys shells.
    Barrier,
    /// Hides what stands in it from the enemy, does not block movement.
    Fog,
}

impl Cell {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Open),
            1 => Some(Cell::Barrier),
            2 => Some(Cell::Fog),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Cell::Open => 0,
            Cell::Barrier => 1,
            Cell::Fog => 2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("no size found")]
    MissingSize,

    #[error("invalid size declaration: '{0}'")]
    InvalidSize(String),

    #[error("expected a row of {expected} cells, got {found}: '{line}'")]
    RowLength { expected: usize, found: usize, line: String },

    #[error("invalid cell '{0}'")]
    InvalidCell(String),

    #[error("not enough rows: expected {expected}, read {found}")]
    NotEnoughRows { expected: usize, found: usize },
}

/// Square terrain grid, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMap {
    size: usize,
    cells: Vec<Vec<Cell>>,
}

impl GameMap {
    pub fn load_file(path: &Path) -> Result<Self, MapError> {
        fs::read_to_string(path)?.parse()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `pos`, or `None` when the position is off the grid.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        self.cells.get(row)?.get(col).copied()
    }

    /// Cells off the grid count as barriers.
    pub fn is_barrier(&self, pos: Position) -> bool {
        self.cell(pos).is_none_or(|cell| cell == Cell::Barrier)
    }

    /// Cells off the grid are never visible.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell != Cell::Fog)
    }

    /// The cell flags are generated on.
    pub fn center(&self) -> Position {
        let half = (self.size / 2) as i32;
        Position::new(half, half)
    }

    /// Terrain codes, row by row, as uploaded to the players.
    pub fn codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }
}

impl FromStr for GameMap {
    type Err = MapError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with("//"));

        let size = lines
            .by_ref()
            .find(|line| line.starts_with("size"))
            .ok_or(MapError::MissingSize)
            .and_then(parse_size)?;

        let mut cells = Vec::with_capacity(size);
        for line in lines.take(size) {
            cells.push(parse_row(line, size)?);
        }
        if cells.len() < size {
            return Err(MapError::NotEnoughRows { expected: size, found: cells.len() });
        }

        Ok(Self { size, cells })
    }
}

fn parse_size(line: &str) -> Result<usize, MapError> {
    line.split_once(':')
        .and_then(|(_, value)| value.trim().parse().ok())
        .filter(|size| *size > 0)
        .ok_or_else(|| MapError::InvalidSize(line.to_string()))
}

fn parse_row(line: &str, size: usize) -> Result<Vec<Cell>, MapError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != size {
        return Err(MapError::RowLength {
            expected: size,
            found: tokens.len(),
            line: line.to_string(),
        });
    }
    tokens
        .into_iter()
        .map(|token| {
            token
                .parse()
                .ok()
                .and_then(Cell::from_code)
                .ok_or_else(|| MapError::InvalidCell(token.to_string()))
        })
        .collect()
}
