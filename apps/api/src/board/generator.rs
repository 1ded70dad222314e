//! Random board generation.
//!
//! Draws 25 distinct items from the theme pool in draw order, lays them out
//! row-major into a 5×5 grid and overwrites the centre cell with the theme's
//! free-space label. The 13th drawn item is discarded, not redrawn.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::sampler::Sampler;
use crate::catalog::Theme;

/// Rows (and columns) on a board.
pub const BOARD_SIZE: usize = 5;
/// Total cells on a board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
/// Zero-indexed (row, col) of the free space.
pub const CENTER: (usize, usize) = (BOARD_SIZE / 2, BOARD_SIZE / 2);

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Theme has {available} distinct items but a board needs {required}")]
    InsufficientItems { required: usize, available: usize },

    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// A 5×5 grid of cell texts. Serialized row-major as an array of arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>")]
pub struct Board([[String; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.0[row][col]
    }

    /// Yields `(row, col, text)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, text)| (row, col, text.as_str()))
        })
    }

    fn from_row_major(values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        Board(std::array::from_fn(|_| {
            std::array::from_fn(|_| values.next().unwrap_or_default())
        }))
    }
}

impl TryFrom<Vec<Vec<String>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::InvalidBoard(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != BOARD_SIZE) {
            return Err(BoardError::InvalidBoard(format!(
                "row {idx} has {} cells, expected {BOARD_SIZE}",
                row.len()
            )));
        }
        Ok(Board::from_row_major(rows.into_iter().flatten().collect()))
    }
}

/// Generates a fresh random board for `theme`.
pub fn generate_board(theme: &Theme, sampler: &dyn Sampler) -> Result<Board, BoardError> {
    let available = theme.items.len();
    if available < CELL_COUNT {
        return Err(BoardError::InsufficientItems {
            required: CELL_COUNT,
            available,
        });
    }

    let mut drawn: Vec<String> = sampler
        .sample_indices(available, CELL_COUNT)
        .into_iter()
        .map(|idx| theme.items[idx].clone())
        .collect();
    drawn[CENTER.0 * BOARD_SIZE + CENTER.1] = theme.free_space.clone();

    Ok(Board::from_row_major(drawn))
}
