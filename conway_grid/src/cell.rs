// cell.rs - Canonical and display cell states

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Canonical state of a cell, the only value the transition rule reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Cell {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

impl TryFrom<u8> for Cell {
    type Error = GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Dead),
            1 => Ok(Cell::Alive),
            other => Err(GridError::InvalidCellValue(other)),
        }
    }
}

/// What a renderer shows for a cell.
///
/// `Raising` and `Fading` are computed from the current and the next
/// generation and never stored in a [`Grid`](crate::Grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
    /// Dead now, born next generation.
    Raising,
    /// Alive now, dies next generation.
    Fading,
}

impl CellState {
    /// Combines a cell with its next-generation value.
    pub fn smart(current: Cell, next: Cell) -> CellState {
        match (current, next) {
            (Cell::Dead, Cell::Alive) => CellState::Raising,
            (Cell::Alive, Cell::Dead) => CellState::Fading,
            (cell, _) => cell.into(),
        }
    }
}

impl From<Cell> for CellState {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Dead => CellState::Dead,
            Cell::Alive => CellState::Alive,
        }
    }
}
