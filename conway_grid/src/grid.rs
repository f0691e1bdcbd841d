// grid.rs - Grid engine for Conway's Game of Life

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::cell::{Cell, CellState};
use crate::error::GridError;

pub type Row = Vec<Cell>;
pub type Matrix = Vec<Row>;

/// Moore neighborhood offsets, center excluded.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Rectangular matrix of canonical cells, `height` rows of `width` cells.
///
/// Both dimensions are kept even when the other one is zero, so a 1x0 grid
/// still has one (empty) row and a 0x5 grid still reports width 5.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    rows: Matrix,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl Grid {
    /// All-dead grid of the given size.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            rows: vec![vec![Cell::Dead; width]; height],
        }
    }

    /// Builds a grid from rows, rejecting ragged input.
    ///
    /// The width is taken from the first row; an empty matrix gives 0x0.
    pub fn from_rows(rows: Matrix) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridError::RaggedTemplate { row, expected: width, found });
        }
        Ok(Self { height: rows.len(), width, rows })
    }

    /// Builds a grid from 0/1 rows, e.g. a literal seed template.
    pub fn from_numbers<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let rows = rows
            .iter()
            .map(|row| row.as_ref().iter().map(|&v| Cell::try_from(v)).collect::<Result<Row, _>>())
            .collect::<Result<Matrix, _>>()?;
        Self::from_rows(rows)
    }

    /// Seeded random fill, roughly one cell in three alive.
    pub fn random(height: usize, width: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = (0..height)
            .map(|_| (0..width).map(|_| Cell::from(rng.gen_bool(1.0 / 3.0))).collect())
            .collect();
        Self { height, width, rows }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Checked accessor; `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Changes the size in place.
    ///
    /// Cells present in both the old and the new bounds keep their value,
    /// everything newly exposed is dead. Shrinking discards for good.
    pub fn resize(&mut self, height: usize, width: usize) {
        let mut rows = vec![vec![Cell::Dead; width]; height];
        for (new_row, old_row) in rows.iter_mut().zip(&self.rows) {
            for (new, old) in new_row.iter_mut().zip(old_row) {
                *new = *old;
            }
        }
        self.height = height;
        self.width = width;
        self.rows = rows;
    }

    /// Flips a cell. Panics when `(row, col)` is outside the grid.
    pub fn toggle(&mut self, row: usize, col: usize) {
        let cell = &mut self.rows[row][col];
        *cell = cell.toggled();
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Dead);
        }
    }

    /// Replaces the whole grid, dimensions included.
    pub fn apply_template(&mut self, template: Grid) {
        *self = template;
    }

    /// Alive cells around `(row, col)`. Positions off the grid don't count,
    /// there is no wraparound. Panics when `(row, col)` is outside the grid.
    pub fn neighbor_count(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside {}x{} grid",
            self.height,
            self.width
        );
        NEIGHBORS
            .iter()
            .filter(|&&(dr, dc)| {
                match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                    (Some(r), Some(c)) => self.get(r, c).is_some_and(Cell::is_alive),
                    _ => false,
                }
            })
            .count()
    }

    fn next_cell(&self, row: usize, col: usize) -> Cell {
        match (self.rows[row][col], self.neighbor_count(row, col)) {
            (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
            (Cell::Dead, 3)                     => Cell::Alive, // Birth
            _                                   => Cell::Dead,  // Death or stays dead
        }
    }

    fn next_row(&self, row: usize) -> Row {
        (0..self.width).map(|col| self.next_cell(row, col)).collect()
    }

    /// The following generation, computed from this one as a whole.
    /// `self` is left untouched.
    pub fn next_generation(&self) -> Grid {
        Grid {
            height: self.height,
            width: self.width,
            rows: (0..self.height).map(|row| self.next_row(row)).collect(),
        }
    }

    /// Moves to the next generation and returns the new cells.
    pub fn advance(&mut self) -> &[Row] {
        *self = self.next_generation();
        &self.rows
    }

    /// True when the next generation equals this one.
    ///
    /// Only fixed points qualify: oscillators such as the blinker and
    /// travelling patterns such as the glider never report steady.
    pub fn is_steady_state(&self) -> bool {
        self.next_generation() == *self
    }

    /// Canonical cells as display states.
    pub fn display_state(&self) -> Vec<Vec<CellState>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&cell| cell.into()).collect())
            .collect()
    }

    /// Display states with pending births marked `Raising` and pending
    /// deaths marked `Fading`.
    pub fn smart_display_state(&self) -> Vec<Vec<CellState>> {
        let next = self.next_generation();
        self.rows
            .iter()
            .zip(&next.rows)
            .map(|(row, next_row)| {
                row.iter()
                    .zip(next_row)
                    .map(|(&cell, &next_cell)| CellState::smart(cell, next_cell))
                    .collect()
            })
            .collect()
    }

    pub fn population(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_alive()).count())
            .sum()
    }

    pub fn is_anyone_alive(&self) -> bool {
        self.rows.iter().flatten().any(|cell| cell.is_alive())
    }
}
