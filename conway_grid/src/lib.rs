//! Grid engine for Conway's Game of Life.
//!
//! A [`Grid`] is a fixed rectangle of canonical [`Cell`]s. Generations are
//! computed as a whole from the previous one (no wraparound at the edges),
//! and [`CellState`] adds the `Raising`/`Fading` read-side annotations for
//! renderers. Nothing here does I/O or keeps time.

mod cell;
mod error;
mod grid;
pub mod patterns;

pub use cell::{Cell, CellState};
pub use error::GridError;
pub use grid::{Grid, Matrix, Row};
pub use patterns::{PATTERNS, Pattern};
