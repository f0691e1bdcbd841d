//! Simulation layer for Conway's Game of Life.
//!
//! A [`Game`] wraps a [`conway_grid::Grid`] with play/pause/step control
//! driven by a tokio tick task, and reports every change to its
//! [`GameObserver`]s. A [`Dashboard`] keeps any number of independent games.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod game;
pub mod observer;

pub use config::GameConfig;
pub use dashboard::{Dashboard, GameId};
pub use error::{FieldSize, SimError, SimResult};
pub use game::{GAME_OVER, Game, STOP_BEFORE_CLEAR};
pub use observer::{GameObserver, GameState};
