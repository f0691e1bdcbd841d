// observer.rs - Change notifications out of a Game

use conway_grid::CellState;
use serde::Serialize;

/// Snapshot of a game's metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub is_playing: bool,
    /// Only meaningful while `is_playing`; ticks keep coming but don't advance.
    pub is_paused: bool,
    pub step_ms: u64,
    /// The field is a fixed point: the next generation equals this one.
    pub is_game_over: bool,
    pub smart_mode: bool,
    pub generation: u64,
    pub population: usize,
    /// Advisory or end-of-game caption, cleared by the next command.
    pub message: Option<String>,
}

/// Receives every displayed-state change of one game.
///
/// Called with the game locked: implementations must not call back into
/// the game that notifies them.
pub trait GameObserver: Send {
    fn field_changed(&mut self, field: &[Vec<CellState>]);
    fn state_changed(&mut self, state: &GameState);
}
