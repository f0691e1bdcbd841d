// game.rs - Simulation controller: commands, observers and the tick loop

use std::sync::{Arc, Weak};
use std::time::Duration;

use conway_grid::{CellState, Grid, Pattern};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::observer::{GameObserver, GameState};

pub const GAME_OVER: &str = "Game over!";
pub const STOP_BEFORE_CLEAR: &str = "Stop the game before clearing the field";

/// One independent simulation: a grid, its play state and its tick task.
///
/// Commands take `&self` and apply synchronously under the game lock, so a
/// command issued between two ticks is complete before the next tick reads
/// the grid. Dropping the game cancels any pending tick.
pub struct Game {
    shared: Arc<Mutex<Inner>>,
    runtime: Handle,
}

struct Inner {
    grid: Grid,
    config: GameConfig,
    state: GameState,
    /// Bumped on every play/stop; a tick task only acts for its own run.
    run_id: u64,
    ticker: Option<JoinHandle<()>>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Inner {
    fn field(&self) -> Vec<Vec<CellState>> {
        if self.state.smart_mode {
            self.grid.smart_display_state()
        } else {
            self.grid.display_state()
        }
    }

    fn refresh(&mut self) {
        self.state.is_game_over = self.grid.is_steady_state();
        self.state.population = self.grid.population();
    }

    fn notify(&mut self) {
        let field = self.field();
        for observer in &mut self.observers {
            observer.field_changed(&field);
            observer.state_changed(&self.state);
        }
    }

    fn is_live(&self, run_id: u64) -> bool {
        self.state.is_playing && self.run_id == run_id
    }

    /// Leaves `Playing`. The caller decides what to do with the old task.
    fn halt(&mut self) -> Option<JoinHandle<()>> {
        self.state.is_playing = false;
        self.state.is_paused = false;
        self.run_id += 1;
        self.ticker.take()
    }

    fn advance(&mut self) {
        self.grid.advance();
        self.state.generation += 1;
        self.refresh();
        debug!(
            generation = self.state.generation,
            population = self.state.population,
            "advanced"
        );
    }

    /// One scheduled advance. Returns whether the loop should go on.
    fn tick(&mut self) -> bool {
        self.advance();
        let over = self.state.is_game_over;
        if over {
            // Called from the tick task itself, so the handle is just dropped.
            drop(self.halt());
            self.state.message = Some(GAME_OVER.to_string());
            info!(generation = self.state.generation, "game over");
        }
        self.notify();
        !over
    }

    fn reseed(&mut self, grid: Grid) {
        self.grid.apply_template(grid);
        self.state.generation = 0;
        self.refresh();
    }
}

impl Game {
    pub fn new(runtime: Handle, config: GameConfig) -> Self {
        let state = GameState {
            is_playing: false,
            is_paused: false,
            step_ms: config.clamp_step_ms(config.default_step_ms),
            is_game_over: false,
            smart_mode: config.smart_mode,
            generation: 0,
            population: 0,
            message: None,
        };
        let mut inner = Inner {
            grid: Grid::new(config.initial_height, config.initial_width),
            config,
            state,
            run_id: 0,
            ticker: None,
            observers: Vec::new(),
        };
        inner.refresh();

        Self {
            shared: Arc::new(Mutex::new(inner)),
            runtime,
        }
    }

    /// Registers an observer and hands it the current field and state.
    pub fn subscribe(&self, mut observer: Box<dyn GameObserver>) {
        let mut inner = self.shared.lock();
        observer.field_changed(&inner.field());
        observer.state_changed(&inner.state);
        inner.observers.push(observer);
    }

    /// Display matrix, smart-annotated when smart mode is on.
    pub fn field(&self) -> Vec<Vec<CellState>> {
        self.shared.lock().field()
    }

    pub fn state(&self) -> GameState {
        self.shared.lock().state.clone()
    }

    /// Copy of the canonical grid.
    pub fn grid(&self) -> Grid {
        self.shared.lock().grid.clone()
    }

    /// Flips one cell. Panics when `(row, col)` is outside the field.
    pub fn toggle_cell(&self, row: usize, col: usize) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        inner.grid.toggle(row, col);
        inner.refresh();
        inner.notify();
    }

    pub fn resize(&self, height: usize, width: usize) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        inner.grid.resize(height, width);
        inner.refresh();
        debug!(height, width, "resized");
        inner.notify();
    }

    /// Kills every cell. Refused with an advisory message while playing,
    /// the running simulation is left alone in that case.
    pub fn clear(&self) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        if inner.state.is_playing {
            warn!("clear refused while playing");
            inner.state.message = Some(STOP_BEFORE_CLEAR.to_string());
        } else {
            inner.grid.clear();
            inner.state.generation = 0;
            inner.refresh();
        }
        inner.notify();
    }

    /// Replaces the field, dimensions included.
    pub fn apply_template(&self, template: Grid) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        inner.reseed(template);
        inner.notify();
    }

    /// Puts `pattern` at the top-left of an otherwise dead field. The field
    /// keeps its size, growing only as far as needed to hold the pattern.
    pub fn apply_pattern(&self, pattern: &Pattern) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        let (pattern_height, pattern_width) = pattern.extent();
        let height = inner.grid.height().max(pattern_height);
        let width = inner.grid.width().max(pattern_width);
        let template = pattern.template(height, width);
        inner.reseed(template);
        inner.notify();
    }

    pub fn randomize(&self, seed: u64) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        let template = Grid::random(inner.grid.height(), inner.grid.width(), seed);
        inner.reseed(template);
        inner.notify();
    }

    /// Sets the delay between ticks, clamped to the configured range.
    /// A wait already in progress keeps its old length.
    pub fn set_step_interval(&self, ms: u64) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        inner.state.step_ms = inner.config.clamp_step_ms(ms);
        inner.notify();
    }

    pub fn set_smart_mode(&self, smart_mode: bool) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        inner.state.smart_mode = smart_mode;
        inner.notify();
    }

    /// Starts playing; the first advance comes one step interval later.
    pub fn play(&self) {
        let mut inner = self.shared.lock();
        if inner.state.is_playing {
            return;
        }
        inner.state.message = None;
        inner.state.is_playing = true;
        inner.state.is_paused = false;
        inner.run_id += 1;
        let run_id = inner.run_id;
        inner.ticker = Some(
            self.runtime
                .spawn(run_ticks(Arc::downgrade(&self.shared), run_id)),
        );
        info!(run_id, step_ms = inner.state.step_ms, "playing");
        inner.notify();
    }

    /// Stops playing and cancels the pending tick. Idempotent.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        inner.state.message = None;
        if let Some(ticker) = inner.halt() {
            ticker.abort();
            info!(generation = inner.state.generation, "stopped");
        }
        inner.notify();
    }

    /// Suspends advancing without leaving `Playing`.
    pub fn pause(&self) {
        let mut inner = self.shared.lock();
        if !inner.state.is_playing || inner.state.is_paused {
            return;
        }
        inner.state.message = None;
        inner.state.is_paused = true;
        inner.notify();
    }

    pub fn resume(&self) {
        let mut inner = self.shared.lock();
        if !inner.state.is_paused {
            return;
        }
        inner.state.message = None;
        inner.state.is_paused = false;
        inner.notify();
    }

    /// Advances a single generation by hand. Ignored while ticks are
    /// advancing the field (playing and not paused).
    pub fn step(&self) {
        let mut inner = self.shared.lock();
        if inner.state.is_playing && !inner.state.is_paused {
            return;
        }
        inner.state.message = None;
        inner.advance();
        if inner.state.is_game_over {
            inner.state.message = Some(GAME_OVER.to_string());
        }
        inner.notify();
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        if let Some(ticker) = self.shared.lock().halt() {
            ticker.abort();
        }
    }
}

/// Self-rescheduling tick loop. The interval is read again before every
/// wait, and liveness is checked after every wait, so `stop()` or dropping
/// the game wins over a timer that already fired.
async fn run_ticks(shared: Weak<Mutex<Inner>>, run_id: u64) {
    while let Some(delay) = next_delay(&shared, run_id) {
        tokio::time::sleep(delay).await;
        if !fire(&shared, run_id) {
            break;
        }
    }
    debug!(run_id, "tick loop ended");
}

fn next_delay(shared: &Weak<Mutex<Inner>>, run_id: u64) -> Option<Duration> {
    let shared = shared.upgrade()?;
    let inner = shared.lock();
    inner
        .is_live(run_id)
        .then(|| Duration::from_millis(inner.state.step_ms))
}

fn fire(shared: &Weak<Mutex<Inner>>, run_id: u64) -> bool {
    let Some(shared) = shared.upgrade() else {
        return false;
    };
    let mut inner = shared.lock();
    if !inner.is_live(run_id) {
        return false;
    }
    if inner.state.is_paused {
        return true;
    }
    inner.tick()
}
