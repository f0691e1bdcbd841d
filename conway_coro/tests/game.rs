use std::sync::Arc;
use std::time::Duration;

use conway_coro::{GAME_OVER, Game, GameConfig, GameObserver, GameState, STOP_BEFORE_CLEAR};
use conway_grid::{Cell, CellState, Grid, patterns};
use parking_lot::Mutex;
use tokio::runtime::Handle;

#[derive(Clone, Default)]
struct Recorder {
    fields: Arc<Mutex<Vec<Vec<Vec<CellState>>>>>,
    states: Arc<Mutex<Vec<GameState>>>,
}

impl Recorder {
    fn notifications(&self) -> usize {
        self.states.lock().len()
    }

    fn last_state(&self) -> GameState {
        self.states.lock().last().cloned().unwrap()
    }
}

impl GameObserver for Recorder {
    fn field_changed(&mut self, field: &[Vec<CellState>]) {
        self.fields.lock().push(field.to_vec());
    }

    fn state_changed(&mut self, state: &GameState) {
        self.states.lock().push(state.clone());
    }
}

fn grid(rows: &[&[u8]]) -> Grid {
    Grid::from_numbers(rows).unwrap()
}

fn blinker() -> Grid {
    grid(&[
        &[0, 0, 0, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0],
        &[0, 0, 0, 0, 0],
    ])
}

fn block() -> Grid {
    grid(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]])
}

fn game_with(template: Grid, step_ms: u64) -> Game {
    let game = Game::new(Handle::current(), GameConfig::default());
    game.apply_template(template);
    game.set_step_interval(step_ms);
    game
}

async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test]
async fn new_game_starts_stopped_on_an_empty_one_by_zero_field() {
    let game = Game::new(Handle::current(), GameConfig::default());
    let state = game.state();
    assert!(!state.is_playing);
    assert_eq!(state.step_ms, 1000);
    assert!(state.is_game_over);
    assert!(state.smart_mode);
    assert_eq!(state.message, None);
    let g = game.grid();
    assert_eq!((g.height(), g.width()), (1, 0));
}

#[tokio::test(start_paused = true)]
async fn plays_one_generation_per_interval() {
    let game = game_with(blinker(), 100);
    game.play();
    assert!(game.state().is_playing);

    wait(50).await;
    assert_eq!(game.state().generation, 0);
    wait(100).await; // t = 150
    assert_eq!(game.state().generation, 1);
    wait(200).await; // t = 350
    assert_eq!(game.state().generation, 3);
    assert_eq!(game.grid(), blinker().next_generation());
}

#[tokio::test(start_paused = true)]
async fn stop_prevents_further_advances() {
    let game = game_with(blinker(), 100);
    game.play();
    wait(150).await;
    assert_eq!(game.state().generation, 1);

    game.stop();
    game.stop();
    wait(1000).await;
    let state = game.state();
    assert!(!state.is_playing);
    assert_eq!(state.generation, 1);
}

#[tokio::test(start_paused = true)]
async fn tick_of_a_stopped_run_never_fires() {
    let game = game_with(blinker(), 100);
    game.play();
    wait(50).await;
    game.stop();
    game.play(); // new run, first tick due at t = 150

    wait(70).await; // t = 120, the old run's tick would have been at 100
    assert_eq!(game.state().generation, 0);
    wait(50).await; // t = 170
    assert_eq!(game.state().generation, 1);
    wait(100).await; // t = 270
    assert_eq!(game.state().generation, 2);
}

#[tokio::test(start_paused = true)]
async fn playing_twice_keeps_a_single_tick_chain() {
    let game = game_with(blinker(), 100);
    game.play();
    game.play();
    wait(250).await;
    assert_eq!(game.state().generation, 2);
}

#[tokio::test(start_paused = true)]
async fn toggles_between_ticks_land_before_the_next_tick() {
    let game = game_with(blinker(), 100);
    game.play();
    wait(150).await;
    // Horizontal phase: row 2, columns 1..=3. Leave only the middle cell.
    game.toggle_cell(2, 1);
    game.toggle_cell(2, 3);
    assert_eq!(game.state().population, 1);

    wait(100).await;
    let state = game.state();
    assert_eq!(state.generation, 2);
    assert_eq!(state.population, 0);
    assert!(!state.is_playing);
    assert_eq!(state.message.as_deref(), Some(GAME_OVER));
}

#[tokio::test(start_paused = true)]
async fn resize_while_playing_is_what_the_next_tick_advances() {
    let game = game_with(blinker(), 100);
    game.play();
    wait(150).await;
    game.resize(7, 7);
    let resized = game.grid();

    wait(100).await;
    let after = game.grid();
    assert_eq!((after.height(), after.width()), (7, 7));
    assert_eq!(after, resized.next_generation());
    assert_eq!(after.get(1, 2), Some(Cell::Alive));
    assert_eq!(after.get(3, 2), Some(Cell::Alive));
    assert_eq!(after.get(2, 1), Some(Cell::Dead));
    let state = game.state();
    assert_eq!(state.generation, 2);
    assert!(state.is_playing);
}

#[tokio::test(start_paused = true)]
async fn pause_suppresses_ticks_without_leaving_play() {
    let game = game_with(blinker(), 100);
    game.play();
    wait(150).await;
    assert_eq!(game.state().generation, 1);

    game.pause();
    wait(200).await; // t = 350
    let state = game.state();
    assert!(state.is_playing);
    assert!(state.is_paused);
    assert_eq!(state.generation, 1);

    game.resume();
    wait(100).await; // t = 450
    assert_eq!(game.state().generation, 2);
    assert!(!game.state().is_paused);
}

#[tokio::test(start_paused = true)]
async fn interval_change_applies_from_the_next_tick() {
    let game = game_with(blinker(), 100);
    game.play();
    wait(150).await;
    assert_eq!(game.state().generation, 1);

    game.set_step_interval(300);
    wait(100).await; // t = 250, the wait armed at 100 still ends at 200
    assert_eq!(game.state().generation, 2);
    wait(200).await; // t = 450, next tick at 500
    assert_eq!(game.state().generation, 2);
    wait(100).await; // t = 550
    assert_eq!(game.state().generation, 3);
}

#[tokio::test]
async fn step_interval_is_clamped() {
    let game = Game::new(Handle::current(), GameConfig::default());
    game.set_step_interval(1);
    assert_eq!(game.state().step_ms, 10);
    game.set_step_interval(60_000);
    assert_eq!(game.state().step_ms, 2000);
    game.set_step_interval(250);
    assert_eq!(game.state().step_ms, 250);
}

#[tokio::test(start_paused = true)]
async fn steady_field_ends_the_game() {
    let game = game_with(block(), 100);
    game.play();
    wait(150).await;
    let state = game.state();
    assert!(!state.is_playing);
    assert!(state.is_game_over);
    assert_eq!(state.generation, 1);
    assert_eq!(state.message.as_deref(), Some(GAME_OVER));

    wait(1000).await;
    assert_eq!(game.state().generation, 1);
    assert_eq!(game.grid(), block());
}

#[tokio::test(start_paused = true)]
async fn lone_cell_dies_and_ends_the_game() {
    let game = game_with(Grid::new(3, 3), 100);
    game.toggle_cell(1, 1);
    assert!(!game.state().is_game_over);
    game.play();
    wait(150).await;
    let state = game.state();
    assert!(!state.is_playing);
    assert_eq!(state.population, 0);
    assert_eq!(state.message.as_deref(), Some(GAME_OVER));
}

#[tokio::test(start_paused = true)]
async fn oscillators_never_end_the_game() {
    let game = game_with(blinker(), 10);
    game.play();
    wait(1005).await;
    let state = game.state();
    assert!(state.is_playing);
    assert!(!state.is_game_over);
    assert_eq!(state.generation, 100);
}

#[tokio::test(start_paused = true)]
async fn clear_while_playing_is_refused() {
    let game = game_with(blinker(), 100);
    game.play();
    game.clear();

    let state = game.state();
    assert!(state.is_playing);
    assert_eq!(state.message.as_deref(), Some(STOP_BEFORE_CLEAR));
    assert_eq!(game.grid(), blinker());

    wait(150).await;
    assert_eq!(game.state().generation, 1);
    assert_eq!(game.grid().population(), 3);
}

#[tokio::test]
async fn clear_when_stopped_kills_everything() {
    let game = game_with(blinker(), 100);
    game.step();
    game.clear();
    let state = game.state();
    assert_eq!(state.message, None);
    assert_eq!(state.generation, 0);
    assert_eq!(state.population, 0);
    assert_eq!(game.grid(), Grid::new(5, 5));
}

#[tokio::test]
async fn commands_clear_the_previous_message() {
    let game = game_with(block(), 100);
    game.step();
    assert_eq!(game.state().message.as_deref(), Some(GAME_OVER));
    game.toggle_cell(0, 0);
    assert_eq!(game.state().message, None);
}

#[tokio::test(start_paused = true)]
async fn manual_step_only_when_not_advancing() {
    let game = game_with(blinker(), 100);
    game.step();
    assert_eq!(game.state().generation, 1);

    game.play();
    game.step();
    assert_eq!(game.state().generation, 1);

    game.pause();
    game.step();
    assert_eq!(game.state().generation, 2);
}

#[tokio::test]
async fn toggle_and_resize_recompute_game_over() {
    let game = game_with(Grid::new(3, 3), 100);
    assert!(game.state().is_game_over);

    game.toggle_cell(1, 1);
    assert!(!game.state().is_game_over);
    assert_eq!(game.grid().get(1, 1), Some(Cell::Alive));

    game.resize(1, 1);
    assert!(game.state().is_game_over);
    assert_eq!(game.grid(), Grid::new(1, 1));
}

#[tokio::test]
#[should_panic]
async fn toggling_outside_the_field_panics() {
    let game = game_with(Grid::new(2, 2), 100);
    game.toggle_cell(5, 5);
}

#[tokio::test]
async fn field_follows_smart_mode() {
    let game = game_with(blinker(), 100);
    let smart = game.field();
    assert_eq!(smart[1][2], CellState::Fading);
    assert_eq!(smart[2][1], CellState::Raising);
    assert_eq!(smart[2][2], CellState::Alive);

    game.set_smart_mode(false);
    let plain = game.field();
    assert_eq!(plain[1][2], CellState::Alive);
    assert_eq!(plain[2][1], CellState::Dead);
}

#[tokio::test]
async fn pattern_and_random_keep_the_field_size() {
    let game = game_with(Grid::new(12, 12), 100);
    game.apply_pattern(&patterns::GLIDER);
    assert_eq!(game.grid(), patterns::GLIDER.template(12, 12));

    game.randomize(3);
    let g = game.grid();
    assert_eq!((g.height(), g.width()), (12, 12));
    assert_eq!(g, Grid::random(12, 12, 3));
    assert_eq!(game.state().generation, 0);
}

#[tokio::test]
async fn pattern_larger_than_the_field_grows_it() {
    let gun = patterns::find("gosper glider gun").unwrap();
    let game = game_with(Grid::new(12, 12), 100);
    game.apply_pattern(gun);

    let g = game.grid();
    assert_eq!((g.height(), g.width()), (12, 36));
    assert_eq!(g.population(), gun.cells.len());
    assert_eq!(g, gun.template(12, 36));
}

#[tokio::test(start_paused = true)]
async fn observers_see_every_change() {
    let game = game_with(blinker(), 100);
    let recorder = Recorder::default();
    game.subscribe(Box::new(recorder.clone()));
    assert_eq!(recorder.notifications(), 1);
    assert_eq!(recorder.fields.lock()[0], game.field());

    game.toggle_cell(0, 0);
    game.resize(6, 6);
    game.set_step_interval(100);
    game.play();
    assert_eq!(recorder.notifications(), 5);
    assert!(recorder.last_state().is_playing);

    wait(150).await;
    assert_eq!(recorder.notifications(), 6);
    assert_eq!(recorder.last_state().generation, 1);
    assert_eq!(recorder.fields.lock().last().cloned().unwrap(), game.field());

    game.clear();
    game.stop();
    assert_eq!(recorder.notifications(), 8);
    assert!(!recorder.last_state().is_playing);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_game_cancels_its_ticks() {
    let game = game_with(blinker(), 100);
    let recorder = Recorder::default();
    game.subscribe(Box::new(recorder.clone()));
    game.play();
    wait(150).await;
    let seen = recorder.notifications();

    drop(game);
    wait(1000).await;
    assert_eq!(recorder.notifications(), seen);
}

#[tokio::test]
async fn glider_board_is_not_steady() {
    let game = Game::new(Handle::current(), GameConfig::default());
    game.apply_template(patterns::glider_template());
    let state = game.state();
    assert!(!state.is_game_over);
    assert_eq!(state.population, 5);
}
