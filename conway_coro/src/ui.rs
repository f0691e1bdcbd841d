// ui.rs - egui dashboard: one card per game, commands forwarded to the Game

use conway_grid::{CellState, PATTERNS, Pattern};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use slotmap::SecondaryMap;
use tokio::runtime::Runtime;
use tracing::warn;

use conway_coro::{Dashboard, FieldSize, Game, GameConfig, GameId, GameObserver, GameState};

const BOX_SIZE: f32 = 12.0;
const SPACING: f32 = 0.5;

/// Wakes the UI whenever a game changes, ticks included.
struct Repaint(egui::Context);

impl GameObserver for Repaint {
    fn field_changed(&mut self, _field: &[Vec<CellState>]) {
        self.0.request_repaint();
    }

    fn state_changed(&mut self, _state: &GameState) {
        self.0.request_repaint();
    }
}

struct Palette {
    live: Color32,
    dead: Color32,
    raising: Color32,
    fading: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            live: Color32::from_rgb(0, 200, 0),
            dead: Color32::from_rgb(40, 40, 40),
            raising: Color32::from_rgb(0, 90, 0),
            fading: Color32::from_rgb(200, 140, 0),
        }
    }
}

impl Palette {
    fn color(&self, cell: CellState) -> Color32 {
        match cell {
            CellState::Dead => self.dead,
            CellState::Alive => self.live,
            CellState::Raising => self.raising,
            CellState::Fading => self.fading,
        }
    }
}

/// Inputs a card keeps between frames.
struct CardControls {
    height: i64,
    width: i64,
    size_error: Option<String>,
    selected_pattern: usize,
    seed: u64,
}

impl CardControls {
    fn for_game(game: &Game) -> Self {
        let grid = game.grid();
        Self {
            height: grid.height() as i64,
            width: grid.width() as i64,
            size_error: None,
            selected_pattern: 0,
            seed: 0,
        }
    }
}

pub struct DashboardApp {
    dashboard: Dashboard,
    controls: SecondaryMap<GameId, CardControls>,
    palette: Palette,
    min_step_ms: u64,
    max_step_ms: u64,
    ctx: egui::Context,
    // Declared last: games must be dropped before the runtime running their ticks.
    _runtime: Runtime,
}

impl DashboardApp {
    /// `first_pattern` replaces the first game's board when given.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Runtime,
        config: GameConfig,
        first_pattern: Option<&Pattern>,
    ) -> Self {
        let (min_step_ms, max_step_ms) = (config.min_step_ms, config.max_step_ms);
        let dashboard = Dashboard::with_first_game(runtime.handle().clone(), config);
        if let (Some(pattern), Some(&first)) = (first_pattern, dashboard.ids().first()) {
            if let Some(game) = dashboard.game(first) {
                game.apply_pattern(pattern);
            }
        }
        let mut app = Self {
            dashboard,
            controls: SecondaryMap::new(),
            palette: Palette::default(),
            min_step_ms,
            max_step_ms,
            ctx: cc.egui_ctx.clone(),
            _runtime: runtime,
        };
        for &id in app.dashboard.ids() {
            if let Some(game) = app.dashboard.game(id) {
                game.subscribe(Box::new(Repaint(app.ctx.clone())));
                app.controls.insert(id, CardControls::for_game(game));
            }
        }
        app
    }

    fn add_game(&mut self) {
        let id = self.dashboard.add_game(None);
        if let Some(game) = self.dashboard.game(id) {
            game.subscribe(Box::new(Repaint(self.ctx.clone())));
            self.controls.insert(id, CardControls::for_game(game));
        }
    }

    fn close_game(&mut self, id: GameId) {
        self.controls.remove(id);
        if let Err(err) = self.dashboard.remove_game(id) {
            warn!(%err, "close failed");
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Conway's Game of Life");
                if ui.button("➕ New game").clicked() {
                    self.add_game();
                }
                ui.separator();
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.palette.live);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.palette.dead);
                ui.label("Raising:");
                ui.color_edit_button_srgba(&mut self.palette.raising);
                ui.label("Fading:");
                ui.color_edit_button_srgba(&mut self.palette.fading);
            });

            ui.separator();

            let mut closed = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for &id in self.dashboard.ids() {
                    let (Some(game), Some(name), Some(controls)) = (
                        self.dashboard.game(id),
                        self.dashboard.name(id),
                        self.controls.get_mut(id),
                    ) else {
                        continue;
                    };
                    let range = self.min_step_ms..=self.max_step_ms;
                    let close = ui
                        .push_id(id, |ui| card_ui(ui, name, game, controls, &self.palette, range))
                        .inner;
                    if close {
                        closed = Some(id);
                    }
                }
            });

            if let Some(id) = closed {
                self.close_game(id);
            }
        });
    }
}

/// Draws one game card. Returns true when the user asked to close it.
fn card_ui(
    ui: &mut egui::Ui,
    name: &str,
    game: &Game,
    controls: &mut CardControls,
    palette: &Palette,
    step_range: std::ops::RangeInclusive<u64>,
) -> bool {
    let state = game.state();
    let field = game.field();
    let mut close = false;

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.strong(name);
            ui.label(format!("Generation: {}", state.generation));
            ui.label(format!("Live cells: {}", state.population));
            if state.is_game_over {
                ui.label("(steady)");
            }
            if ui.button("✖ Close").clicked() {
                close = true;
            }
        });

        // Play controls
        ui.horizontal(|ui| {
            if !state.is_playing {
                if ui.button("▶ Play").clicked() {
                    game.play();
                }
            } else if state.is_paused {
                if ui.button("▶ Resume").clicked() {
                    game.resume();
                }
            } else if ui.button("⏸ Pause").clicked() {
                game.pause();
            }
            if ui.button("⏹ Stop").clicked() {
                game.stop();
            }
            if ui.button("⏭ Step").clicked() {
                game.step();
            }
            if ui.button("🗑 Clear").clicked() {
                game.clear();
            }

            ui.separator();

            let mut smart = state.smart_mode;
            if ui.checkbox(&mut smart, "Smart mode").changed() {
                game.set_smart_mode(smart);
            }
        });

        // Size, speed and seeding
        ui.horizontal(|ui| {
            ui.label("Height:");
            ui.add(egui::DragValue::new(&mut controls.height));
            ui.label("Width:");
            ui.add(egui::DragValue::new(&mut controls.width));
            if ui.button("Resize").clicked() {
                match FieldSize::new(controls.height, controls.width) {
                    Ok(size) => {
                        controls.size_error = None;
                        game.resize(size.height, size.width);
                    }
                    Err(err) => controls.size_error = Some(err.to_string()),
                }
            }

            ui.separator();

            ui.label("Step:");
            let mut step_ms = state.step_ms;
            let slider = egui::Slider::new(&mut step_ms, step_range)
                .logarithmic(true)
                .suffix(" ms");
            if ui.add(slider).changed() {
                game.set_step_interval(step_ms);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[controls.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut controls.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                game.apply_pattern(&PATTERNS[controls.selected_pattern]);
            }
            if ui.button("🎲 Random").clicked() {
                controls.seed += 1;
                game.randomize(controls.seed);
            }
        });

        if let Some(err) = &controls.size_error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if let Some(message) = &state.message {
            ui.colored_label(Color32::YELLOW, message);
        }

        field_ui(ui, game, &field, palette);
    });

    close
}

fn field_ui(ui: &mut egui::Ui, game: &Game, field: &[Vec<CellState>], palette: &Palette) {
    let height = field.len();
    let width = field.first().map_or(0, Vec::len);
    let pitch = BOX_SIZE + SPACING;
    let total_size = Vec2::new(
        (pitch * width as f32 - SPACING).max(0.0),
        (pitch * height as f32 - SPACING).max(0.0),
    );

    let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, Color32::BLACK);

    for (row, cells) in field.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            let rect = Rect::from_min_size(
                egui::pos2(origin.x + col as f32 * pitch, origin.y + row as f32 * pitch),
                Vec2::splat(BOX_SIZE),
            );
            painter.rect_filled(rect, 1.0, palette.color(cell));
            painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let offset = pos - origin;
            let row = (offset.y / pitch) as usize;
            let col = (offset.x / pitch) as usize;
            if row < height && col < width {
                game.toggle_cell(row, col);
            }
        }
    }
}
