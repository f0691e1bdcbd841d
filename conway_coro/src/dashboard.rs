// dashboard.rs - Registry of independent games

use conway_grid::patterns;
use slotmap::{SlotMap, new_key_type};
use tokio::runtime::Handle;
use tracing::info;

use crate::config::GameConfig;
use crate::error::{SimError, SimResult};
use crate::game::Game;

new_key_type! {
    /// Opaque handle of a game on the dashboard.
    pub struct GameId;
}

struct Card {
    name: String,
    game: Game,
}

/// Owns any number of games. Games share nothing, each has its own grid
/// and its own tick task.
pub struct Dashboard {
    cards: SlotMap<GameId, Card>,
    order: Vec<GameId>,
    created: u32,
    runtime: Handle,
    config: GameConfig,
}

impl Dashboard {
    pub fn new(runtime: Handle, config: GameConfig) -> Self {
        Self {
            cards: SlotMap::with_key(),
            order: Vec::new(),
            created: 0,
            runtime,
            config,
        }
    }

    /// A dashboard that already shows "Game 1".
    pub fn with_first_game(runtime: Handle, config: GameConfig) -> Self {
        let mut dashboard = Self::new(runtime, config);
        dashboard.add_game(None);
        dashboard
    }

    /// Creates a game named `name`, or "Game N" with N counting every game
    /// created so far. New games start from the glider board unless the
    /// config says otherwise.
    pub fn add_game(&mut self, name: Option<&str>) -> GameId {
        self.created += 1;
        let name = name.map_or_else(|| format!("Game {}", self.created), str::to_owned);

        let game = Game::new(self.runtime.clone(), self.config.clone());
        if self.config.seed_glider {
            game.apply_template(patterns::glider_template());
        }

        let id = self.cards.insert(Card { name, game });
        self.order.push(id);
        info!(id = ?id, name = %self.cards[id].name, "game added");
        id
    }

    /// Takes a game off the dashboard. Dropping the returned game cancels
    /// its ticks.
    pub fn remove_game(&mut self, id: GameId) -> SimResult<Game> {
        let card = self.cards.remove(id).ok_or(SimError::UnknownGame(id))?;
        self.order.retain(|&other| other != id);
        info!(id = ?id, name = %card.name, "game removed");
        Ok(card.game)
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.cards.get(id).map(|card| &card.game)
    }

    pub fn name(&self, id: GameId) -> Option<&str> {
        self.cards.get(id).map(|card| card.name.as_str())
    }

    /// Ids in creation order.
    pub fn ids(&self) -> &[GameId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
