//! One player's game: board state, the player, and the run's RNG
//!
//! `Game` owns both the board (`GameState`) and the `Player` and borrows the
//! shared economy and settings. Checks, clicks and reward draws are `impl
//! Game` blocks in the submodules, so they can touch both halves without
//! either one pointing at the other.

pub mod actions;
pub mod checks;
pub mod clicks;
pub mod gacha;
pub mod state;

use crate::core::config::SimSettings;
use crate::core::error::{ConfigError, Result};
use crate::core::rng::SimRng;
use crate::core::types::{AnimalUid, PlayerId, Seconds};
use crate::economy::EconomyConfig;
use crate::player::animal::AnimalStatus;
use crate::player::Player;
use actions::ActionPayload;
use state::GameState;

pub struct Game<'a> {
    pub economy: &'a EconomyConfig,
    pub settings: &'a SimSettings,
    pub state: GameState,
    pub player: Player,
    pub rng: SimRng,
}

impl<'a> Game<'a> {
    /// Set up a run: first crate timer, starting animal, first session
    pub fn new(
        economy: &'a EconomyConfig,
        settings: &'a SimSettings,
        player_id: PlayerId,
        seed: u64,
    ) -> Result<Self> {
        settings.validate()?;
        economy.check_settings(settings)?;

        let mut game = Self {
            economy,
            settings,
            state: GameState::new(),
            player: Player::new(player_id, settings),
            rng: SimRng::seed_from_u64(seed),
        };

        game.state.free_crate_timer = game.roll_crate_timer();

        let pick = game
            .rng
            .index(settings.starting_animals.len())
            .and_then(|i| settings.starting_animals.get(i).copied())
            .ok_or_else(|| ConfigError::InvalidSetting {
                name: "starting_animals",
                reason: "no starting animal".to_string(),
            })?;

        game.state.clock.session_online = settings.session.sample_session_length(1, &mut game.rng);
        game.earn_animal(pick)?;

        Ok(game)
    }

    // === SOCKETS ===

    pub fn socket_capacity(&self) -> usize {
        self.economy.socket_capacity(self.player.level).unwrap_or(0)
    }

    pub fn socket_available(&self) -> bool {
        self.state.sockets.len() < self.socket_capacity()
    }

    /// Move a benched animal into a free socket
    pub fn socket_animal(&mut self, uid: AnimalUid) -> bool {
        if !self.socket_available() || !self.player.inventory.is_benched(uid) {
            return false;
        }
        if let Some(animal) = self.player.inventory.get_mut(uid) {
            animal.status = AnimalStatus::Active;
            self.state.sockets.push(uid);
            return true;
        }
        false
    }

    /// Bench a socketed animal
    pub fn unsocket_animal(&mut self, uid: AnimalUid) -> bool {
        let Some(pos) = self.state.sockets.iter().position(|&s| s == uid) else {
            return false;
        };
        self.state.sockets.remove(pos);
        if let Some(animal) = self.player.inventory.get_mut(uid) {
            animal.status = AnimalStatus::Inventoried;
        }
        true
    }

    /// Fill free sockets with the strongest benched animals
    pub fn fill_open_sockets(&mut self) {
        while self.socket_available() {
            let Some(uid) = self.player.inventory.strongest_benched().map(|a| a.uid) else {
                break;
            };
            if !self.socket_animal(uid) {
                break;
            }
        }
    }

    // === CANDY BOARD ===

    pub fn slot_capacity(&self) -> usize {
        self.economy.slot_capacity(self.player.level).unwrap_or(0)
    }

    pub fn slot_available(&self) -> bool {
        self.state.candy_slots.len() < self.slot_capacity()
    }

    // === QUEUE ===

    /// Queue an action with a freshly drawn think time.
    ///
    /// Think time is a bounded normal over the reaction bounds, rounded to
    /// hundredths of a second.
    pub fn enqueue(&mut self, payload: ActionPayload) -> bool {
        let now = self.state.clock.frame;
        let (min, max) = (self.settings.reaction_time_min, self.settings.reaction_time_max);
        let rng = &mut self.rng;
        let added = self
            .state
            .queue
            .enqueue(payload, now, || round2(rng.normal_approx(min, max, 1.0)));
        if added {
            tracing::trace!(?payload, "Queued action");
        }
        added
    }

    // === MISC ===

    pub fn completed_set_count(&self) -> usize {
        self.player
            .completed_sets(|set_id| self.economy.set_size(set_id))
            .len()
    }

    /// Seconds until the next free crate spawns
    pub fn roll_crate_timer(&mut self) -> Seconds {
        let (min, max) = (self.settings.rtp_time_min, self.settings.rtp_time_max);
        self.rng.uniform_int(min as i64, max as i64).max(0) as Seconds
    }
}

/// Round to hundredths
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
