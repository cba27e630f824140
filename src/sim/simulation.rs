//! Session owner exposed to hosts
//!
//! Pairs the game state with its spawn roll source and hands out a fresh
//! snapshot after every call.

use super::snapshot::SessionSnapshot;
use super::spawner::{PcgRolls, SpawnRolls};
use super::state::{GameEvent, GameState, SpriteSet};
use super::tick::{TickInput, tick};
use crate::settings::Settings;

/// Seed used when the settings leave it open
pub const DEFAULT_SEED: u64 = 0x1a4e_5eed;

/// A running game session
#[derive(Debug, Clone)]
pub struct Simulation<R: SpawnRolls = PcgRolls> {
    state: GameState,
    rolls: R,
}

impl Simulation<PcgRolls> {
    /// New session spawning from the settings seed
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        log::info!("New session with seed {}", seed);
        Self::with_rolls(settings, PcgRolls::new(seed))
    }
}

impl<R: SpawnRolls> Simulation<R> {
    /// New session drawing spawn decisions from `rolls`
    pub fn with_rolls(settings: Settings, rolls: R) -> Self {
        Self {
            state: GameState::new(settings),
            rolls,
        }
    }

    /// Replace the sprite tokens attached to the player and future spawns
    pub fn with_sprites(mut self, sprites: SpriteSet) -> Self {
        self.state.sprites = sprites;
        self.state.player.sprite = sprites.player;
        self
    }

    /// Advance one frame
    pub fn tick(&mut self, delta: f32, input: &TickInput) -> SessionSnapshot {
        tick(&mut self.state, &mut self.rolls, input, delta);
        self.snapshot()
    }

    /// Start over with a fresh running session
    pub fn reset(&mut self) -> SessionSnapshot {
        self.state.events.clear();
        self.state.reset();
        self.snapshot()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state)
    }

    /// Events produced by the last `tick` or `reset`
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
