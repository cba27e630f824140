//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only, behind `SpawnRolls`
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod simulation;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, hitbox, hitboxes_overlap};
pub use simulation::{DEFAULT_SEED, Simulation};
pub use snapshot::{EntityView, SessionSnapshot};
pub use spawner::{PcgRolls, SpawnRolls, spawn_clouds_if_needed, spawn_obstacles_if_needed};
pub use state::{
    Entity, EntityKind, GameEvent, GamePhase, GameState, KindParams, SpriteSet, SpriteToken,
    Timers,
};
pub use tick::{TickInput, tick};
