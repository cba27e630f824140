//! Timer-driven obstacle and cloud spawning
//!
//! The spawn decisions draw from a [`SpawnRolls`] source so a run can be
//! replayed from its seed, or scripted outright in tests.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{EntityKind, GameEvent, GameState};
use crate::consts::*;

/// Random draws the spawner needs
pub trait SpawnRolls {
    /// Uniform value in `[min, max]`
    fn uniform(&mut self, min: f32, max: f32) -> f32;
    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool;
}

/// Seeded PCG source used in real play
#[derive(Debug, Clone)]
pub struct PcgRolls {
    rng: Pcg32,
}

impl PcgRolls {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl SpawnRolls for PcgRolls {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if !(max > min) || !min.is_finite() || !max.is_finite() {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }
}

/// Spawn a cloud if its timer has run past the interval
pub fn spawn_clouds_if_needed<R: SpawnRolls + ?Sized>(state: &mut GameState, rolls: &mut R) {
    if state.timers.cloud <= CLOUD_SPAWN_INTERVAL {
        return;
    }

    let max_x = state.settings.screen_width - state.settings.cloud_width;
    let x = rolls.uniform(0.0, max_x);
    let y = state.settings.screen_height + CLOUD_SPAWN_OFFSET_Y;
    let cloud = state.make_entity(EntityKind::Cloud, Vec2::new(x, y));
    state.clouds.push(cloud);
    state.events.push(GameEvent::CloudSpawned { id: cloud.id });
    state.timers.cloud = 0.0;
}

/// Spawn an obstacle if its timer has run past the interval
pub fn spawn_obstacles_if_needed<R: SpawnRolls + ?Sized>(state: &mut GameState, rolls: &mut R) {
    if state.timers.spawn <= SPAWN_INTERVAL {
        return;
    }

    let max_x = state.settings.screen_width - OBSTACLE_RIGHT_INSET;
    let x = rolls.uniform(OBSTACLE_MIN_X, max_x);
    let kind = if rolls.chance(ENEMY_SPAWN_CHANCE) {
        EntityKind::EnemyVehicle
    } else {
        EntityKind::Barrier
    };
    let obstacle = state.make_entity(kind, Vec2::new(x, state.settings.screen_height));
    state.obstacles.push(obstacle);
    state.events.push(GameEvent::ObstacleSpawned {
        id: obstacle.id,
        kind,
    });
    log::debug!("Spawned {:?} #{} at x={:.1}", kind, obstacle.id, x);
    state.timers.spawn = 0.0;
}
