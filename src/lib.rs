//! Lane Racer - A top-down lane-dodging arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, game state)
//! - `settings`: Play-field configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GamePhase, SessionSnapshot, Simulation, TickInput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless host (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Player lateral speed (units/s)
    pub const PLAYER_SPEED: f32 = 400.0;
    /// Player bottom edge, fixed for the whole session
    pub const PLAYER_Y: f32 = 50.0;
    /// Road background scroll speed (units/s), presentation only
    pub const SCROLL_SPEED: f32 = 500.0;

    /// Player and obstacle sprite size
    pub const VEHICLE_WIDTH: f32 = 60.0;
    pub const VEHICLE_HEIGHT: f32 = 100.0;
    /// Hitbox inset on every side of the sprite rectangle
    pub const HITBOX_MARGIN: f32 = 5.0;

    /// Fall speeds per kind (units/s)
    pub const ENEMY_FALL_SPEED: f32 = 700.0;
    pub const BARRIER_FALL_SPEED: f32 = 500.0;
    pub const CLOUD_FALL_SPEED: f32 = 120.0;

    /// Health and damage
    pub const INITIAL_HEALTH: i32 = 100;
    pub const ENEMY_DAMAGE: i32 = 30;
    pub const BARRIER_DAMAGE: i32 = 10;
    /// Health at or below this is drawn as "low" by the HUD
    pub const LOW_HEALTH: i32 = 50;

    /// Timer thresholds (seconds); a timer fires once it strictly exceeds these
    pub const SPAWN_INTERVAL: f32 = 0.8;
    pub const CLOUD_SPAWN_INTERVAL: f32 = 1.8;
    pub const SCORE_INTERVAL: f32 = 0.1;

    /// Probability that a spawned obstacle is an enemy vehicle (else a barrier)
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.6;

    /// Entities whose y falls below this are discarded
    pub const DESPAWN_Y: f32 = -150.0;

    /// Drivable lane: grandstands occupy this much on both sides
    pub const LEFT_BOUND: f32 = 80.0;
    pub const RIGHT_MARGIN: f32 = 80.0;

    /// Obstacle spawn x range is [OBSTACLE_MIN_X, screen_width - OBSTACLE_RIGHT_INSET]
    pub const OBSTACLE_MIN_X: f32 = 90.0;
    pub const OBSTACLE_RIGHT_INSET: f32 = 130.0;
    /// Clouds appear this far above the top edge
    pub const CLOUD_SPAWN_OFFSET_Y: f32 = 50.0;

    /// Smallest screen width that still leaves a drivable lane and spawn range
    pub const MIN_SCREEN_WIDTH: f32 = LEFT_BOUND + RIGHT_MARGIN + VEHICLE_WIDTH;
    /// Smallest screen height that fits the player above the bottom edge
    pub const MIN_SCREEN_HEIGHT: f32 = PLAYER_Y + VEHICLE_HEIGHT;
}
