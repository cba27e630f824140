//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; nothing else writes it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, hitbox};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Health ran out; waiting for confirm or quit
    GameOver,
}

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    EnemyVehicle,
    Barrier,
    /// Decoration, never collides
    Cloud,
}

/// Per-kind behavior, looked up instead of dispatched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindParams {
    /// Downward speed applied every tick (units/s)
    pub fall_speed: f32,
    /// Health removed when this kind hits the player
    pub damage: i32,
    /// Whether this kind is tested against the player's hitbox
    pub collidable: bool,
}

impl EntityKind {
    pub const fn params(self) -> KindParams {
        match self {
            EntityKind::Player => KindParams {
                fall_speed: 0.0,
                damage: 0,
                collidable: false,
            },
            EntityKind::EnemyVehicle => KindParams {
                fall_speed: ENEMY_FALL_SPEED,
                damage: ENEMY_DAMAGE,
                collidable: true,
            },
            EntityKind::Barrier => KindParams {
                fall_speed: BARRIER_FALL_SPEED,
                damage: BARRIER_DAMAGE,
                collidable: true,
            },
            EntityKind::Cloud => KindParams {
                fall_speed: CLOUD_FALL_SPEED,
                damage: 0,
                collidable: false,
            },
        }
    }

    /// Obstacles are the collidable, damage-dealing kinds
    pub fn is_obstacle(self) -> bool {
        self.params().collidable
    }
}

/// Opaque handle the presentation layer attaches to sprites.
/// The simulation only copies it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteToken(pub u16);

/// Sprite token for each kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub player: SpriteToken,
    pub enemy: SpriteToken,
    pub barrier: SpriteToken,
    pub cloud: SpriteToken,
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self {
            player: SpriteToken(0),
            enemy: SpriteToken(1),
            barrier: SpriteToken(2),
            cloud: SpriteToken(3),
        }
    }
}

impl SpriteSet {
    pub fn for_kind(&self, kind: EntityKind) -> SpriteToken {
        match kind {
            EntityKind::Player => self.player,
            EntityKind::EnemyVehicle => self.enemy,
            EntityKind::Barrier => self.barrier,
            EntityKind::Cloud => self.cloud,
        }
    }
}

/// A moving actor: the player, an obstacle or a cloud
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    kind: EntityKind,
    /// Bottom-left corner; y grows upward
    pub pos: Vec2,
    pub size: Vec2,
    pub sprite: SpriteToken,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, sprite: SpriteToken) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "entity size must be positive");
        Self {
            id,
            kind,
            pos,
            size,
            sprite,
        }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Scroll down by this kind's fall speed
    pub fn fall(&mut self, dt: f32) {
        self.pos.y -= self.kind.params().fall_speed * dt;
    }

    /// Inset collision volume
    pub fn hitbox(&self) -> Rect {
        hitbox(self.pos, self.size)
    }

    pub fn is_despawned(&self) -> bool {
        self.pos.y < DESPAWN_Y
    }
}

/// Something that happened during the most recent tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, kind: EntityKind },
    CloudSpawned { id: u32 },
    /// An obstacle hit the player and was consumed
    Collision {
        id: u32,
        kind: EntityKind,
        damage: i32,
        health: i32,
    },
    GameOver { score: u64 },
    Restarted,
    QuitRequested,
}

/// Independent accumulators (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timers {
    pub spawn: f32,
    pub cloud: f32,
    pub score: f32,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Field dimensions and decoration size
    pub settings: Settings,
    pub sprites: SpriteSet,
    pub phase: GamePhase,
    pub health: i32,
    pub score: u64,
    /// Road texture offset, presentation only
    pub scroll_offset: f32,
    pub timers: Timers,
    pub player: Entity,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Entity>,
    /// Live clouds in spawn order
    pub clouds: Vec<Entity>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once the player asks to quit from the game over screen
    pub quit_requested: bool,
    /// Events of the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh running session
    pub fn new(settings: Settings) -> Self {
        Self::with_sprites(settings, SpriteSet::default())
    }

    pub fn with_sprites(settings: Settings, sprites: SpriteSet) -> Self {
        let settings = settings.sanitized();
        let player = Entity::new(
            0,
            EntityKind::Player,
            Vec2::new(settings.player_start_x(), PLAYER_Y),
            Vec2::new(VEHICLE_WIDTH, VEHICLE_HEIGHT),
            sprites.player,
        );

        Self {
            settings,
            sprites,
            phase: GamePhase::Running,
            health: INITIAL_HEALTH,
            score: 0,
            scroll_offset: 0.0,
            timers: Timers::default(),
            player,
            obstacles: Vec::new(),
            clouds: Vec::new(),
            time_ticks: 0,
            quit_requested: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Return to a fresh running session, keeping settings and the player entity
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.health = INITIAL_HEALTH;
        self.score = 0;
        self.timers = Timers::default();
        self.obstacles.clear();
        self.clouds.clear();
        self.quit_requested = false;
        self.player.pos.x = self.settings.player_start_x();
        self.events.push(GameEvent::Restarted);
        log::info!("Session reset");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build an entity of `kind` at `pos` with its standard size and sprite
    pub fn make_entity(&mut self, kind: EntityKind, pos: Vec2) -> Entity {
        let size = match kind {
            EntityKind::Cloud => Vec2::new(self.settings.cloud_width, self.settings.cloud_height),
            _ => Vec2::new(VEHICLE_WIDTH, VEHICLE_HEIGHT),
        };
        let id = self.next_entity_id();
        Entity::new(id, kind, pos, size, self.sprites.for_kind(kind))
    }

    /// Place an obstacle directly (scripted scenarios, tests)
    pub fn insert_obstacle(&mut self, kind: EntityKind, pos: Vec2) -> u32 {
        debug_assert!(kind.is_obstacle(), "{kind:?} is not an obstacle");
        let entity = self.make_entity(kind, pos);
        self.obstacles.push(entity);
        entity.id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
