//! Read-only view of a session for the presentation layer

use serde::Serialize;

use super::state::{Entity, EntityKind, GamePhase, GameState, SpriteToken};
use crate::consts::LOW_HEALTH;

/// Drawable view of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: EntityKind,
    pub sprite: SpriteToken,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            x: entity.pos.x,
            y: entity.pos.y,
            width: entity.size.x,
            height: entity.size.y,
            kind: entity.kind(),
            sprite: entity.sprite,
        }
    }
}

/// Everything a renderer needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub health: i32,
    pub scroll_offset: f32,
    /// The host should shut down
    pub quit_requested: bool,
    pub player: EntityView,
    pub obstacles: Vec<EntityView>,
    pub clouds: Vec<EntityView>,
}

impl SessionSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            health: state.health,
            scroll_offset: state.scroll_offset,
            quit_requested: state.quit_requested,
            player: EntityView::from(&state.player),
            obstacles: state.obstacles.iter().map(EntityView::from).collect(),
            clouds: state.clouds.iter().map(EntityView::from).collect(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Health is drawn in the warning color at or below this
    pub fn health_is_low(&self) -> bool {
        self.health <= LOW_HEALTH
    }

    /// HUD text, top to bottom
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Score: {}", self.score),
            format!("Health: {}%", self.health),
        ];
        if self.is_game_over() {
            lines.push("GAME OVER".to_string());
            lines.push("Continue? (Enter)".to_string());
        }
        lines
    }
}
