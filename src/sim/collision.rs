//! Collision detection for axis-aligned sprite rectangles
//!
//! Hitboxes are the sprite rectangle shrunk by a fixed margin on every side,
//! so grazing contacts at the sprite edges do not count as crashes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HITBOX_MARGIN;

/// Axis-aligned rectangle anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Top-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Shrink by `margin` on each side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            size: self.size - Vec2::splat(2.0 * margin),
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Collision volume for a sprite at `pos` with `size`
#[inline]
pub fn hitbox(pos: Vec2, size: Vec2) -> Rect {
    Rect::new(pos, size).inset(HITBOX_MARGIN)
}

/// Check whether two sprites' hitboxes overlap
pub fn hitboxes_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    hitbox(a_pos, a_size).overlaps(&hitbox(b_pos, b_size))
}
