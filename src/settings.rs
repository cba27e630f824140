//! Play-field settings
//!
//! Loaded from a JSON file by the host. Every field has a default, so a
//! partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_SCREEN_HEIGHT, MIN_SCREEN_WIDTH};

/// Play-field settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    /// Screen width in world units (lane and spawn ranges derive from it)
    pub screen_width: f32,
    /// Screen height in world units (obstacles appear at this y)
    pub screen_height: f32,

    // === Decoration ===
    /// Cloud sprite width, as provided by the presentation layer
    pub cloud_width: f32,
    /// Cloud sprite height
    pub cloud_height: f32,

    // === Determinism ===
    /// Spawner seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 640.0,
            screen_height: 480.0,

            cloud_width: 150.0,
            cloud_height: 90.0,

            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file
    pub const ENV_PATH: &'static str = "LANE_RACER_SETTINGS";

    /// Parse settings from JSON (missing fields take their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp dimensions to the smallest playable field.
    ///
    /// Below these sizes the lane clamp range or one of the spawn ranges
    /// would be empty. Non-finite sizes fall back to the defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !self.screen_width.is_finite() {
            log::warn!(
                "screen_width {} is not finite, using {}",
                self.screen_width,
                defaults.screen_width
            );
            self.screen_width = defaults.screen_width;
        } else if self.screen_width < MIN_SCREEN_WIDTH {
            log::warn!(
                "screen_width {} too small, using {}",
                self.screen_width,
                MIN_SCREEN_WIDTH
            );
            self.screen_width = MIN_SCREEN_WIDTH;
        }
        if !self.screen_height.is_finite() {
            log::warn!(
                "screen_height {} is not finite, using {}",
                self.screen_height,
                defaults.screen_height
            );
            self.screen_height = defaults.screen_height;
        } else if self.screen_height < MIN_SCREEN_HEIGHT {
            log::warn!(
                "screen_height {} too small, using {}",
                self.screen_height,
                MIN_SCREEN_HEIGHT
            );
            self.screen_height = MIN_SCREEN_HEIGHT;
        }

        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.cloud_width) || !valid(self.cloud_height) {
            log::warn!("Cloud size must be positive and finite, using default");
            self.cloud_width = defaults.cloud_width;
            self.cloud_height = defaults.cloud_height;
        }
        self.cloud_width = self.cloud_width.min(self.screen_width);

        self
    }

    /// Leftmost x the player may occupy
    pub fn lane_min_x(&self) -> f32 {
        crate::consts::LEFT_BOUND
    }

    /// Rightmost x the player may occupy
    pub fn lane_max_x(&self) -> f32 {
        self.screen_width - crate::consts::RIGHT_MARGIN - crate::consts::VEHICLE_WIDTH
    }

    /// Player x at session start (lane center)
    pub fn player_start_x(&self) -> f32 {
        (self.screen_width / 2.0 - crate::consts::VEHICLE_WIDTH / 2.0).floor()
    }
}
