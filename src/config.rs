//! Runtime configuration for the simulation.
//!
//! Every field has a default, so a JSON document only needs to list the
//! values it changes:
//!
//! ```json
//! {
//!   "fps": 70,
//!   "gravity": 80.0,
//!   "collisions": "elastic",
//!   "decay": true,
//!   "playfield": { "width": 1200, "height": 700, "header": 100, "policy": "remove" }
//! }
//! ```
//!
//! Setting `"playfield": null` lets bodies fly forever.

use crate::boundary::Playfield;
use crate::error::{Result, SimError};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use std::path::Path;

/// How overlapping bodies are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Bodies pass through each other; gravity still applies.
    Off,
    /// Bodies always bounce.
    Elastic,
    /// Bodies bounce, but co-moving bodies merge into the heavier one.
    #[default]
    Absorb,
}

impl CollisionMode {
    pub fn enabled(self) -> bool {
        self != CollisionMode::Off
    }

    pub fn absorbs(self) -> bool {
        self == CollisionMode::Absorb
    }

    /// Maps a raw C ABI value; anything unknown disables collisions.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => CollisionMode::Elastic,
            2 => CollisionMode::Absorb,
            _ => CollisionMode::Off,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Frame rate; the integration timestep is `1 / fps`.
    pub fps: u32,
    /// Gravitational constant G. Never negative.
    pub gravity: f64,
    /// Increment applied by one press of the G toggle.
    pub gravity_step: f64,
    /// Scale of the per-frame velocity kick, `v += kick_factor * a * dt`.
    pub kick_factor: f64,
    pub collisions: CollisionMode,
    pub decay: bool,
    /// Frames between trail samples.
    pub trail_interval: u64,
    pub playfield: Option<Playfield>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fps: Self::DEFAULT_FPS,
            gravity: Self::DEFAULT_GRAVITY,
            gravity_step: 10.0,
            kick_factor: 2.0,
            collisions: CollisionMode::Absorb,
            decay: false,
            trail_interval: (Self::DEFAULT_FPS / 4) as u64,
            playfield: Some(Playfield::default()),
        }
    }
}

impl SimConfig {
    pub const DEFAULT_FPS: u32 = 70;
    pub const DEFAULT_GRAVITY: f64 = 80.0;

    /// Fixed integration timestep.
    pub fn dt(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Clamps recoverable values and rejects the rest.
    pub fn validated(mut self) -> Result<Self> {
        self.check()?;
        self.set_gravity(self.gravity);
        if self.trail_interval == 0 {
            warn!("trail_interval 0 clamped to 1");
            self.trail_interval = 1;
        }

        Ok(self)
    }

    /// Rejects values no frame can be stepped with.
    pub fn check(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(SimError::InvalidConfig("fps must be at least 1".into()));
        }
        if !self.kick_factor.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "kick_factor must be finite, got {}",
                self.kick_factor
            )));
        }
        if let Some(field) = &self.playfield {
            if !(field.width > 0.0 && field.height > field.header) {
                return Err(SimError::InvalidConfig(format!(
                    "playfield {}x{} with header {} has no room for bodies",
                    field.width, field.height, field.header
                )));
            }
        }
        Ok(())
    }

    /// G as a frame uses it: negative or non-finite reads as zero.
    pub fn effective_gravity(&self) -> f64 {
        if self.gravity.is_finite() && self.gravity > 0.0 {
            self.gravity
        } else {
            0.0
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validated()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Sets G, clamping negative or non-finite values to zero.
    pub fn set_gravity(&mut self, g: f64) {
        if g.is_finite() && g >= 0.0 {
            self.gravity = g;
        } else {
            warn!("gravitational constant {g} out of range, clamped to 0");
            self.gravity = 0.0;
        }
    }

    /// Moves G by `steps` toggle increments (negative to decrease), never below zero.
    pub fn adjust_gravity(&mut self, steps: f64) {
        let g = self.gravity + steps * self.gravity_step;
        self.gravity = if g.is_finite() { g.max(0.0) } else { 0.0 };
    }
}
