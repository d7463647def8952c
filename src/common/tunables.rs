//! Tunable gameplay constants.

use bevy::prelude::*;

/// Playfield in screen pixels (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Padding outside the viewport before a projectile is culled.
    pub cull_margin: f32,
}

impl Arena {
    pub const CULL_MARGIN: f32 = 80.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, cull_margin: Self::CULL_MARGIN }
    }

    #[inline]
    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Viewport grown by the cull margin on every side.
    #[inline]
    pub fn cull_bounds(&self) -> Rect {
        self.viewport().inflate(self.cull_margin)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(600.0, 900.0)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub arena: Arena,
    pub tick_hz: f64,
    pub rng_seed: u64,
    /// Seconds of regular play before the boss is summoned.
    pub boss_countdown: f32,
    pub player_radius: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            tick_hz: 60.0,
            rng_seed: 42,
            boss_countdown: 3.0,
            player_radius: 20.0,
        }
    }
}
