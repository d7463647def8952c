//! Spawn intent.
//!
//! Attack patterns never touch the projectile collection directly. They describe what they
//! want fired as `SpawnRequest`s and the boss commits them after the pattern tick:
//! producer → buffer → consumer.

use bevy::prelude::*;

use super::food::{Category, FoodKind};

/// Sideways sinusoidal sway: `amplitude * sin(age * frequency + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Wobble {
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self { amplitude, frequency, phase: 0.0 }
    }

    #[inline]
    pub fn offset_at(&self, t: f32) -> f32 {
        self.amplitude * (t * self.frequency + self.phase).sin()
    }
}

/// Identifies a held food inside one pattern run so it can be released later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hold {
    pub volley: u32,
    pub index: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub kind: FoodKind,
    pub category: Category,
    pub pos: Vec2,
    pub vel: Vec2,
    pub wobble: Option<Wobble>,
    pub hold: Option<Hold>,
    /// Steer horizontally toward the owner's steer target.
    pub homing: bool,
    /// Upper bound for the hitbox scale; `None` keeps the default.
    pub hitbox_scale: Option<f32>,
}

impl SpawnRequest {
    /// Category comes from the kind table.
    pub fn food(kind: FoodKind, pos: Vec2, vel: Vec2) -> Self {
        Self::tagged(kind, kind.category(), pos, vel)
    }

    /// Category chosen by the caller (rings carry the ring's taste).
    pub fn tagged(kind: FoodKind, category: Category, pos: Vec2, vel: Vec2) -> Self {
        Self { kind, category, pos, vel, wobble: None, hold: None, homing: false, hitbox_scale: None }
    }

    pub fn with_wobble(mut self, wobble: Wobble) -> Self {
        self.wobble = Some(wobble);
        self
    }

    pub fn homing(mut self) -> Self {
        self.homing = true;
        self
    }

    pub fn held(mut self, hold: Hold) -> Self {
        self.hold = Some(hold);
        self.vel = Vec2::ZERO;
        self
    }

    pub fn with_hitbox_scale(mut self, scale: f32) -> Self {
        self.hitbox_scale = Some(scale);
        self
    }
}
