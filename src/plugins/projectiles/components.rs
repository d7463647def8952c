use bevy::prelude::*;

use super::food::{Category, FoodKind};
use super::request::{Hold, SpawnRequest, Wobble};

/// Sprite size every food is drawn at.
pub const FOOD_SIZE: Vec2 = Vec2::splat(40.0);

/// Default shrink of the hitbox relative to the sprite.
pub const FOOD_HITBOX_SCALE: f32 = 0.8;

/// A falling (or flying) food owned by a boss or by the parry gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: FoodKind,
    pub category: Category,
    /// Sprite centre in arena pixels.
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub hitbox_scale: f32,
    pub homing: bool,
    pub wobble: Option<Wobble>,
    /// Counts down to a split for composite kinds.
    pub split_timer: Option<f32>,
    /// Frozen in place until a pattern releases it.
    pub hold: Option<Hold>,
    /// Set once the player deflected it; such a food never hurts or feeds the player.
    pub neutralized: bool,
    pub parried_by_player: bool,
    pub(crate) age: f32,
    pub(crate) wobble_applied: f32,
}

impl Projectile {
    pub fn new(kind: FoodKind, category: Category, pos: Vec2, vel: Vec2) -> Self {
        Self {
            kind,
            category,
            pos,
            vel,
            size: FOOD_SIZE,
            hitbox_scale: FOOD_HITBOX_SCALE,
            homing: false,
            wobble: None,
            split_timer: kind.split_into().map(|_| FoodKind::SPLIT_DELAY),
            hold: None,
            neutralized: false,
            parried_by_player: false,
            age: 0.0,
            wobble_applied: 0.0,
        }
    }

    pub fn from_request(req: &SpawnRequest) -> Self {
        let mut p = Self::new(req.kind, req.category, req.pos, req.vel);
        p.wobble = req.wobble;
        p.hold = req.hold;
        p.homing = req.homing;
        if let Some(scale) = req.hitbox_scale {
            p.hitbox_scale = p.hitbox_scale.min(scale);
        }
        if p.hold.is_some() {
            p.vel = Vec2::ZERO;
        }
        p
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size)
    }

    /// Collision box, shrunk around the sprite centre.
    #[inline]
    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.pos, self.size * self.hitbox_scale)
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.hold.is_some()
    }

    /// Parried or neutralized foods are out of normal eat/damage play.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.parried_by_player || self.neutralized
    }

    #[inline]
    pub fn rising(&self) -> bool {
        self.vel.y < 0.0
    }

    /// Leave the hold and fly toward `target` at `speed`.
    pub fn release_toward(&mut self, target: Vec2, speed: f32) {
        let dir = (target - self.pos).try_normalize().unwrap_or(Vec2::Y);
        self.vel = dir * speed;
        self.hold = None;
    }
}
