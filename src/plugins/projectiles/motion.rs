//! Per-projectile kinematics: straight travel, optional horizontal homing, optional wobble,
//! optional split, and the off-screen predicate.
//!
//! Everything here is gravity-free: a food keeps the velocity it was fired with unless homing
//! bends its horizontal component.

use bevy::prelude::*;

use crate::common::tunables::Arena;

use super::components::Projectile;

pub const HOMING_STRENGTH_WEAK: f32 = 0.7;
pub const HOMING_STRENGTH_STRONG: f32 = 1.35;
/// Horizontal distance at which homing reaches full strength.
pub const HOMING_RANGE_SCALE: f32 = 900.0;
/// Distance at which the steering direction saturates.
pub const HOMING_STEER_SATURATION: f32 = 90.0;
pub const HOMING_MAX_VX: f32 = 260.0;

/// Horizontal speed of the two halves of a split food.
pub const SPLIT_SPEED_X: f32 = 180.0;

/// Result of one motion step.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionOutcome {
    Keep,
    /// The parent must be removed and both children added in the same tick.
    Split([Projectile; 2]),
}

impl Projectile {
    /// Advance by `dt`. `steer_target` is the point homing foods chase horizontally.
    pub fn advance(&mut self, dt: f32, steer_target: Vec2) -> MotionOutcome {
        if self.is_held() {
            return MotionOutcome::Keep;
        }

        if self.homing {
            self.vel.x = homing_vx(self.vel.x, steer_target.x - self.pos.x, self.strong_homing(), dt);
        }

        self.pos += self.vel * dt;
        self.age += dt;

        if let Some(wobble) = self.wobble {
            // Apply only the change since last frame so the sway never accumulates.
            let now = wobble.offset_at(self.age);
            self.pos.x += now - self.wobble_applied;
            self.wobble_applied = now;
        }

        if let Some(timer) = self.split_timer.as_mut() {
            *timer -= dt;
            if *timer <= 0.0 {
                self.split_timer = None;
                if let Some(children) = self.split_children() {
                    return MotionOutcome::Split(children);
                }
            }
        }

        MotionOutcome::Keep
    }

    #[inline]
    fn strong_homing(&self) -> bool {
        self.kind.strong_homing()
    }

    fn split_children(&self) -> Option<[Projectile; 2]> {
        let [left_kind, right_kind] = self.kind.split_into()?;
        let nudge = Vec2::new(self.size.x * 0.25, 0.0);
        let child = |kind, pos: Vec2, vx: f32| {
            let mut c = Projectile::new(kind, self.category, pos, Vec2::new(vx, self.vel.y));
            c.hitbox_scale = self.hitbox_scale;
            c.neutralized = self.neutralized;
            c
        };
        Some([
            child(left_kind, self.pos - nudge, -SPLIT_SPEED_X),
            child(right_kind, self.pos + nudge, SPLIT_SPEED_X),
        ])
    }

    /// True once the sprite lies entirely beyond the padded viewport on any side.
    #[inline]
    pub fn is_outside(&self, arena: &Arena) -> bool {
        let bounds = arena.cull_bounds();
        let r = self.rect();
        r.min.y > bounds.max.y || r.max.y < bounds.min.y || r.max.x < bounds.min.x || r.min.x > bounds.max.x
    }
}

/// Proportional steering toward a horizontal offset `dx`, clamped to `HOMING_MAX_VX`.
pub fn homing_vx(vx: f32, dx: f32, strong: bool, dt: f32) -> f32 {
    let base = if strong { HOMING_STRENGTH_STRONG } else { HOMING_STRENGTH_WEAK };
    let reach = (dx.abs() / HOMING_RANGE_SCALE).min(1.0);
    let strength = base * (0.3 + 0.7 * reach);
    let steer = (dx / HOMING_STEER_SATURATION).clamp(-1.0, 1.0);
    (vx + strength * steer * 60.0 * dt).clamp(-HOMING_MAX_VX, HOMING_MAX_VX)
}
