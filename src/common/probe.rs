//! What the boss engine needs to know about the player each tick.
//!
//! The mouth controller (spring follow, mode toggling, parry timing) lives outside this
//! crate; it only publishes this snapshot.

use bevy::prelude::*;

use crate::plugins::projectiles::food::Category;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerProbe {
    pub pos: Vec2,
    pub radius: f32,
    pub mode: Category,
    /// True while the controller's deflection timing window is open.
    pub parry_window: bool,
}

impl PlayerProbe {
    pub fn new(pos: Vec2, radius: f32, mode: Category) -> Self {
        Self { pos, radius, mode, parry_window: false }
    }

    #[inline]
    pub fn overlaps_rect(&self, rect: Rect) -> bool {
        let nearest = self.pos.clamp(rect.min, rect.max);
        nearest.distance_squared(self.pos) <= self.radius * self.radius
    }

    /// Circle test against a point target whose own radius is already scaled.
    #[inline]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let rr = self.radius + radius;
        center.distance_squared(self.pos) <= rr * rr
    }
}

impl Default for PlayerProbe {
    fn default() -> Self {
        Self::new(Vec2::new(300.0, 760.0), 20.0, Category::Salty)
    }
}
