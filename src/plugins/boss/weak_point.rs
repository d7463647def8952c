//! The bite target riding on the boss.
//!
//! A weak point picks its taste once, sits at a fixed offset on the lower rim of the sprite
//! and follows the boss until it times out or is bitten. `WeakPointSlot` owns the respawn
//! timer: a bite schedules a longer wait than a timeout.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;

use crate::common::probe::PlayerProbe;
use crate::plugins::projectiles::food::Category;

use super::archetype::WeakPointConfig;

/// Offset as a fraction of the boss extents.
pub const RIM_FRACTION: f32 = 0.42;
/// Angle range of the offset, lower half only (y grows downward).
pub const ANGLE_MIN: f32 = 0.20 * PI;
pub const ANGLE_MAX: f32 = 0.80 * PI;

#[derive(Debug, Clone, PartialEq)]
pub struct WeakPoint {
    pub category: Category,
    pub offset: Vec2,
    pub pos: Vec2,
    pub size: Vec2,
    pub remaining: f32,
    pub alive: bool,
}

impl WeakPoint {
    pub fn spawn(boss: Rect, size: Vec2, lifetime: f32, rng: &mut impl Rng) -> Self {
        let category = Category::random(rng);
        let angle = rng.random_range(ANGLE_MIN..=ANGLE_MAX);
        let offset = boss.size() * RIM_FRACTION * Vec2::new(angle.cos(), angle.sin());
        Self {
            category,
            offset,
            pos: boss.center() + offset,
            size,
            remaining: lifetime,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32, boss: Rect) {
        self.remaining -= dt;
        self.pos = boss.center() + self.offset;
        if self.remaining <= 0.0 {
            self.alive = false;
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.max_element() * 0.5
    }

    /// Precise bite test: taste must match and the mouth must reach within
    /// `radius * precision` of the centre.
    pub fn hit_by(&self, probe: &PlayerProbe, precision: f32) -> bool {
        self.alive && probe.mode == self.category && probe.overlaps_circle(self.pos, self.radius() * precision)
    }
}

/// What happened to the slot during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEvent {
    Idle,
    Spawned,
    Expired,
}

/// Zero or one live weak point plus its respawn countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct WeakPointSlot {
    config: WeakPointConfig,
    live: Option<WeakPoint>,
    cooldown: f32,
}

impl WeakPointSlot {
    pub fn new(config: WeakPointConfig) -> Self {
        Self { config, live: None, cooldown: config.initial_delay }
    }

    #[inline]
    pub fn live(&self) -> Option<&WeakPoint> {
        self.live.as_ref()
    }

    /// Seconds until the next weak point may appear.
    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn tick(&mut self, dt: f32, boss: Rect, rng: &mut impl Rng) -> SlotEvent {
        match self.live.as_mut() {
            None => {
                self.cooldown -= dt;
                if self.cooldown > 0.0 {
                    return SlotEvent::Idle;
                }
                let wp = WeakPoint::spawn(boss, self.config.size, self.config.lifetime, rng);
                debug!("weak point spawned ({:?}) at {:?}", wp.category, wp.pos);
                self.live = Some(wp);
                self.cooldown = self.config.respawn;
                SlotEvent::Spawned
            }
            Some(wp) => {
                wp.update(dt, boss);
                if wp.alive {
                    return SlotEvent::Idle;
                }
                debug!("weak point expired");
                self.live = None;
                self.cooldown = self.config.respawn;
                SlotEvent::Expired
            }
        }
    }

    /// Remove the live weak point after a bite and schedule the longer respawn.
    pub fn bitten(&mut self) -> bool {
        match self.live.take() {
            Some(_) => {
                self.cooldown = self.config.respawn_after_bite;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.live = None;
    }
}
