//! Sequenced volleys of the orange-pork boss.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::prelude::*;
use rand::Rng;

use crate::plugins::projectiles::food::{FoodKind, FoodPool, FoodPools};
use crate::plugins::projectiles::request::{SpawnRequest, Wobble};

use super::{Emission, PatternCtx, PatternStatus};

/// Volley foods are a little more forgiving than the default hitbox.
pub const VOLLEY_HITBOX_SCALE: f32 = 0.9;

fn emit(out: &mut Vec<Emission>, req: SpawnRequest) {
    out.push(Emission::Spawn(req.with_hitbox_scale(VOLLEY_HITBOX_SCALE)));
}

/// Velocity at `deg` degrees off straight down.
fn downward(deg: f32, speed: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.sin(), rad.cos()) * speed
}

// -----------------------------------------------------------------------------
// Cone
// -----------------------------------------------------------------------------

pub const CONE_VOLLEYS: u32 = 3;
pub const CONE_INTERVAL: f32 = 1.0;
pub const CONE_ANGLES: [f32; 3] = [-20.0, 0.0, 20.0];
pub const CONE_SPEED: f32 = 300.0;

/// Three hot dogs in a cone, three times, one second apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cone {
    volley: u32,
    timer: f32,
}

impl Cone {
    pub fn tick(&mut self, ctx: &PatternCtx, out: &mut Vec<Emission>) -> PatternStatus {
        self.timer += ctx.dt;
        if self.volley < CONE_VOLLEYS && self.timer >= CONE_INTERVAL {
            self.timer = 0.0;
            self.volley += 1;
            for deg in CONE_ANGLES {
                emit(out, SpawnRequest::food(FoodKind::HotDog, ctx.muzzle(), downward(deg, CONE_SPEED)));
            }
        }
        if self.volley >= CONE_VOLLEYS { PatternStatus::Finished } else { PatternStatus::Running }
    }
}

// -----------------------------------------------------------------------------
// X-laser
// -----------------------------------------------------------------------------

pub const XLASER_DURATION: f32 = 4.0;
/// Radians per second.
pub const XLASER_SPIN: f32 = PI;
pub const XLASER_EMIT_INTERVAL: f32 = 0.14;
pub const XLASER_SPEED: f32 = 380.0;

/// A spinning cross; opposite arms share a kind.
#[derive(Debug, Clone, PartialEq)]
pub struct XLaser {
    remaining: f32,
    angle: f32,
    emit_cd: f32,
    kinds: (FoodKind, FoodKind),
}

impl XLaser {
    pub fn new(foods: &FoodPools, rng: &mut impl Rng) -> Self {
        let salty = foods.ring_salty.without(FoodKind::HotDog, [FoodKind::Ribs, FoodKind::FriedChicken]);
        Self {
            remaining: XLASER_DURATION,
            angle: rng.random_range(0.0..TAU),
            emit_cd: 0.0,
            kinds: (salty.choose(rng), foods.ring_sweet.choose(rng)),
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn tick(&mut self, ctx: &PatternCtx, out: &mut Vec<Emission>) -> PatternStatus {
        self.remaining = (self.remaining - ctx.dt).max(0.0);
        self.emit_cd -= ctx.dt;
        self.angle = (self.angle + XLASER_SPIN * ctx.dt).rem_euclid(TAU);

        if self.emit_cd <= 0.0 {
            self.emit_cd = XLASER_EMIT_INTERVAL;
            let origin = ctx.muzzle();
            let (a, b) = self.kinds;
            for (offset, kind) in [(0.0, a), (PI, a), (FRAC_PI_2, b), (3.0 * FRAC_PI_2, b)] {
                let vel = Vec2::from_angle(self.angle + offset) * XLASER_SPEED;
                emit(out, SpawnRequest::food(kind, origin, vel));
            }
        }

        if self.remaining <= 0.0 { PatternStatus::Finished } else { PatternStatus::Running }
    }
}

// -----------------------------------------------------------------------------
// S-curve
// -----------------------------------------------------------------------------

pub const SCURVE_SHOTS: u32 = 14;
pub const SCURVE_INTERVAL: f32 = 0.16;
pub const SCURVE_AMPLITUDES: [f32; 4] = [130.0, 165.0, 200.0, 235.0];
pub const SCURVE_SPREAD: [f32; 4] = [-70.0, -23.0, 23.0, 70.0];
pub const SCURVE_MAX_VX: f32 = 150.0;
pub const SCURVE_BASE_VY: f32 = 160.0;

/// Shots of four swaying foods, aimed loosely at the player.
#[derive(Debug, Clone, PartialEq)]
pub struct SCurve {
    timer: f32,
    shots_left: u32,
    pool: FoodPool,
}

impl SCurve {
    pub fn new(foods: &FoodPools) -> Self {
        let pool = foods
            .ring_salty
            .merged(&foods.ring_sweet, FoodPool::MIXED_FALLBACK)
            .without(FoodKind::HotDog, FoodPool::MIXED_FALLBACK);
        Self { timer: 0.0, shots_left: SCURVE_SHOTS, pool }
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        self.timer += ctx.dt;
        if self.shots_left > 0 && self.timer >= SCURVE_INTERVAL {
            self.timer = 0.0;
            self.shots_left -= 1;

            let origin = ctx.muzzle();
            let target_x = ctx.player.map_or(ctx.boss.center().x, |p| p.x);
            let dx = target_x - origin.x;
            for (j, (amp, spread)) in SCURVE_AMPLITUDES.into_iter().zip(SCURVE_SPREAD).enumerate() {
                let j = j as f32;
                let vel = Vec2::new(
                    (dx * 0.5 + spread).clamp(-SCURVE_MAX_VX, SCURVE_MAX_VX),
                    SCURVE_BASE_VY + 26.0 * j,
                );
                let wobble = Wobble::new(amp, 3.0 + 0.28 * j);
                emit(out, SpawnRequest::food(self.pool.choose(rng), origin, vel).with_wobble(wobble));
            }
        }
        if self.shots_left == 0 { PatternStatus::Finished } else { PatternStatus::Running }
    }
}

// -----------------------------------------------------------------------------
// Curtain
// -----------------------------------------------------------------------------

pub const CURTAIN_DURATION: f32 = 4.0;
pub const CURTAIN_EMIT_INTERVAL: f32 = 0.08;
pub const CURTAIN_COLUMNS: [f32; 4] = [0.09, 0.36, 0.73, 0.91];
pub const CURTAIN_SPEED: f32 = 560.0;

/// Four fast vertical streams from above the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Curtain {
    remaining: f32,
    emit_cd: f32,
    pool: FoodPool,
}

impl Curtain {
    pub fn new(foods: &FoodPools) -> Self {
        Self {
            remaining: CURTAIN_DURATION,
            emit_cd: 0.0,
            pool: foods.ring_salty.merged(&foods.ring_sweet, FoodPool::MIXED_FALLBACK),
        }
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        self.remaining = (self.remaining - ctx.dt).max(0.0);
        self.emit_cd -= ctx.dt;
        if self.emit_cd <= 0.0 {
            self.emit_cd = CURTAIN_EMIT_INTERVAL;
            for frac in CURTAIN_COLUMNS {
                let pos = Vec2::new((ctx.arena.width * frac).trunc(), -20.0);
                emit(out, SpawnRequest::food(self.pool.choose(rng), pos, Vec2::new(0.0, CURTAIN_SPEED)));
            }
        }
        if self.remaining <= 0.0 { PatternStatus::Finished } else { PatternStatus::Running }
    }
}
