//! Sequenced attacks of the coffin, plus the parry soup it drops between them.
//!
//! Every pick here goes through `FoodPools::any`, and the pools never hold the soup, so the
//! only soup on screen is the one `parry_soup` drops on purpose.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::Arena;
use crate::plugins::projectiles::food::FoodKind;
use crate::plugins::projectiles::request::{Hold, SpawnRequest};

use super::{Emission, PatternCtx, PatternStatus};

pub const COFFIN_HITBOX_SCALE: f32 = 0.92;

fn emit(out: &mut Vec<Emission>, req: SpawnRequest) {
    out.push(Emission::Spawn(req.with_hitbox_scale(COFFIN_HITBOX_SCALE)));
}

fn random_food(ctx: &PatternCtx, pos: Vec2, vel: Vec2, rng: &mut impl Rng) -> SpawnRequest {
    let (kind, category) = ctx.foods.any(rng);
    SpawnRequest::tagged(kind, category, pos, vel)
}

/// A deflectable soup dropped from above at a random column.
pub fn parry_soup(arena: &Arena, rng: &mut impl Rng) -> SpawnRequest {
    let x = rng.random_range((arena.width * 0.22).trunc()..=(arena.width * 0.78).trunc());
    let vel = Vec2::new(rng.random_range(-55.0..=55.0), 300.0);
    SpawnRequest::food(FoodKind::PARRY, Vec2::new(x, -40.0), vel)
}

// -----------------------------------------------------------------------------
// Circle, then spiral
// -----------------------------------------------------------------------------

pub const SPIRAL_COUNT: u16 = 18;
pub const SPIRAL_RADIUS: f32 = 180.0;
pub const SPIRAL_DELAY: f32 = 1.0;
pub const SPIRAL_RELEASE_INTERVAL: f32 = 0.08;
pub const SPIRAL_SPEED: f32 = 340.0;

/// Ring of frozen foods around the player, released one by one at the player.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleSpiral {
    run: u32,
    delay: f32,
    release_cd: f32,
    next: u16,
}

impl CircleSpiral {
    pub fn start(ctx: &PatternCtx, run: u32, rng: &mut impl Rng, out: &mut Vec<Emission>) -> Self {
        let center = ctx.player_or_below(80.0);
        for index in 0..SPIRAL_COUNT {
            let angle = TAU * index as f32 / SPIRAL_COUNT as f32;
            let pos = center + Vec2::from_angle(angle) * SPIRAL_RADIUS;
            let req = random_food(ctx, pos, Vec2::ZERO, rng).held(Hold { volley: run, index });
            emit(out, req);
        }
        Self { run, delay: SPIRAL_DELAY, release_cd: SPIRAL_RELEASE_INTERVAL, next: 0 }
    }

    pub fn tick(&mut self, ctx: &PatternCtx, out: &mut Vec<Emission>) -> PatternStatus {
        self.delay -= ctx.dt;
        if self.delay <= 0.0 {
            self.release_cd -= ctx.dt;
            if self.release_cd <= 0.0 && self.next < SPIRAL_COUNT {
                out.push(Emission::Release {
                    hold: Hold { volley: self.run, index: self.next },
                    target: ctx.player_or_below(100.0),
                    speed: SPIRAL_SPEED,
                });
                self.next += 1;
                self.release_cd = SPIRAL_RELEASE_INTERVAL;
            }
        }
        if self.next >= SPIRAL_COUNT { PatternStatus::Finished } else { PatternStatus::Running }
    }
}

// -----------------------------------------------------------------------------
// Grid
// -----------------------------------------------------------------------------

pub const GRID_COLUMNS: [f32; 3] = [0.18, 0.5, 0.82];
pub const GRID_ROWS: [f32; 3] = [0.25, 0.5, 0.75];
pub const GRID_DURATION: f32 = 2.8;
pub const GRID_EMIT_INTERVAL: f32 = 0.09;
pub const GRID_SPEED: f32 = 560.0;

/// Vertical streams from the top crossed by horizontal streams from both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: [f32; 3],
    rows: [f32; 3],
    remaining: f32,
    emit_cd: f32,
}

impl Grid {
    pub fn new(arena: &Arena) -> Self {
        Self {
            cols: GRID_COLUMNS.map(|f| (arena.width * f).trunc()),
            rows: GRID_ROWS.map(|f| (arena.height * f).trunc()),
            remaining: GRID_DURATION,
            emit_cd: 0.0,
        }
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        self.remaining = (self.remaining - ctx.dt).max(0.0);
        self.emit_cd -= ctx.dt;
        if self.emit_cd <= 0.0 {
            self.emit_cd = GRID_EMIT_INTERVAL;
            for x in self.cols {
                emit(out, random_food(ctx, Vec2::new(x, -30.0), Vec2::new(0.0, GRID_SPEED), rng));
            }
            for y in self.rows {
                let left = random_food(ctx, Vec2::new(-30.0, y), Vec2::new(GRID_SPEED, 0.0), rng);
                let right = SpawnRequest {
                    pos: Vec2::new(ctx.arena.width + 30.0, y),
                    vel: Vec2::new(-GRID_SPEED, 0.0),
                    ..left.clone()
                };
                emit(out, left);
                emit(out, right);
            }
        }
        if self.remaining <= 0.0 { PatternStatus::Finished } else { PatternStatus::Running }
    }
}

// -----------------------------------------------------------------------------
// Shotgun fans
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOrigin {
    /// Downward fan just below the boss centre.
    BossCentre,
    /// Narrow upward fans from four columns below the screen.
    BelowScreen,
}

pub const SHOTGUN_BURSTS: u32 = 3;
pub const SHOTGUN_INTERVAL: f32 = 0.18;
pub const CENTRE_FAN: [f32; 7] = [-35.0, -20.0, -8.0, 0.0, 8.0, 20.0, 35.0];
pub const CENTRE_FAN_SPEED: f32 = 380.0;
pub const BOTTOM_FAN: [f32; 3] = [-6.0, 0.0, 6.0];
pub const BOTTOM_FAN_SPEED: f32 = 340.0;
pub const BOTTOM_FAN_COLUMNS: usize = 4;

/// One kind per burst, fanned out.
#[derive(Debug, Clone, PartialEq)]
pub struct Shotgun {
    pub origin: FanOrigin,
    bursts_left: u32,
    cooldown: f32,
}

impl Shotgun {
    pub fn new(origin: FanOrigin) -> Self {
        Self { origin, bursts_left: SHOTGUN_BURSTS, cooldown: 0.0 }
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        self.cooldown -= ctx.dt;
        if self.cooldown <= 0.0 && self.bursts_left > 0 {
            self.cooldown = SHOTGUN_INTERVAL;
            self.bursts_left -= 1;
            let (kind, category) = ctx.foods.any(rng);
            let mut fire = |pos: Vec2, vel: Vec2| emit(out, SpawnRequest::tagged(kind, category, pos, vel));

            match self.origin {
                FanOrigin::BossCentre => {
                    let pos = ctx.boss.center() + Vec2::new(0.0, 24.0);
                    for deg in CENTRE_FAN {
                        let rad = deg.to_radians();
                        fire(pos, Vec2::new(rad.sin(), rad.cos()) * CENTRE_FAN_SPEED);
                    }
                }
                FanOrigin::BelowScreen => {
                    let y = ctx.arena.height + 24.0;
                    for i in 0..BOTTOM_FAN_COLUMNS {
                        let x = (ctx.arena.width * (0.2 + 0.2 * i as f32)).trunc();
                        for deg in BOTTOM_FAN {
                            let rad = deg.to_radians();
                            // Mostly vertical: sideways drift is damped hard.
                            let vel = Vec2::new(BOTTOM_FAN_SPEED * 0.18 * rad.sin(), -BOTTOM_FAN_SPEED * rad.cos());
                            fire(Vec2::new(x, y), vel);
                        }
                    }
                }
            }
        }
        if self.bursts_left == 0 { PatternStatus::Finished } else { PatternStatus::Running }
    }
}

// -----------------------------------------------------------------------------
// Square converge
// -----------------------------------------------------------------------------

pub const SQUARE_SIDE: f32 = 420.0;
pub const SQUARE_SPACING: f32 = 35.0;
pub const SQUARE_DURATION: f32 = 2.6;
pub const SQUARE_EMIT_INTERVAL: f32 = 0.085;
pub const SQUARE_BATCH: usize = 6;
pub const SQUARE_SPEED: f32 = 360.0;

/// Points every `spacing` pixels along the perimeter of a square centred on `center`,
/// walked clockwise from the top-left corner.
pub fn square_perimeter(center: Vec2, side: f32, spacing: f32) -> Vec<Vec2> {
    let per_side = (side / spacing.max(1.0)).round().max(1.0) as usize;
    let half = side * 0.5;
    let corners = [
        center + Vec2::new(-half, -half),
        center + Vec2::new(half, -half),
        center + Vec2::new(half, half),
        center + Vec2::new(-half, half),
    ];
    let mut points = Vec::with_capacity(per_side * 4);
    for (i, from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % 4];
        for k in 0..per_side {
            points.push(from.lerp(to, k as f32 / per_side as f32));
        }
    }
    points
}

/// Fires from under the boss at each perimeter point of a square around the player, in
/// small batches, until every point is served or time runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareConverge {
    targets: Vec<Vec2>,
    next: usize,
    remaining: f32,
    emit_cd: f32,
}

impl SquareConverge {
    pub fn start(ctx: &PatternCtx) -> Self {
        let center = ctx.player_or_below(140.0);
        Self {
            targets: square_perimeter(center, SQUARE_SIDE, SQUARE_SPACING),
            next: 0,
            remaining: SQUARE_DURATION,
            emit_cd: 0.0,
        }
    }

    #[inline]
    pub fn targets(&self) -> &[Vec2] {
        &self.targets
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        self.emit_cd -= ctx.dt;
        self.remaining = (self.remaining - ctx.dt).max(0.0);

        if self.emit_cd <= 0.0 && self.next < self.targets.len() {
            self.emit_cd = SQUARE_EMIT_INTERVAL;
            let origin = ctx.boss.center() + Vec2::new(0.0, 24.0);
            let end = (self.next + SQUARE_BATCH).min(self.targets.len());
            for &target in &self.targets[self.next..end] {
                let dir = (target - origin).try_normalize().unwrap_or(Vec2::Y);
                emit(out, random_food(ctx, origin, dir * SQUARE_SPEED, rng));
            }
            self.next = end;
        }

        if self.remaining <= 0.0 || self.next >= self.targets.len() {
            PatternStatus::Finished
        } else {
            PatternStatus::Running
        }
    }
}
