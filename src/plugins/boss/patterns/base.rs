//! The base kit: ring pair, downward burst and sustained beam.
//!
//! These never finish. Each owns its countdown; ring and beam intervals are taken from the
//! cadence the boss derived this tick.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::plugins::projectiles::food::{Category, FoodKind};
use crate::plugins::projectiles::request::SpawnRequest;

use super::{AttackPattern, Emission, PatternCtx, PatternStatus};
use crate::plugins::boss::archetype::AttackConfig;

/// Burst shots per volley.
pub const BURST_SHOTS: usize = 2;
pub const BURST_X_JITTER: i32 = 40;
pub const BURST_VX_SPREAD: f32 = 90.0;
pub const BEAM_VX_JITTER: f32 = 50.0;

/// The three base patterns in their initial state.
pub fn kit(attacks: &AttackConfig) -> Vec<AttackPattern> {
    vec![
        AttackPattern::RingPair(RingPair::new(attacks)),
        AttackPattern::DownwardBurst(DownwardBurst::default()),
        AttackPattern::Beam(Beam::default()),
    ]
}

/// Evenly spaced ring of one taste flying out from `center`.
pub fn ring(center: Vec2, count: u32, speed: f32, category: Category, ctx: &PatternCtx, rng: &mut impl Rng) -> Vec<SpawnRequest> {
    let pool = ctx.foods.ring(category);
    let n = count.max(1);
    (0..n)
        .map(|i| {
            let angle = TAU * i as f32 / n as f32;
            let vel = Vec2::from_angle(angle) * speed;
            SpawnRequest::tagged(pool.choose(rng), category, center, vel)
        })
        .collect()
}

/// Two rings of opposite taste, `ring_pair_gap` apart.
#[derive(Debug, Clone, PartialEq)]
pub struct RingPair {
    cooldown: f32,
    /// Second ring waiting for the gap to elapse.
    pending: Option<(Category, f32)>,
}

impl RingPair {
    pub fn new(attacks: &AttackConfig) -> Self {
        Self { cooldown: attacks.ring_interval * 0.5, pending: None }
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    #[inline]
    pub fn pending(&self) -> Option<Category> {
        self.pending.map(|(c, _)| c)
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        let a = ctx.attacks;
        let center = ctx.boss.center();
        self.cooldown -= ctx.dt;

        if let Some((category, gap)) = self.pending.as_mut() {
            *gap -= ctx.dt;
            if *gap <= 0.0 {
                let category = *category;
                self.pending = None;
                out.extend(ring(center, a.ring_projectiles, a.ring_speed, category, ctx, rng).into_iter().map(Emission::Spawn));
            }
        }

        if self.cooldown <= 0.0 && self.pending.is_none() {
            let first = Category::random(rng);
            out.extend(ring(center, a.ring_projectiles, a.ring_speed, first, ctx, rng).into_iter().map(Emission::Spawn));
            self.pending = Some((first.opposite(), a.ring_pair_gap));
            self.cooldown = ctx.cadence.ring_interval;
        }

        PatternStatus::Running
    }
}

/// Two light foods dropped from the boss centre every `shot_interval`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownwardBurst {
    cooldown: f32,
}

impl DownwardBurst {
    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        self.cooldown -= ctx.dt;
        if self.cooldown > 0.0 {
            return PatternStatus::Running;
        }

        let center = ctx.boss.center();
        for _ in 0..BURST_SHOTS {
            let kind = ctx.foods.burst.choose(rng);
            let x = center.x + rng.random_range(-BURST_X_JITTER..=BURST_X_JITTER) as f32;
            let vel = Vec2::new(rng.random_range(-BURST_VX_SPREAD..=BURST_VX_SPREAD), ctx.attacks.food_speed);
            out.push(Emission::Spawn(SpawnRequest::food(kind, Vec2::new(x, center.y), vel)));
        }
        self.cooldown = ctx.attacks.shot_interval;
        PatternStatus::Running
    }
}

/// One kind streamed at the player's column for `beam_duration`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beam {
    cooldown: f32,
    remaining: f32,
    kind: Option<FoodKind>,
    accum: f32,
}

impl Beam {
    #[inline]
    pub fn is_streaming(&self) -> bool {
        self.remaining > 0.0
    }

    #[inline]
    pub fn kind(&self) -> Option<FoodKind> {
        self.kind
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        let a = ctx.attacks;
        self.cooldown -= ctx.dt;

        if self.remaining > 0.0 {
            self.remaining = (self.remaining - ctx.dt).max(0.0);
            self.accum += a.beam_rate * ctx.dt;
            let x = ctx.player.map_or(ctx.boss.center().x, |p| p.x);
            let origin = Vec2::new(x, ctx.boss.max.y);
            while self.accum >= 1.0 {
                self.accum -= 1.0;
                let kind = match self.kind {
                    Some(k) => k,
                    None => ctx.foods.beam.choose(rng),
                };
                let vel = Vec2::new(rng.random_range(-BEAM_VX_JITTER..=BEAM_VX_JITTER), a.beam_speed);
                out.push(Emission::Spawn(SpawnRequest::food(kind, origin, vel)));
            }
        } else if self.cooldown <= 0.0 {
            self.kind = Some(ctx.foods.beam.choose(rng));
            self.remaining = a.beam_duration;
            self.accum = 0.0;
            self.cooldown = ctx.cadence.beam_interval;
        }

        PatternStatus::Running
    }
}
