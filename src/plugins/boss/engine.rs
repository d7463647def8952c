//! One boss instance: phase machine, movement, damage intake and everything it owns.
//!
//! ```text
//!  Spawning ──► Active ⇄ Paused ──► Dying ──► Dead
//!                  └──────────────────┘
//! ```
//! `update` runs the current phase's work in a fixed order. The caller resolves collisions
//! between ticks through the `try_*` / `resolve_*` helpers or the `register_*` calls.

use bevy::prelude::*;
use rand::Rng;

use crate::common::probe::PlayerProbe;
use crate::common::tunables::Arena;
use crate::plugins::parry;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::food::{Category, FoodKind};
use crate::plugins::projectiles::pool::ProjectileSet;

use super::archetype::{BossConfig, BoundsPolicy, HealthModel, Integration};
use super::difficulty::{Cadence, HealthRatio, speed_scale};
use super::fx::FxIntent;
use super::patterns::{AttackPattern, Emission, PatternCtx, Sequencer, base};
use super::weak_point::{WeakPoint, WeakPointSlot};

/// Pause after a damaging weak-point bite.
pub const BITE_PAUSE: f32 = 1.8;
/// Pause after a parried soup lands.
pub const PARRY_PAUSE: f32 = 0.5;
/// Death sequence length after being killed.
pub const DEATH_DURATION: f32 = 2.2;
/// Death sequence length when a lifetime boss runs out of time.
pub const EXPIRY_DEATH_DURATION: f32 = 2.0;
pub const DEATH_FALL_SPEED: f32 = 220.0;
pub const DEATH_FALL_ACCEL: f32 = 240.0;
pub const SMOKE_INTERVAL: f32 = 0.06;
pub const SHIELD_FLASH: f32 = 0.18;
/// Bite precision when the mouth touches the weak point directly.
pub const BITE_PRECISION_CONTACT: f32 = 0.35;
/// Bite precision when the bite is triggered by eating next to it.
pub const BITE_PRECISION_EAT: f32 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossPhase {
    Spawning { remaining: f32, total: f32 },
    Active,
    Paused { remaining: f32 },
    Dying { remaining: f32 },
    Dead,
}

/// Result of a damage registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Wrong phase or wrong health model; nothing changed.
    Ignored,
    /// Damage counted, boss paused.
    Staggered,
    /// Damage counted and it was the killing blow.
    Defeated,
}

impl HitOutcome {
    #[inline]
    pub fn counted(self) -> bool {
        !matches!(self, HitOutcome::Ignored)
    }
}

/// A projectile that touched the player and was consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub kind: FoodKind,
    pub category: Category,
    /// Taste matches the player's mode.
    pub matched: bool,
    /// False once the boss is dying: the player is immune from then on.
    pub harmful: bool,
}

#[derive(Debug, Clone)]
pub struct Boss {
    config: BossConfig,
    arena: Arena,
    phase: BossPhase,
    /// Sprite centre.
    pos: Vec2,
    vel: Vec2,
    hits_taken: u32,
    lifetime_left: Option<f32>,
    hit_flash: f32,
    shield_flash: f32,
    fume_cd: f32,
    smoke_cd: f32,
    fall_speed: f32,
    weak_point: Option<WeakPointSlot>,
    base_kit: Vec<AttackPattern>,
    sequencer: Option<Sequencer>,
    projectiles: ProjectileSet,
    fx: Vec<FxIntent>,
    emissions: Vec<Emission>,
}

impl Boss {
    /// Build a boss just above the top edge, ready to slide in.
    pub fn new(config: BossConfig, arena: Arena) -> Self {
        let config = config.sanitized();
        let m = &config.movement;
        let vel = match m.ramp {
            Some(ramp) => m.speed * ramp.initial,
            None => m.speed,
        };
        let base_kit = if config.archetype.runs_base_kit() { base::kit(&config.attacks) } else { Vec::new() };
        let lifetime_left = match config.health {
            HealthModel::Lifetime { seconds } => Some(seconds),
            _ => None,
        };

        Self {
            arena,
            phase: BossPhase::Spawning { remaining: config.spawn_duration, total: config.spawn_duration },
            pos: Vec2::new(arena.width * 0.5, -config.size.y * 0.5),
            vel,
            hits_taken: 0,
            lifetime_left,
            hit_flash: 0.0,
            shield_flash: 0.0,
            fume_cd: 0.0,
            smoke_cd: 0.0,
            fall_speed: 0.0,
            weak_point: config.weak_point.map(WeakPointSlot::new),
            base_kit,
            sequencer: config.extension.map(Sequencer::for_extension),
            projectiles: ProjectileSet::new(),
            fx: Vec::new(),
            emissions: Vec::new(),
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    #[inline]
    pub fn is_spawning(&self) -> bool {
        matches!(self.phase, BossPhase::Spawning { .. })
    }

    /// In combat: active or briefly paused after a hit.
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, BossPhase::Active | BossPhase::Paused { .. })
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, BossPhase::Paused { .. })
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        matches!(self.phase, BossPhase::Dying { .. })
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.phase, BossPhase::Dead)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.config.size
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, self.config.size)
    }

    #[inline]
    pub fn projectiles(&self) -> &ProjectileSet {
        &self.projectiles
    }

    /// Mutable access for the external loop (flagging, consuming).
    #[inline]
    pub fn projectiles_mut(&mut self) -> &mut ProjectileSet {
        &mut self.projectiles
    }

    #[inline]
    pub fn weak_point(&self) -> Option<&WeakPoint> {
        self.weak_point.as_ref().and_then(WeakPointSlot::live)
    }

    /// Respawn countdown of the weak point, if this boss has one.
    #[inline]
    pub fn weak_point_cooldown(&self) -> Option<f32> {
        self.weak_point.as_ref().map(WeakPointSlot::cooldown)
    }

    #[inline]
    pub fn hits_taken(&self) -> u32 {
        self.hits_taken
    }

    #[inline]
    pub fn hits_to_kill(&self) -> Option<u32> {
        self.config.health.hits_to_kill()
    }

    #[inline]
    pub fn lifetime_remaining(&self) -> Option<f32> {
        self.lifetime_left
    }

    pub fn health_ratio(&self) -> HealthRatio {
        match self.config.health.hits_to_kill() {
            Some(to_kill) => HealthRatio::from_hits(self.hits_taken, to_kill),
            None => HealthRatio::FULL,
        }
    }

    pub fn cadence(&self) -> Cadence {
        Cadence::derive(self.health_ratio(), self.config.attacks.ring_interval, self.config.attacks.beam_interval)
    }

    #[inline]
    pub fn hit_flash(&self) -> f32 {
        self.hit_flash.max(0.0)
    }

    #[inline]
    pub fn shield_flash(&self) -> f32 {
        self.shield_flash
    }

    #[inline]
    pub fn base_kit(&self) -> &[AttackPattern] {
        &self.base_kit
    }

    #[inline]
    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }

    /// Take every queued cosmetic intent.
    pub fn drain_fx(&mut self) -> Vec<FxIntent> {
        std::mem::take(&mut self.fx)
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advance by `dt` seconds. A missing player means patterns aim at their fallbacks.
    pub fn update(&mut self, dt: f32, player: Option<Vec2>, rng: &mut impl Rng) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.phase {
            BossPhase::Spawning { remaining, total } => self.tick_spawning(dt, remaining, total),
            BossPhase::Active => self.tick_active(dt, player, rng),
            BossPhase::Paused { remaining } => self.tick_paused(dt, remaining, rng),
            BossPhase::Dying { remaining } => self.tick_dying(dt, remaining),
            BossPhase::Dead => {}
        }
    }

    fn spawn_target_y(&self) -> f32 {
        self.config.movement.y_target + self.config.size.y * 0.5
    }

    fn tick_spawning(&mut self, dt: f32, remaining: f32, total: f32) {
        let remaining = remaining - dt;
        let t = (1.0 - remaining / total.max(0.0001)).clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        let start = -self.config.size.y * 0.5;
        let end = self.spawn_target_y();

        if remaining <= 0.0 {
            self.pos.y = end;
            self.phase = BossPhase::Active;
            info!("boss {:?} entered the arena", self.config.archetype);
        } else {
            self.pos.y = start + (end - start) * eased;
            self.phase = BossPhase::Spawning { remaining, total };
        }
    }

    fn tick_active(&mut self, dt: f32, player: Option<Vec2>, rng: &mut impl Rng) {
        if let Some(left) = self.lifetime_left.as_mut() {
            *left = (*left - dt).max(0.0);
            if *left <= 0.0 {
                info!("boss lifetime expired");
                self.enter_dying(EXPIRY_DEATH_DURATION);
                return;
            }
        }

        self.tick_flashes(dt);
        self.integrate_movement(dt);
        self.tick_fume(dt, rng);

        let cadence = self.cadence();
        if self.config.attacks_enabled {
            self.run_patterns(dt, cadence, player, rng);
        }

        self.step_projectiles(dt);
        self.tick_weak_point(dt, rng);
    }

    fn tick_paused(&mut self, dt: f32, remaining: f32, rng: &mut impl Rng) {
        let remaining = remaining - dt;
        self.tick_flashes(dt);
        self.step_projectiles(dt);
        self.tick_weak_point(dt, rng);
        self.phase = if remaining <= 0.0 { BossPhase::Active } else { BossPhase::Paused { remaining } };
    }

    fn tick_dying(&mut self, dt: f32, remaining: f32) {
        let remaining = remaining - dt;
        self.fall_speed += DEATH_FALL_ACCEL * dt;
        self.pos.y += self.fall_speed * dt;

        self.smoke_cd -= dt;
        if self.smoke_cd <= 0.0 {
            self.fx.push(FxIntent::Smoke { pos: self.pos });
            self.smoke_cd = SMOKE_INTERVAL;
        }

        self.step_projectiles(dt);

        if remaining <= 0.0 {
            self.phase = BossPhase::Dead;
            self.projectiles.clear();
            info!("boss defeated, encounter over");
        } else {
            self.phase = BossPhase::Dying { remaining };
        }
    }

    fn tick_flashes(&mut self, dt: f32) {
        if self.hit_flash > 0.0 {
            self.hit_flash -= dt;
        }
        self.shield_flash = (self.shield_flash - dt).max(0.0);
    }

    fn integrate_movement(&mut self, dt: f32) {
        let m = &self.config.movement;
        let step = self.vel * dt;
        self.pos += match m.integration {
            Integration::Smooth => step,
            Integration::Legacy => step.trunc(),
        };

        let half = self.config.size * 0.5;
        let (min, max) = match m.policy {
            BoundsPolicy::Edge => (
                Vec2::new(m.left_bound + half.x, m.y_top + half.y),
                Vec2::new(m.right_bound - half.x, m.y_bottom - half.y),
            ),
            BoundsPolicy::Center => (Vec2::new(m.left_bound, m.y_top), Vec2::new(m.right_bound, m.y_bottom)),
        };
        bounce_axis(&mut self.pos.x, &mut self.vel.x, min.x, max.x);
        bounce_axis(&mut self.pos.y, &mut self.vel.y, min.y, max.y);

        if let Some(ramp) = m.ramp {
            let want = m.speed.abs() * ramp.cruise * speed_scale(self.health_ratio().damage(), ramp.gain);
            let sign = Vec2::new(sign_of(self.vel.x), sign_of(self.vel.y));
            let k = (ramp.ease_rate * dt).min(1.0);
            self.vel += (sign * want - self.vel) * k;

            let rect = self.rect();
            if rect.max.x >= m.right_bound - 1.0 && self.vel.x > 0.0 {
                self.vel.x = -self.vel.x.abs();
            } else if rect.min.x <= m.left_bound + 1.0 && self.vel.x < 0.0 {
                self.vel.x = self.vel.x.abs();
            }
        }
    }

    fn tick_fume(&mut self, dt: f32, rng: &mut impl Rng) {
        self.fume_cd -= dt;
        if self.fume_cd > 0.0 {
            return;
        }
        let rect = self.rect();
        let spread = (rect.width() / 5.0).trunc();
        let pos = Vec2::new(
            rect.center().x + rng.random_range(-spread..=spread),
            rect.min.y + rng.random_range(0.0..=20.0),
        );
        self.fx.push(FxIntent::Fume { pos });
        self.fume_cd = self.cadence().fume_interval;
    }

    fn run_patterns(&mut self, dt: f32, cadence: Cadence, player: Option<Vec2>, rng: &mut impl Rng) {
        let mut out = std::mem::take(&mut self.emissions);
        {
            let ctx = PatternCtx {
                dt,
                boss: self.rect(),
                player,
                arena: &self.arena,
                foods: &self.config.foods,
                attacks: &self.config.attacks,
                cadence,
            };
            for pattern in &mut self.base_kit {
                pattern.tick(&ctx, rng, &mut out);
            }
            if let Some(seq) = self.sequencer.as_mut() {
                seq.tick(&ctx, rng, &mut out);
            }
        }
        self.commit(&mut out);
        self.emissions = out;
    }

    /// Apply pattern output to the owned projectile set, draining `out`.
    fn commit(&mut self, out: &mut Vec<Emission>) {
        for emission in out.drain(..) {
            match emission {
                Emission::Spawn(req) => self.projectiles.push(Projectile::from_request(&req)),
                Emission::Release { hold, target, speed } => {
                    if let Some(p) = self.projectiles.find_held_mut(hold) {
                        p.release_toward(target, speed);
                    }
                }
            }
        }
    }

    fn step_projectiles(&mut self, dt: f32) {
        let rect = self.rect();
        let steer = Vec2::new(rect.center().x, rect.max.y);
        let report = self.projectiles.step(dt, steer, &self.arena);
        if report.culled > 0 {
            trace!("culled {} projectiles", report.culled);
        }
    }

    fn tick_weak_point(&mut self, dt: f32, rng: &mut impl Rng) {
        let rect = self.rect();
        if let Some(slot) = self.weak_point.as_mut() {
            slot.tick(dt, rect, rng);
        }
    }

    // -------------------------------------------------------------------------
    // Damage intake
    // -------------------------------------------------------------------------

    /// Count one bite. Only bite-model bosses in combat accept it.
    pub fn register_bite(&mut self) -> HitOutcome {
        if !self.is_active() || !matches!(self.config.health, HealthModel::Bites { .. }) {
            debug!("bite ignored in {:?}", self.phase);
            return HitOutcome::Ignored;
        }
        self.hit_flash = self.config.hit_flash;
        if let Some(slot) = self.weak_point.as_mut() {
            slot.bitten();
        }
        self.take_hit(BITE_PAUSE)
    }

    /// Count one parried soup strike. Only parry-model bosses in combat accept it.
    pub fn register_parry_hit(&mut self) -> HitOutcome {
        if !self.is_active() || !matches!(self.config.health, HealthModel::Parries { .. }) {
            debug!("parry hit ignored in {:?}", self.phase);
            return HitOutcome::Ignored;
        }
        self.hit_flash = self.config.hit_flash;
        self.shield_flash = SHIELD_FLASH;
        self.fx.push(FxIntent::ShieldFlash);
        let rect = self.rect();
        self.fx.push(FxIntent::Smoke { pos: Vec2::new(rect.center().x, rect.min.y + 9.0) });
        self.take_hit(PARRY_PAUSE)
    }

    fn take_hit(&mut self, pause: f32) -> HitOutcome {
        self.hits_taken += 1;
        self.fx.push(FxIntent::HitFlash);
        let to_kill = self.config.health.hits_to_kill().unwrap_or(1);
        if self.hits_taken >= to_kill {
            info!("boss took the killing blow ({}/{})", self.hits_taken, to_kill);
            self.enter_dying(DEATH_DURATION);
            HitOutcome::Defeated
        } else {
            debug!("boss hit ({}/{}), pausing {pause}s", self.hits_taken, to_kill);
            self.phase = BossPhase::Paused { remaining: pause };
            HitOutcome::Staggered
        }
    }

    fn enter_dying(&mut self, duration: f32) {
        self.phase = BossPhase::Dying { remaining: duration };
        self.fall_speed = DEATH_FALL_SPEED;
        self.smoke_cd = 0.0;
        if let Some(slot) = self.weak_point.as_mut() {
            slot.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Contact helpers for the external loop
    // -------------------------------------------------------------------------

    /// Bite the weak point if the probe reaches it with the right taste.
    pub fn try_bite(&mut self, probe: &PlayerProbe, precision: f32) -> HitOutcome {
        let hit = self.weak_point().is_some_and(|wp| wp.hit_by(probe, precision));
        if hit && self.is_active() { self.register_bite() } else { HitOutcome::Ignored }
    }

    /// Deflect every parry soup the probe touches while its timing window is open.
    /// Returns how many were deflected.
    pub fn try_parry(&mut self, probe: &PlayerProbe, rng: &mut impl Rng) -> usize {
        if !probe.parry_window {
            return 0;
        }
        let mut deflected = 0;
        for p in self.projectiles.iter_mut() {
            if p.kind.is_parry_kind() && !p.parried_by_player && probe.overlaps_rect(p.hitbox()) {
                parry::deflect(p, rng);
                deflected += 1;
            }
        }
        deflected
    }

    /// Score parried soups flying upward into the boss; each one is consumed.
    pub fn resolve_parry_strikes(&mut self) -> Vec<HitOutcome> {
        if !self.is_active() {
            return Vec::new();
        }
        let rect = self.rect();
        let strikes = self
            .projectiles
            .extract(|p| p.parried_by_player && p.rising() && !p.hitbox().intersect(rect).is_empty());
        strikes.iter().map(|_| self.register_parry_hit()).collect()
    }

    /// Consume every live projectile overlapping the probe. Deflected foods are skipped.
    pub fn resolve_player_contacts(&mut self, probe: &PlayerProbe) -> Vec<Contact> {
        let harmful = !(self.is_dying() || self.is_dead());
        self.projectiles
            .extract(|p| !p.is_inert() && probe.overlaps_rect(p.hitbox()))
            .into_iter()
            .map(|p| Contact { kind: p.kind, category: p.category, matched: p.category == probe.mode, harmful })
            .collect()
    }
}

/// Clamp `pos` into `[min, max]`, pointing `vel` back inside on contact.
fn bounce_axis(pos: &mut f32, vel: &mut f32, min: f32, max: f32) {
    if min > max {
        *pos = (min + max) * 0.5;
        return;
    }
    if *pos < min {
        *pos = min;
        *vel = vel.abs();
    } else if *pos > max {
        *pos = max;
        *vel = -vel.abs();
    }
}

#[inline]
fn sign_of(v: f32) -> f32 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}
