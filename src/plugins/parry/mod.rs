//! Parry mechanics.
//!
//! A soup touched while the player's timing window is open is *deflected*: it shoots back
//! up with a random sideways drift and stops counting as food. The boss scores the strike
//! when a deflected soup flies into it (see `Boss::resolve_parry_strikes`).
//!
//! `ParryGate` is the tutorial before the coffin: one soup is kept falling down the middle of
//! the screen, replaced whenever it leaves, until the player deflects one. Once opened the
//! gate stays open.

use bevy::prelude::*;
use rand::Rng;

use crate::common::probe::PlayerProbe;
use crate::common::tunables::Arena;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::food::FoodKind;
use crate::plugins::projectiles::pool::ProjectileSet;
use crate::plugins::projectiles::request::SpawnRequest;

/// Upward speed of a deflected soup.
pub const DEFLECT_SPEED: f32 = 520.0;
/// Max sideways drift of a deflected soup.
pub const DEFLECT_DRIFT: f32 = 120.0;
/// The gate soup falls slowly so the timing can be learned.
pub const GATE_FALL_SPEED: f32 = 140.0;
pub const GATE_SPAWN_Y: f32 = -40.0;

/// Turn a soup around. Idempotent for already-deflected foods.
pub fn deflect(p: &mut Projectile, rng: &mut impl Rng) {
    if p.parried_by_player {
        return;
    }
    p.vel = Vec2::new(rng.random_range(-DEFLECT_DRIFT..=DEFLECT_DRIFT), -DEFLECT_SPEED);
    p.parried_by_player = true;
    p.neutralized = true;
    p.homing = false;
    p.wobble = None;
}

#[derive(Debug, Clone, Default)]
pub struct ParryGate {
    soups: ProjectileSet,
    open: bool,
    spawned: u32,
}

impl ParryGate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Gate soups on screen, including deflected ones still flying away.
    #[inline]
    pub fn soups(&self) -> &ProjectileSet {
        &self.soups
    }

    /// How many soups the gate has dropped so far.
    #[inline]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Move soups and make sure a fresh one is falling while the gate is closed.
    pub fn update(&mut self, dt: f32, arena: &Arena) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.soups.step(dt, Vec2::ZERO, arena);

        let falling = self.soups.iter().any(|p| !p.parried_by_player);
        if !self.open && !falling {
            let pos = Vec2::new(arena.width * 0.5, GATE_SPAWN_Y);
            self.soups.commit([SpawnRequest::food(FoodKind::PARRY, pos, Vec2::new(0.0, GATE_FALL_SPEED))]);
            self.spawned += 1;
            debug!("parry gate dropped soup #{}", self.spawned);
        }
    }

    /// Deflect gate soups under the probe. Returns true when this call opened the gate.
    pub fn try_parry(&mut self, probe: &PlayerProbe, rng: &mut impl Rng) -> bool {
        if !probe.parry_window {
            return false;
        }
        let mut deflected = false;
        for p in self.soups.iter_mut() {
            if !p.parried_by_player && probe.overlaps_rect(p.hitbox()) {
                deflect(p, rng);
                deflected = true;
            }
        }
        if deflected && !self.open {
            self.open = true;
            info!("parry gate opened");
            return true;
        }
        false
    }

    /// Soups the player touched without parrying; they are eaten like any salty food.
    pub fn resolve_player_contacts(&mut self, probe: &PlayerProbe) -> usize {
        self.soups.extract(|p| !p.is_inert() && probe.overlaps_rect(p.hitbox())).len()
    }
}

#[cfg(test)]
mod tests;
