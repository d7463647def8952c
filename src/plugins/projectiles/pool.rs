//! Boss-owned projectile storage.
//!
//! Unordered and unbounded, but culled every step. `commit` is the single place requests turn
//! into live projectiles and `step` is the single place they leave (split or culled), so the
//! collection never holds a food that is already off-screen after a step.

use bevy::prelude::*;

use crate::common::tunables::Arena;

use super::components::Projectile;
use super::motion::MotionOutcome;
use super::request::{Hold, SpawnRequest};

#[derive(Debug, Default, Clone)]
pub struct ProjectileSet {
    items: Vec<Projectile>,
    // Children produced by splits during a step; merged after the parent loop.
    spawned: Vec<Projectile>,
}

/// Bookkeeping from one `step`, mostly for logs and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub culled: usize,
    pub split: usize,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.items.iter_mut()
    }

    pub fn push(&mut self, projectile: Projectile) {
        self.items.push(projectile);
    }

    /// Turn queued requests into live projectiles, draining the queue.
    pub fn commit(&mut self, requests: impl IntoIterator<Item = SpawnRequest>) {
        self.items
            .extend(requests.into_iter().map(|req| Projectile::from_request(&req)));
    }

    pub fn find_held_mut(&mut self, hold: Hold) -> Option<&mut Projectile> {
        self.items.iter_mut().find(|p| p.hold == Some(hold))
    }

    /// Keep only projectiles for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Projectile) -> bool) {
        self.items.retain(keep);
    }

    /// Remove and return every projectile matching `take`.
    pub fn extract(&mut self, mut take: impl FnMut(&Projectile) -> bool) -> Vec<Projectile> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.items.len() {
            if take(&self.items[i]) {
                taken.push(self.items.swap_remove(i));
            } else {
                i += 1;
            }
        }
        taken
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Move everything, replace split parents by their children and cull off-screen foods.
    pub fn step(&mut self, dt: f32, steer_target: Vec2, arena: &Arena) -> StepReport {
        let mut report = StepReport::default();
        let mut spawned = std::mem::take(&mut self.spawned);

        self.items.retain_mut(|p| match p.advance(dt, steer_target) {
            MotionOutcome::Split(children) => {
                spawned.extend(children);
                report.split += 1;
                false
            }
            MotionOutcome::Keep => {
                let outside = p.is_outside(arena);
                report.culled += usize::from(outside);
                !outside
            }
        });

        self.items.append(&mut spawned);
        self.spawned = spawned;
        report
    }
}
