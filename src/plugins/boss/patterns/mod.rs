//! Attack patterns.
//!
//! Every pattern is a small state machine with named fields that, once per active tick,
//! appends `Emission`s to a buffer the boss commits afterwards. Patterns never move the boss
//! and never touch the projectile collection directly.
//!
//! Two ways of running them:
//! - the base kit (ring pair, downward burst, beam) runs concurrently, forever, each pattern
//!   on its own countdown;
//! - a `Sequencer` runs one extension pattern at a time, resting between them.
//!
//! While the boss is paused nothing here is ticked, so a pattern that was mid-fire resumes
//! exactly where it stopped.

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::Arena;
use crate::plugins::projectiles::food::FoodPools;
use crate::plugins::projectiles::request::{Hold, SpawnRequest};

use super::archetype::{AttackConfig, Extension};
use super::difficulty::Cadence;

pub mod base;
pub mod coffin;
pub mod volley;


/// Read-only view of the boss a pattern may aim from.
#[derive(Debug, Clone, Copy)]
pub struct PatternCtx<'a> {
    pub dt: f32,
    /// Boss sprite rect this tick.
    pub boss: Rect,
    pub player: Option<Vec2>,
    pub arena: &'a Arena,
    pub foods: &'a FoodPools,
    pub attacks: &'a AttackConfig,
    pub cadence: Cadence,
}

impl PatternCtx<'_> {
    /// Bottom-centre of the boss, where most volleys leave from.
    #[inline]
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.boss.center().x, self.boss.max.y)
    }

    /// Player position, or a point `drop` pixels below the boss centre when nobody is there.
    #[inline]
    pub fn player_or_below(&self, drop: f32) -> Vec2 {
        self.player.unwrap_or(self.boss.center() + Vec2::new(0.0, drop))
    }
}

/// Output of a pattern tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    Spawn(SpawnRequest),
    /// Launch a held projectile toward `target`. A no-op if it was already consumed.
    Release { hold: Hold, target: Vec2, speed: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternStatus {
    Running,
    Finished,
}

/// Every pattern variant a boss can run.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackPattern {
    RingPair(base::RingPair),
    DownwardBurst(base::DownwardBurst),
    Beam(base::Beam),
    Cone(volley::Cone),
    XLaser(volley::XLaser),
    SCurve(volley::SCurve),
    Curtain(volley::Curtain),
    CircleSpiral(coffin::CircleSpiral),
    Grid(coffin::Grid),
    Shotgun(coffin::Shotgun),
    Square(coffin::SquareConverge),
}

impl AttackPattern {
    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) -> PatternStatus {
        match self {
            AttackPattern::RingPair(p) => p.tick(ctx, rng, out),
            AttackPattern::DownwardBurst(p) => p.tick(ctx, rng, out),
            AttackPattern::Beam(p) => p.tick(ctx, rng, out),
            AttackPattern::Cone(p) => p.tick(ctx, out),
            AttackPattern::XLaser(p) => p.tick(ctx, out),
            AttackPattern::SCurve(p) => p.tick(ctx, rng, out),
            AttackPattern::Curtain(p) => p.tick(ctx, rng, out),
            AttackPattern::CircleSpiral(p) => p.tick(ctx, out),
            AttackPattern::Grid(p) => p.tick(ctx, rng, out),
            AttackPattern::Shotgun(p) => p.tick(ctx, rng, out),
            AttackPattern::Square(p) => p.tick(ctx, rng, out),
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            AttackPattern::RingPair(_) => PatternKind::RingPair,
            AttackPattern::DownwardBurst(_) => PatternKind::DownwardBurst,
            AttackPattern::Beam(_) => PatternKind::Beam,
            AttackPattern::Cone(_) => PatternKind::Cone,
            AttackPattern::XLaser(_) => PatternKind::XLaser,
            AttackPattern::SCurve(_) => PatternKind::SCurve,
            AttackPattern::Curtain(_) => PatternKind::Curtain,
            AttackPattern::CircleSpiral(_) => PatternKind::CircleSpiral,
            AttackPattern::Grid(_) => PatternKind::Grid,
            AttackPattern::Shotgun(s) => match s.origin {
                coffin::FanOrigin::BossCentre => PatternKind::ShotgunCentre,
                coffin::FanOrigin::BelowScreen => PatternKind::ShotgunBottom,
            },
            AttackPattern::Square(_) => PatternKind::Square,
        }
    }
}

/// Pattern identity, used by rosters and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    RingPair,
    DownwardBurst,
    Beam,
    Cone,
    XLaser,
    SCurve,
    Curtain,
    CircleSpiral,
    Grid,
    ShotgunCentre,
    ShotgunBottom,
    Square,
}

impl PatternKind {
    pub const BASE_KIT: [PatternKind; 3] = [PatternKind::RingPair, PatternKind::DownwardBurst, PatternKind::Beam];

    /// Start a fresh run. `run` numbers held projectiles so runs never collide.
    pub fn start(self, ctx: &PatternCtx, run: u32, rng: &mut impl Rng, out: &mut Vec<Emission>) -> AttackPattern {
        match self {
            PatternKind::RingPair => AttackPattern::RingPair(base::RingPair::new(ctx.attacks)),
            PatternKind::DownwardBurst => AttackPattern::DownwardBurst(base::DownwardBurst::default()),
            PatternKind::Beam => AttackPattern::Beam(base::Beam::default()),
            PatternKind::Cone => AttackPattern::Cone(volley::Cone::default()),
            PatternKind::XLaser => AttackPattern::XLaser(volley::XLaser::new(ctx.foods, rng)),
            PatternKind::SCurve => AttackPattern::SCurve(volley::SCurve::new(ctx.foods)),
            PatternKind::Curtain => AttackPattern::Curtain(volley::Curtain::new(ctx.foods)),
            PatternKind::CircleSpiral => {
                AttackPattern::CircleSpiral(coffin::CircleSpiral::start(ctx, run, rng, out))
            }
            PatternKind::Grid => AttackPattern::Grid(coffin::Grid::new(ctx.arena)),
            PatternKind::ShotgunCentre => AttackPattern::Shotgun(coffin::Shotgun::new(coffin::FanOrigin::BossCentre)),
            PatternKind::ShotgunBottom => AttackPattern::Shotgun(coffin::Shotgun::new(coffin::FanOrigin::BelowScreen)),
            PatternKind::Square => AttackPattern::Square(coffin::SquareConverge::start(ctx)),
        }
    }

    /// Rest before the sequencer may pick again.
    pub fn rest(self) -> f32 {
        match self {
            PatternKind::Cone | PatternKind::XLaser | PatternKind::SCurve | PatternKind::Curtain => 2.0,
            PatternKind::ShotgunCentre | PatternKind::ShotgunBottom => 1.2,
            _ => 1.0,
        }
    }
}

/// Runs one extension pattern at a time, picked uniformly from a roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequencer {
    roster: &'static [PatternKind],
    cooldown: f32,
    current: Option<AttackPattern>,
    attacks_started: u32,
    /// Drop a parry soup before every n-th attack after the first n.
    parry_drop_every: Option<u32>,
}

impl Sequencer {
    pub const VOLLEYS: [PatternKind; 4] =
        [PatternKind::Cone, PatternKind::XLaser, PatternKind::SCurve, PatternKind::Curtain];
    pub const COFFIN: [PatternKind; 5] = [
        PatternKind::CircleSpiral,
        PatternKind::Grid,
        PatternKind::ShotgunCentre,
        PatternKind::ShotgunBottom,
        PatternKind::Square,
    ];

    pub fn for_extension(extension: Extension) -> Self {
        match extension {
            Extension::Volleys => Self::new(&Self::VOLLEYS, 2.0, None),
            Extension::Coffin => Self::new(&Self::COFFIN, 1.6, Some(2)),
        }
    }

    pub fn new(roster: &'static [PatternKind], first_delay: f32, parry_drop_every: Option<u32>) -> Self {
        Self { roster, cooldown: first_delay, current: None, attacks_started: 0, parry_drop_every }
    }

    #[inline]
    pub fn current(&self) -> Option<PatternKind> {
        self.current.as_ref().map(AttackPattern::kind)
    }

    #[inline]
    pub fn attacks_started(&self) -> u32 {
        self.attacks_started
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Force the next pick; used by tests and scripted encounters.
    pub fn start_now(&mut self, kind: PatternKind, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) {
        self.begin(kind, ctx, rng, out);
    }

    pub fn tick(&mut self, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) {
        self.cooldown -= ctx.dt;

        let Some(pattern) = self.current.as_mut() else {
            if self.cooldown <= 0.0 && !self.roster.is_empty() {
                let kind = self.roster[rng.random_range(0..self.roster.len())];
                self.begin(kind, ctx, rng, out);
            }
            return;
        };

        if pattern.tick(ctx, rng, out) == PatternStatus::Finished {
            let kind = pattern.kind();
            self.current = None;
            self.cooldown = kind.rest();
            debug!("pattern {kind:?} finished, resting {}s", self.cooldown);
        }
    }

    fn begin(&mut self, kind: PatternKind, ctx: &PatternCtx, rng: &mut impl Rng, out: &mut Vec<Emission>) {
        let soup_due = self
            .parry_drop_every
            .is_some_and(|every| self.attacks_started > 0 && self.attacks_started % every == 0);
        if soup_due {
            out.push(Emission::Spawn(coffin::parry_soup(ctx.arena, rng)));
        }
        self.attacks_started += 1;
        debug!("pattern {kind:?} started (#{})", self.attacks_started);
        self.current = Some(kind.start(ctx, self.attacks_started, rng, out));
    }
}
