//! Boss archetypes as data.
//!
//! A boss is one engine parameterized by a `BossConfig`. The three shipped bosses differ only
//! in the values below plus the sequenced extension their tag selects:
//!
//! | level | tag         | base kit | weak point | health           | extension |
//! |-------|-------------|----------|------------|------------------|-----------|
//! | 1     | `Basic`     | yes      | yes        | 4 bites          | -         |
//! | 2     | `NoAttacks` | no       | yes (6 s)  | 5 bites          | volleys   |
//! | 3     | `ParryOnly` | no       | no         | 6 parried soups  | coffin    |

use bevy::prelude::*;

use crate::common::tunables::Arena;
use crate::plugins::projectiles::food::{FoodKind, FoodPools};

/// Closed set of boss flavours. Behaviour differences are data, not subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossArchetype {
    /// Ring pair + downward burst + beam, bitten through its weak point.
    Basic,
    /// Base kit switched off; only a sequenced extension (if any) attacks.
    NoAttacks,
    /// Only a deflected parry soup can hurt it.
    ParryOnly,
}

impl BossArchetype {
    #[inline]
    pub fn runs_base_kit(self) -> bool {
        matches!(self, BossArchetype::Basic)
    }
}

/// How the sprite is kept inside its movement box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// The sprite rect edges stay inside the bounds.
    Edge,
    /// Only the sprite centre is clamped to the bounds.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integration {
    /// Float positions, sub-pixel steps accumulate.
    Smooth,
    /// Whole-pixel steps; the fractional part of every frame's step is dropped.
    Legacy,
}

/// Damage-driven speed-up (the coffin gets frantic near death).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    /// `scale = 1 + gain * damage^2`.
    pub gain: f32,
    /// Fraction of the base speed targeted at zero damage.
    pub cruise: f32,
    /// Fraction of the base speed the boss starts with.
    pub initial: f32,
    /// Easing rate toward the target speed, per second.
    pub ease_rate: f32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self { gain: 2.4, cruise: 0.9, initial: 0.8, ease_rate: 6.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    /// Base bounce speed (px/s) on each axis.
    pub speed: Vec2,
    pub left_bound: f32,
    pub right_bound: f32,
    pub y_top: f32,
    pub y_bottom: f32,
    /// Rect top the spawn animation lands on.
    pub y_target: f32,
    pub policy: BoundsPolicy,
    pub integration: Integration,
    pub ramp: Option<SpeedRamp>,
}

impl MovementConfig {
    pub fn for_arena(arena: &Arena) -> Self {
        Self {
            speed: Vec2::new(65.0, 34.0),
            left_bound: 40.0,
            right_bound: arena.width - 40.0,
            y_top: 50.0,
            y_bottom: 360.0,
            y_target: 70.0,
            policy: BoundsPolicy::Edge,
            integration: Integration::Legacy,
            ramp: None,
        }
    }
}

/// What it takes to kill a boss. Exactly one model per boss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthModel {
    Bites { to_kill: u32 },
    Parries { to_kill: u32 },
    /// No health at all; the boss leaves after this many active seconds.
    Lifetime { seconds: f32 },
}

impl HealthModel {
    /// Kill threshold, never zero. `None` for lifetime bosses.
    pub fn hits_to_kill(&self) -> Option<u32> {
        match *self {
            HealthModel::Bites { to_kill } | HealthModel::Parries { to_kill } => Some(to_kill.max(1)),
            HealthModel::Lifetime { .. } => None,
        }
    }
}

/// Base-kit timings and counts.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackConfig {
    pub shot_interval: f32,
    pub ring_interval: f32,
    pub ring_projectiles: u32,
    pub ring_pair_gap: f32,
    pub ring_speed: f32,
    /// Vertical speed of the downward burst.
    pub food_speed: f32,
    pub beam_interval: f32,
    pub beam_duration: f32,
    /// Foods per second while a beam is streaming.
    pub beam_rate: f32,
    pub beam_speed: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            shot_interval: 2.2,
            ring_interval: 3.6,
            ring_projectiles: 28,
            ring_pair_gap: 0.35,
            ring_speed: 260.0,
            food_speed: 300.0,
            beam_interval: 6.0,
            beam_duration: 1.6,
            beam_rate: 18.0,
            beam_speed: 420.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeakPointConfig {
    pub size: Vec2,
    pub lifetime: f32,
    /// Delay before the first weak point of an encounter.
    pub initial_delay: f32,
    /// Delay after a weak point spawns or times out.
    pub respawn: f32,
    /// Delay after a weak point is bitten.
    pub respawn_after_bite: f32,
}

impl Default for WeakPointConfig {
    fn default() -> Self {
        Self {
            size: Vec2::splat(44.0),
            lifetime: 4.0,
            initial_delay: 0.4,
            respawn: 1.2,
            respawn_after_bite: 2.0,
        }
    }
}

/// Sequenced attack extension selected by the archetype tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// Level-2 roster: cone, X-laser, S-curve, curtain.
    Volleys,
    /// Level-3 roster: circle spiral, grid, shotguns, square; drops parry soups.
    Coffin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossConfig {
    pub archetype: BossArchetype,
    pub size: Vec2,
    pub spawn_duration: f32,
    pub hit_flash: f32,
    pub movement: MovementConfig,
    pub health: HealthModel,
    /// Master switch; `false` silences every pattern, base kit and extension alike.
    pub attacks_enabled: bool,
    pub attacks: AttackConfig,
    pub weak_point: Option<WeakPointConfig>,
    pub extension: Option<Extension>,
    pub foods: FoodPools,
}

/// Smallest interval any timer may be configured with.
pub const MIN_INTERVAL: f32 = 0.05;

impl BossConfig {
    /// Shipped preset for a level; anything outside 1..=3 falls back to level 1.
    pub fn for_level(level: u8, arena: &Arena) -> Self {
        match level {
            2 => Self::orange_pork(arena),
            3 => Self::coffin(arena),
            _ => Self::dandan_burger(arena),
        }
    }

    pub fn dandan_burger(arena: &Arena) -> Self {
        Self {
            archetype: BossArchetype::Basic,
            size: Vec2::new(500.0, 320.0),
            spawn_duration: 1.2,
            hit_flash: 0.18,
            movement: MovementConfig::for_arena(arena),
            health: HealthModel::Bites { to_kill: 4 },
            attacks_enabled: true,
            attacks: AttackConfig::default(),
            weak_point: Some(WeakPointConfig::default()),
            extension: None,
            foods: FoodPools::default(),
        }
    }

    pub fn orange_pork(arena: &Arena) -> Self {
        use FoodKind::*;
        let base = Self::dandan_burger(arena);
        let salty = [FriedChicken, TaiwanBurger, StinkyTofu];
        let sweet = [BubbleTea, MangoIce, TofuPudding];
        let all: Vec<FoodKind> = salty.iter().chain(sweet.iter()).copied().collect();
        Self {
            archetype: BossArchetype::NoAttacks,
            movement: MovementConfig { speed: base.movement.speed * 1.1, ..base.movement },
            health: HealthModel::Bites { to_kill: 5 },
            attacks: AttackConfig {
                ring_projectiles: base.attacks.ring_projectiles + 4,
                beam_rate: base.attacks.beam_rate + 4.0,
                ..base.attacks
            },
            weak_point: Some(WeakPointConfig { lifetime: 6.0, ..WeakPointConfig::default() }),
            extension: Some(Extension::Volleys),
            foods: FoodPools::new(salty, sweet, all.clone(), all),
            ..base
        }
    }

    pub fn coffin(arena: &Arena) -> Self {
        use FoodKind::*;
        let base = Self::dandan_burger(arena);
        let salty = [BeefSoup, RiceBowlCake, TainanPorridge];
        let sweet = [TainanPudding, TainanIceCream, TainanTofuIce];
        let all: Vec<FoodKind> = salty.iter().chain(sweet.iter()).copied().collect();
        Self {
            archetype: BossArchetype::ParryOnly,
            hit_flash: 0.12,
            movement: MovementConfig {
                speed: base.movement.speed * Vec2::new(1.25, 1.2),
                integration: Integration::Smooth,
                ramp: Some(SpeedRamp::default()),
                ..base.movement
            },
            health: HealthModel::Parries { to_kill: 6 },
            attacks: AttackConfig {
                ring_projectiles: base.attacks.ring_projectiles + 8,
                ring_pair_gap: 0.30,
                beam_rate: base.attacks.beam_rate + 8.0,
                beam_speed: base.attacks.beam_speed * 1.1,
                ..base.attacks
            },
            weak_point: None,
            extension: Some(Extension::Coffin),
            // Pools drop the soup on their own.
            foods: FoodPools::new(salty, sweet, all.clone(), all),
            ..base
        }
    }

    /// Clamp every value into a range the engine can run with, warning about each fix.
    pub fn sanitized(mut self) -> Self {
        fn floor(name: &str, value: &mut f32, min: f32) {
            if !value.is_finite() || *value < min {
                warn!("boss config: {name}={value} clamped to {min}");
                *value = min;
            }
        }

        let a = &mut self.attacks;
        floor("shot_interval", &mut a.shot_interval, MIN_INTERVAL);
        floor("ring_interval", &mut a.ring_interval, MIN_INTERVAL);
        floor("ring_pair_gap", &mut a.ring_pair_gap, 0.0);
        floor("beam_interval", &mut a.beam_interval, MIN_INTERVAL);
        floor("beam_duration", &mut a.beam_duration, 0.0);
        floor("beam_rate", &mut a.beam_rate, 0.0);
        if a.ring_projectiles == 0 {
            warn!("boss config: ring_projectiles=0 clamped to 1");
            a.ring_projectiles = 1;
        }

        floor("spawn_duration", &mut self.spawn_duration, 0.0);
        floor("hit_flash", &mut self.hit_flash, 0.0);
        floor("size.x", &mut self.size.x, 1.0);
        floor("size.y", &mut self.size.y, 1.0);

        match &mut self.health {
            HealthModel::Bites { to_kill } | HealthModel::Parries { to_kill } if *to_kill == 0 => {
                warn!("boss config: hits to kill 0 clamped to 1");
                *to_kill = 1;
            }
            HealthModel::Lifetime { seconds } => floor("lifetime", seconds, 0.0),
            _ => {}
        }

        if let Some(wp) = self.weak_point.as_mut() {
            floor("weak_point.lifetime", &mut wp.lifetime, MIN_INTERVAL);
            floor("weak_point.respawn", &mut wp.respawn, MIN_INTERVAL);
            floor("weak_point.respawn_after_bite", &mut wp.respawn_after_bite, MIN_INTERVAL);
            floor("weak_point.initial_delay", &mut wp.initial_delay, 0.0);
        }

        let m = &mut self.movement;
        if m.right_bound < m.left_bound {
            warn!("boss config: horizontal bounds inverted, swapping");
            std::mem::swap(&mut m.left_bound, &mut m.right_bound);
        }
        if m.y_bottom < m.y_top {
            warn!("boss config: vertical bounds inverted, swapping");
            std::mem::swap(&mut m.y_top, &mut m.y_bottom);
        }

        self
    }
}
