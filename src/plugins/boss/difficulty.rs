//! Health-scaled aggression.
//!
//! Everything here is a pure function of the remaining-health ratio. The boss re-derives the
//! cadence on every active tick, so no interval ever outlives the health value it came from.

/// Remaining health normalized to [0..1]; 1 is untouched, 0 is dead.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HealthRatio(f32);

impl HealthRatio {
    pub const FULL: Self = Self(1.0);

    #[inline]
    pub fn new_clamped(v: f32) -> Self {
        if v.is_nan() { Self::FULL } else { Self(v.clamp(0.0, 1.0)) }
    }

    /// `1 - taken / max(1, to_kill)`.
    #[inline]
    pub fn from_hits(taken: u32, to_kill: u32) -> Self {
        Self::new_clamped(1.0 - taken as f32 / to_kill.max(1) as f32)
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    /// Damage ratio, the complement of the health ratio.
    #[inline]
    pub fn damage(self) -> f32 {
        1.0 - self.0
    }
}

/// Intervals derived from one health ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    pub ring_interval: f32,
    pub beam_interval: f32,
    pub fume_interval: f32,
}

impl Cadence {
    pub fn derive(health: HealthRatio, ring_base: f32, beam_base: f32) -> Self {
        let h = health.get();
        Self {
            ring_interval: (ring_base * (0.6 + 0.9 * h)).max(1.8),
            beam_interval: (beam_base * (0.7 + 1.0 * h)).max(2.5),
            fume_interval: fume_interval(health.damage()),
        }
    }
}

/// Seconds between fume puffs; puffs come faster as damage piles up.
#[inline]
pub fn fume_interval(damage: f32) -> f32 {
    (1.2 - 0.9 * damage.clamp(0.0, 1.0)).max(0.18)
}

/// Quadratic speed multiplier used by the speed ramp: `1 + gain * damage^2`.
#[inline]
pub fn speed_scale(damage: f32, gain: f32) -> f32 {
    let d = damage.clamp(0.0, 1.0);
    1.0 + gain * d * d
}
