//! Boss engine.
//!
//! Plain data driven by `Boss::update(dt, player, rng)`; no ECS types inside. The encounter
//! plugin owns a `Boss` and ticks it from `FixedUpdate`, tests drive it directly.
//!
//! - `archetype`: configuration records and the three level presets.
//! - `difficulty`: health ratio → cadence.
//! - `patterns`: base kit and sequenced extensions.
//! - `weak_point`: the bite target and its respawn slot.
//! - `engine`: the phase machine tying it all together.

pub mod archetype;
pub mod difficulty;
pub mod engine;
pub mod fx;
pub mod patterns;
pub mod weak_point;

pub use archetype::{BossArchetype, BossConfig};
pub use engine::{Boss, BossPhase, Contact, HitOutcome};
pub use fx::FxIntent;
