//! Cosmetic intents the renderer may turn into particles or tints.
//!
//! They carry no gameplay weight; the boss queues them and the renderer drains them.

use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum FxIntent {
    /// Small puff near the top of the sprite while active.
    Fume { pos: Vec2 },
    /// Death smoke trailing the falling boss.
    Smoke { pos: Vec2 },
    /// The boss took damage.
    HitFlash,
    /// A parried soup struck the coffin's shield.
    ShieldFlash,
}
