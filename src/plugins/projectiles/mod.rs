//! Food projectiles: catalogue, spawn intent, kinematics and boss-owned storage.
//!
//! # Data flow
//! ```text
//!  AttackPattern::tick ──► Vec<SpawnRequest> ──► ProjectileSet::commit
//!                                                      │
//!  Boss::update ─────────────────────────────► ProjectileSet::step
//!                                                ├─ Projectile::advance (homing, wobble, split)
//!                                                └─ Projectile::is_outside (cull)
//! ```
//! The set is plain data owned by one boss (or the parry gate). The encounter systems read it
//! between ticks to resolve contacts with the player.

pub mod components;
pub mod food;
pub mod motion;
pub mod pool;
pub mod request;
