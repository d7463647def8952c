//! Buffered encounter outcomes.
//!
//! The encounter systems are the only producers. Consumers (score, player health, audio,
//! renderer) read them without touching the boss itself.

use bevy::prelude::*;

use crate::plugins::boss::{Contact, HitOutcome};
use crate::plugins::projectiles::food::{Category, FoodKind};

/// A food reached the player's mouth and was consumed.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PlayerContact {
    pub kind: FoodKind,
    pub category: Category,
    /// Taste matched the player's mode: it feeds instead of hurting.
    pub matched: bool,
    /// False once the boss is dying.
    pub harmful: bool,
}

impl From<Contact> for PlayerContact {
    fn from(c: Contact) -> Self {
        Self { kind: c.kind, category: c.category, matched: c.matched, harmful: c.harmful }
    }
}

/// A bite or parry strike counted against the boss.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossDamaged {
    pub outcome: HitOutcome,
    pub hits_taken: u32,
    /// `None` for lifetime bosses, which never take damage anyway.
    pub hits_to_kill: Option<u32>,
}

/// The boss finished its death sequence.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncounterCleared {
    pub level: u8,
}
