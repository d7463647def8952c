//! Encounter plugin: the ECS wrapper around one boss fight.
//!
//! ```text
//!  OnEnter(InGame)
//!      start_encounter ──► Encounter { countdown, gate?, boss: None }
//!
//!  FixedUpdate (InGame, Encounter exists)
//!      tick_encounter    countdown → gate → summon, then Boss::update
//!      resolve_contacts  PlayerProbe vs gate soups / boss   ──► PlayerContact, BossDamaged
//!      forward_fx        Boss::drain_fx                      ──► FxIntent
//!      check_cleared     boss Dead                           ──► EncounterCleared, GameState::Cleared
//! ```
//!
//! The boss engine is plain data; everything here only moves data between it and the world.
//! The pieces that decide anything live on `Encounter` so they can be tested without a schedule.

pub mod messages;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::probe::PlayerProbe;
use crate::common::state::GameState;
use crate::common::tunables::{Arena, Tunables};
use crate::plugins::boss::engine::{BITE_PRECISION_CONTACT, BITE_PRECISION_EAT};
use crate::plugins::boss::{Boss, BossConfig, FxIntent, HitOutcome};
use crate::plugins::parry::ParryGate;
use crate::plugins::projectiles::food::FoodKind;

use messages::{BossDamaged, EncounterCleared, PlayerContact};

/// Which shipped boss the next encounter summons (1..=3).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelId(pub u8);

impl Default for LevelId {
    fn default() -> Self {
        Self(1)
    }
}

impl LevelId {
    /// The coffin can only be fought after the parry tutorial.
    #[inline]
    pub fn needs_parry_gate(self) -> bool {
        self.0 == 3
    }
}

/// The one random source every encounter system draws from.
#[derive(Resource, Debug, Clone)]
pub struct BossRng(pub SmallRng);

impl BossRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

/// Everything one tick of contact resolution produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContactReport {
    pub contacts: Vec<PlayerContact>,
    pub damage: Vec<BossDamaged>,
}

#[derive(Resource, Debug, Clone)]
pub struct Encounter {
    level: LevelId,
    arena: Arena,
    countdown: f32,
    gate: Option<ParryGate>,
    boss: Option<Boss>,
    cleared: bool,
}

impl Encounter {
    pub fn new(level: LevelId, tunables: &Tunables) -> Self {
        Self {
            level,
            arena: tunables.arena,
            countdown: tunables.boss_countdown.max(0.0),
            gate: level.needs_parry_gate().then(ParryGate::new),
            boss: None,
            cleared: false,
        }
    }

    #[inline]
    pub fn level(&self) -> LevelId {
        self.level
    }

    #[inline]
    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    #[inline]
    pub fn gate(&self) -> Option<&ParryGate> {
        self.gate.as_ref()
    }

    #[inline]
    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    #[inline]
    pub fn boss_mut(&mut self) -> Option<&mut Boss> {
        self.boss.as_mut()
    }

    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Replace the boss slot with a fresh boss built from `config`.
    pub fn summon(&mut self, config: BossConfig) {
        info!("summoning {:?} boss for level {}", config.archetype, self.level.0);
        self.boss = Some(Boss::new(config, self.arena));
    }

    /// One fixed tick. Before the boss exists this runs the countdown and the parry gate;
    /// the boss is summoned once both are satisfied. Returns true on the summoning tick.
    pub fn advance(&mut self, dt: f32, player: Option<Vec2>, rng: &mut impl Rng) -> bool {
        if let Some(gate) = self.gate.as_mut() {
            gate.update(dt, &self.arena);
        }

        if let Some(boss) = self.boss.as_mut() {
            boss.update(dt, player, rng);
            return false;
        }

        self.countdown = (self.countdown - dt).max(0.0);
        let gate_open = self.gate.as_ref().is_none_or(ParryGate::is_open);
        if self.countdown > 0.0 || !gate_open {
            return false;
        }

        self.summon(BossConfig::for_level(self.level.0, &self.arena));
        true
    }

    /// Resolve the probe against gate soups and the boss, in this order:
    /// gate parry, boss parry, direct bite, parry strikes, eaten food, eat-triggered bite.
    pub fn resolve_contacts(&mut self, probe: &PlayerProbe, rng: &mut impl Rng) -> ContactReport {
        let mut report = ContactReport::default();

        if let Some(gate) = self.gate.as_mut() {
            gate.try_parry(probe, rng);
            let eaten = gate.resolve_player_contacts(probe);
            report.contacts.extend((0..eaten).map(|_| PlayerContact {
                kind: FoodKind::PARRY,
                category: FoodKind::PARRY.category(),
                matched: probe.mode == FoodKind::PARRY.category(),
                harmful: true,
            }));
        }

        let Some(boss) = self.boss.as_mut() else {
            return report;
        };

        let deflected = boss.try_parry(probe, rng);
        if deflected > 0 {
            debug!("player deflected {deflected} soup(s)");
        }

        let outcome = boss.try_bite(probe, BITE_PRECISION_CONTACT);
        record_damage(&mut report, boss, outcome);
        for outcome in boss.resolve_parry_strikes() {
            record_damage(&mut report, boss, outcome);
        }

        let eaten = boss.resolve_player_contacts(probe);
        if eaten.iter().any(|c| c.matched && c.harmful) {
            let outcome = boss.try_bite(probe, BITE_PRECISION_EAT);
            record_damage(&mut report, boss, outcome);
        }
        report.contacts.extend(eaten.into_iter().map(PlayerContact::from));

        report
    }

    /// True exactly once: on the first call after the boss reached `Dead`.
    pub fn mark_cleared(&mut self) -> bool {
        if self.cleared || !self.boss.as_ref().is_some_and(Boss::is_dead) {
            return false;
        }
        self.cleared = true;
        true
    }
}

fn record_damage(report: &mut ContactReport, boss: &Boss, outcome: HitOutcome) {
    if outcome.counted() {
        report.damage.push(BossDamaged { outcome, hits_taken: boss.hits_taken(), hits_to_kill: boss.hits_to_kill() });
    }
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelId>();

    app.add_message::<PlayerContact>()
        .add_message::<BossDamaged>()
        .add_message::<FxIntent>()
        .add_message::<EncounterCleared>();

    app.add_systems(OnEnter(GameState::InGame), start_encounter);

    app.add_systems(
        FixedUpdate,
        (tick_encounter, resolve_contacts, forward_fx, check_cleared)
            .chain()
            .run_if(in_state(GameState::InGame))
            .run_if(resource_exists::<Encounter>),
    );
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn start_encounter(mut commands: Commands, tunables: Res<Tunables>, level: Res<LevelId>) {
    info!("encounter started: level {}, boss in {:.1}s", level.0, tunables.boss_countdown);
    commands.insert_resource(Encounter::new(*level, &tunables));
}

pub(crate) fn tick_encounter(
    time: Res<Time<Fixed>>,
    probe: Option<Res<PlayerProbe>>,
    mut rng: ResMut<BossRng>,
    mut encounter: ResMut<Encounter>,
) {
    let player = probe.map(|p| p.pos);
    encounter.advance(time.delta_secs(), player, &mut rng.0);
}

pub(crate) fn resolve_contacts(
    probe: Option<Res<PlayerProbe>>,
    mut rng: ResMut<BossRng>,
    mut encounter: ResMut<Encounter>,
    mut contacts: MessageWriter<PlayerContact>,
    mut damaged: MessageWriter<BossDamaged>,
) {
    let Some(probe) = probe else {
        debug!("no player probe, skipping contact resolution");
        return;
    };

    let report = encounter.resolve_contacts(&probe, &mut rng.0);
    contacts.write_batch(report.contacts);
    damaged.write_batch(report.damage);
}

pub(crate) fn forward_fx(mut encounter: ResMut<Encounter>, mut fx: MessageWriter<FxIntent>) {
    let Some(boss) = encounter.boss_mut() else {
        return;
    };
    fx.write_batch(boss.drain_fx());
}

pub(crate) fn check_cleared(
    mut encounter: ResMut<Encounter>,
    mut cleared: MessageWriter<EncounterCleared>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !encounter.mark_cleared() {
        return;
    }
    let level = encounter.level().0;
    info!("encounter cleared: level {level}");
    cleared.write(EncounterCleared { level });
    next.set(GameState::Cleared);
}

#[cfg(test)]
mod tests;
