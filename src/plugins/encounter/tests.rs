use bevy::ecs::message::Messages;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::common::probe::PlayerProbe;
use crate::common::state::GameState;
use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::boss::archetype::HealthModel;
use crate::plugins::boss::{BossConfig, FxIntent, HitOutcome};
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::food::{Category, FoodKind};

use super::*;

const DT: f32 = 1.0 / 60.0;

fn quick_tunables() -> Tunables {
    Tunables { boss_countdown: 0.5, ..Tunables::default() }
}

/// A level-1 boss that is already active and dies to one bite.
fn fragile_boss_config(tunables: &Tunables) -> BossConfig {
    let mut cfg = BossConfig::for_level(1, &tunables.arena);
    cfg.spawn_duration = 0.0;
    cfg.attacks_enabled = false;
    cfg.health = HealthModel::Bites { to_kill: 1 };
    cfg
}

fn tick_until_weak_point(enc: &mut Encounter, rng: &mut SmallRng) -> PlayerProbe {
    for _ in 0..600 {
        enc.advance(DT, None, rng);
        if let Some(wp) = enc.boss().and_then(|b| b.weak_point()) {
            return PlayerProbe::new(wp.pos, 20.0, wp.category);
        }
    }
    panic!("weak point never appeared");
}

#[test]
fn level_three_needs_the_gate() {
    assert!(!LevelId(1).needs_parry_gate());
    assert!(!LevelId(2).needs_parry_gate());
    assert!(LevelId(3).needs_parry_gate());
    assert_eq!(LevelId::default(), LevelId(1));
}

#[test]
fn boss_is_summoned_after_countdown() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut enc = Encounter::new(LevelId(1), &tunables);
    assert!(enc.gate().is_none());

    let mut summoned_at = None;
    for i in 0..60 {
        if enc.advance(DT, None, &mut rng) {
            summoned_at = Some(i);
            break;
        }
    }
    let i = summoned_at.expect("boss summoned");
    assert!((29..=31).contains(&i), "summoned on tick {i}");
    assert!(enc.boss().is_some_and(|b| b.is_spawning()));

    // Further ticks drive the boss instead.
    assert!(!enc.advance(DT, None, &mut rng));
}

#[test]
fn coffin_waits_for_the_gate_to_open() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(2);
    let mut enc = Encounter::new(LevelId(3), &tunables);

    for _ in 0..120 {
        assert!(!enc.advance(DT, None, &mut rng));
    }
    assert_eq!(enc.countdown(), 0.0);
    assert!(enc.boss().is_none(), "gate still closed");

    let soup = enc.gate().and_then(|g| g.soups().iter().next()).map(|p| p.pos).expect("gate soup");
    let mut probe = PlayerProbe::new(soup, 20.0, Category::Sweet);
    probe.parry_window = true;
    let report = enc.resolve_contacts(&probe, &mut rng);
    assert!(report.contacts.is_empty());
    assert!(enc.gate().is_some_and(|g| g.is_open()));

    assert!(enc.advance(DT, None, &mut rng));
    let boss = enc.boss().expect("boss");
    assert_eq!(boss.config().archetype, crate::plugins::boss::BossArchetype::ParryOnly);
}

#[test]
fn eating_a_gate_soup_is_a_contact() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut enc = Encounter::new(LevelId(3), &tunables);
    enc.advance(DT, None, &mut rng);

    let soup = enc.gate().and_then(|g| g.soups().iter().next()).map(|p| p.pos).expect("gate soup");
    let probe = PlayerProbe::new(soup, 20.0, Category::Salty);
    let report = enc.resolve_contacts(&probe, &mut rng);
    assert_eq!(report.contacts.len(), 1);
    let c = report.contacts[0];
    assert_eq!(c.kind, FoodKind::BeefSoup);
    assert!(c.matched && c.harmful);
    assert!(enc.gate().is_some_and(|g| !g.is_open()));
}

#[test]
fn bite_reports_damage_and_clears_once() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(4);
    let mut enc = Encounter::new(LevelId(1), &tunables);
    enc.summon(fragile_boss_config(&tunables));

    let probe = tick_until_weak_point(&mut enc, &mut rng);
    let report = enc.resolve_contacts(&probe, &mut rng);
    assert_eq!(
        report.damage,
        vec![BossDamaged { outcome: HitOutcome::Defeated, hits_taken: 1, hits_to_kill: Some(1) }]
    );
    assert!(!enc.mark_cleared(), "still dying");

    for _ in 0..200 {
        enc.advance(DT, None, &mut rng);
    }
    assert!(enc.boss().is_some_and(|b| b.is_dead()));
    assert!(enc.mark_cleared());
    assert!(!enc.mark_cleared());
    assert!(enc.is_cleared());
}

#[test]
fn eaten_food_is_reported_with_taste() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(5);
    let mut enc = Encounter::new(LevelId(1), &tunables);
    enc.summon(fragile_boss_config(&tunables));
    enc.advance(DT, None, &mut rng);

    let probe = PlayerProbe::new(Vec2::new(120.0, 800.0), 20.0, Category::Salty);
    let boss = enc.boss_mut().expect("boss");
    boss.projectiles_mut().push(Projectile::new(FoodKind::Soda, Category::Sweet, probe.pos, Vec2::ZERO));

    let report = enc.resolve_contacts(&probe, &mut rng);
    assert_eq!(report.contacts.len(), 1);
    assert!(!report.contacts[0].matched);
    assert!(report.damage.is_empty());
}

// -----------------------------------------------------------------------------
// ECS/system tests
// -----------------------------------------------------------------------------

fn world_with_encounter(enc: Encounter) -> World {
    let mut world = World::new();
    world.insert_resource(fixed_time_with_delta(DT));
    world.insert_resource(BossRng::seeded(9));
    world.insert_resource(enc);
    world.init_resource::<Messages<PlayerContact>>();
    world.init_resource::<Messages<BossDamaged>>();
    world.init_resource::<Messages<FxIntent>>();
    world.init_resource::<Messages<EncounterCleared>>();
    world.init_resource::<NextState<GameState>>();
    world
}

#[test]
fn tick_encounter_advances_countdown() {
    let tunables = quick_tunables();
    let mut world = world_with_encounter(Encounter::new(LevelId(1), &tunables));

    run_system_once(&mut world, tick_encounter);

    let enc = world.resource::<Encounter>();
    assert!(enc.countdown() < 0.5);
    assert!(enc.boss().is_none());
}

#[test]
fn resolve_contacts_without_probe_does_nothing() {
    let tunables = quick_tunables();
    let mut enc = Encounter::new(LevelId(1), &tunables);
    enc.summon(fragile_boss_config(&tunables));
    let mut world = world_with_encounter(enc);

    run_system_once(&mut world, resolve_contacts);

    assert!(world.resource_mut::<Messages<PlayerContact>>().drain().next().is_none());
}

#[test]
fn resolve_contacts_writes_damage_messages() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(6);
    let mut enc = Encounter::new(LevelId(1), &tunables);
    enc.summon(fragile_boss_config(&tunables));
    let probe = tick_until_weak_point(&mut enc, &mut rng);

    let mut world = world_with_encounter(enc);
    world.insert_resource(probe);
    run_system_once(&mut world, resolve_contacts);

    let damage: Vec<BossDamaged> = world.resource_mut::<Messages<BossDamaged>>().drain().collect();
    assert_eq!(damage.len(), 1);
    assert_eq!(damage[0].outcome, HitOutcome::Defeated);
}

#[test]
fn forward_fx_drains_boss_intents() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(7);
    let mut enc = Encounter::new(LevelId(1), &tunables);
    enc.summon(fragile_boss_config(&tunables));
    // First active tick puffs a fume.
    enc.advance(DT, None, &mut rng);
    enc.advance(DT, None, &mut rng);

    let mut world = world_with_encounter(enc);
    run_system_once(&mut world, forward_fx);

    let fx: Vec<FxIntent> = world.resource_mut::<Messages<FxIntent>>().drain().collect();
    assert!(fx.iter().any(|f| matches!(f, FxIntent::Fume { .. })));
    assert!(world.resource_mut::<Encounter>().boss_mut().is_some_and(|b| b.drain_fx().is_empty()));
}

#[test]
fn check_cleared_fires_once_for_a_dead_boss() {
    let tunables = quick_tunables();
    let mut rng = SmallRng::seed_from_u64(8);
    let mut enc = Encounter::new(LevelId(2), &tunables);
    enc.summon(fragile_boss_config(&tunables));
    let probe = tick_until_weak_point(&mut enc, &mut rng);
    enc.resolve_contacts(&probe, &mut rng);
    for _ in 0..200 {
        enc.advance(DT, None, &mut rng);
    }

    let mut world = world_with_encounter(enc);
    run_system_once(&mut world, check_cleared);
    run_system_once(&mut world, check_cleared);

    let cleared: Vec<EncounterCleared> = world.resource_mut::<Messages<EncounterCleared>>().drain().collect();
    assert_eq!(cleared, vec![EncounterCleared { level: 2 }]);
    assert!(world.resource::<Encounter>().is_cleared());
}
