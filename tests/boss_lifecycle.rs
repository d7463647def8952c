mod common;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use nanmon::common::probe::PlayerProbe;
use nanmon::common::state::GameState;
use nanmon::common::tunables::{Arena, Tunables};
use nanmon::plugins::boss::engine::BITE_PRECISION_CONTACT;
use nanmon::plugins::boss::{Boss, BossConfig, HitOutcome};
use nanmon::plugins::encounter::LevelId;
use nanmon::plugins::projectiles::components::Projectile;
use nanmon::plugins::projectiles::food::{Category, FoodKind};

const DT: f32 = 1.0 / 60.0;

fn boss_for(level: u8) -> Boss {
    let arena = Arena::default();
    Boss::new(BossConfig::for_level(level, &arena), arena)
}

fn tick(boss: &mut Boss, frames: usize, player: Option<Vec2>, rng: &mut SmallRng) {
    for _ in 0..frames {
        boss.update(DT, player, rng);
    }
}

#[test]
fn first_boss_fills_the_screen_with_rings() {
    let mut rng = SmallRng::seed_from_u64(100);
    let mut boss = boss_for(1);
    tick(&mut boss, 80, None, &mut rng);
    assert!(boss.is_active());

    tick(&mut boss, 150, Some(Vec2::new(300.0, 760.0)), &mut rng);
    let salty = boss.projectiles().iter().filter(|p| p.category == Category::Salty).count();
    let sweet = boss.projectiles().iter().filter(|p| p.category == Category::Sweet).count();
    assert!(salty >= 28 && sweet >= 28, "salty {salty} sweet {sweet}");

    let view = Arena::default().cull_bounds();
    assert!(boss.projectiles().iter().all(|p| view.contains(p.pos)));
}

#[test]
fn cadence_only_tightens_over_a_whole_fight() {
    let mut rng = SmallRng::seed_from_u64(101);
    let mut boss = boss_for(1);
    tick(&mut boss, 80, None, &mut rng);

    let mut last = boss.cadence();
    let mut outcomes = Vec::new();
    for _ in 0..2000 {
        boss.update(DT, None, &mut rng);
        if let Some(wp) = boss.weak_point().cloned() {
            let probe = PlayerProbe::new(wp.pos, 20.0, wp.category);
            let outcome = boss.try_bite(&probe, BITE_PRECISION_CONTACT);
            if outcome.counted() {
                outcomes.push(outcome);
            }
        }
        let now = boss.cadence();
        assert!(now.ring_interval <= last.ring_interval);
        assert!(now.beam_interval <= last.beam_interval);
        assert!(now.fume_interval <= last.fume_interval);
        last = now;
        if boss.is_dead() {
            break;
        }
    }

    assert_eq!(
        outcomes,
        vec![HitOutcome::Staggered, HitOutcome::Staggered, HitOutcome::Staggered, HitOutcome::Defeated]
    );
    assert!(boss.is_dead());
    assert!(boss.projectiles().is_empty());
}

#[test]
fn deflected_soup_flies_back_and_hurts_the_coffin() {
    let mut rng = SmallRng::seed_from_u64(102);
    let mut boss = boss_for(3);
    tick(&mut boss, 80, None, &mut rng);
    assert!(boss.is_active());
    boss.projectiles_mut().clear();

    let mut probe = PlayerProbe::new(Vec2::new(300.0, 700.0), 20.0, Category::Sweet);
    probe.parry_window = true;
    boss.projectiles_mut()
        .push(Projectile::new(FoodKind::BeefSoup, Category::Salty, probe.pos, Vec2::new(0.0, 300.0)));
    assert_eq!(boss.try_parry(&probe, &mut rng), 1);
    probe.parry_window = false;

    let mut strikes = Vec::new();
    for _ in 0..120 {
        boss.update(DT, None, &mut rng);
        // The deflected soup passes straight through the player.
        for contact in boss.resolve_player_contacts(&probe) {
            assert_ne!(contact.kind, FoodKind::BeefSoup);
        }
        strikes.extend(boss.resolve_parry_strikes());
        if !strikes.is_empty() {
            break;
        }
    }
    assert_eq!(strikes, vec![HitOutcome::Staggered]);
    assert_eq!(boss.hits_taken(), 1);
    assert!(boss.is_paused());
}

#[test]
fn full_encounter_through_the_app() {
    let mut app = common::app_headless();
    app.world_mut().resource_mut::<Tunables>().boss_countdown = 0.0;
    app.insert_resource(LevelId(1));

    let parked = Vec2::new(20.0, 880.0);
    for _ in 0..3000 {
        let wp = common::encounter_or_none(&app)
            .and_then(|e| e.boss())
            .and_then(|b| b.weak_point())
            .map(|wp| (wp.pos, wp.category));
        {
            let mut probe = app.world_mut().resource_mut::<PlayerProbe>();
            match wp {
                Some((pos, category)) => {
                    probe.pos = pos;
                    probe.mode = category;
                }
                None => probe.pos = parked,
            }
        }
        app.update();
        if *app.world().resource::<State<GameState>>().get() == GameState::Cleared {
            break;
        }
    }

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Cleared);
    let enc = common::encounter(&app);
    assert!(enc.is_cleared());
    assert!(enc.boss().is_some_and(|b| b.is_dead() && b.hits_taken() == 4));
}
