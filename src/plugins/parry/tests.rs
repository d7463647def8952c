use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::common::probe::PlayerProbe;
use crate::common::tunables::Arena;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::food::{Category, FoodKind};
use crate::plugins::projectiles::request::Wobble;

use super::*;

const DT: f32 = 1.0 / 60.0;

fn soup() -> Projectile {
    let mut p = Projectile::new(FoodKind::BeefSoup, Category::Salty, Vec2::new(300.0, 600.0), Vec2::new(0.0, 200.0));
    p.homing = true;
    p.wobble = Some(Wobble::new(20.0, 3.0));
    p
}

#[test]
fn deflect_sends_soup_up_with_bounded_drift() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..100 {
        let mut p = soup();
        deflect(&mut p, &mut rng);
        assert_eq!(p.vel.y, -DEFLECT_SPEED);
        assert!(p.vel.x.abs() <= DEFLECT_DRIFT);
        assert!(p.parried_by_player && p.neutralized);
        assert!(!p.homing && p.wobble.is_none());
    }
}

#[test]
fn deflect_is_idempotent() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut p = soup();
    deflect(&mut p, &mut rng);
    let once = p.clone();
    deflect(&mut p, &mut rng);
    assert_eq!(p.vel, once.vel);
}

#[test]
fn gate_keeps_exactly_one_soup_falling() {
    let arena = Arena::default();
    let mut gate = ParryGate::new();
    gate.update(DT, &arena);
    assert_eq!(gate.soups().len(), 1);
    assert_eq!(gate.spawned(), 1);

    let first = gate.soups().iter().next().map(|p| p.pos).expect("soup");
    assert_eq!(first.x, arena.width * 0.5);

    for _ in 0..120 {
        gate.update(DT, &arena);
    }
    assert_eq!(gate.soups().len(), 1, "no second soup while the first is falling");
    assert_eq!(gate.spawned(), 1);
}

#[test]
fn gate_replaces_soup_that_fell_off_screen() {
    let arena = Arena::default();
    let mut gate = ParryGate::new();
    // (900 + 80 + 40) / 140 is a bit over 7 s.
    for _ in 0..(8.0 / DT) as usize {
        gate.update(DT, &arena);
    }
    assert_eq!(gate.spawned(), 2);
    assert_eq!(gate.soups().len(), 1);
    assert!(!gate.is_open());
}

#[test]
fn gate_opens_on_first_deflection_and_stays_open() {
    let arena = Arena::default();
    let mut rng = SmallRng::seed_from_u64(11);
    let mut gate = ParryGate::new();
    gate.update(DT, &arena);
    let pos = gate.soups().iter().next().map(|p| p.pos).expect("soup");

    let mut probe = PlayerProbe::new(pos, 20.0, Category::Sweet);
    assert!(!gate.try_parry(&probe, &mut rng), "window closed");
    assert!(!gate.is_open());

    probe.parry_window = true;
    assert!(gate.try_parry(&probe, &mut rng));
    assert!(gate.is_open());
    assert!(!gate.try_parry(&probe, &mut rng), "opens only once");

    for _ in 0..600 {
        gate.update(DT, &arena);
    }
    assert!(gate.is_open());
    assert_eq!(gate.spawned(), 1);
    assert!(gate.soups().is_empty(), "deflected soup flew away");
}

#[test]
fn gate_soup_eaten_without_parry() {
    let arena = Arena::default();
    let mut gate = ParryGate::new();
    gate.update(DT, &arena);
    let pos = gate.soups().iter().next().map(|p| p.pos).expect("soup");

    let probe = PlayerProbe::new(pos, 20.0, Category::Salty);
    assert_eq!(gate.resolve_player_contacts(&probe), 1);
    assert!(gate.soups().is_empty());
    assert!(!gate.is_open());

    gate.update(DT, &arena);
    assert_eq!(gate.spawned(), 2);
}
