use bevy::prelude::*;
use rand::Rng;

use crate::common::probe::PlayerProbe;
use crate::common::tunables::Tunables;
use crate::plugins::core;
use crate::plugins::encounter::BossRng;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<PlayerProbe>().is_some());
    assert!(app.world().get_resource::<BossRng>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn fixed_step_matches_tick_rate() {
    let mut app = App::new();
    core::plugin(&mut app);
    let hz = app.world().resource::<Tunables>().tick_hz;
    let step = app.world().resource::<Time<Fixed>>().timestep();
    assert!((step.as_secs_f64() - 1.0 / hz).abs() < 1e-6);
}

#[test]
fn rng_is_seeded_deterministically() {
    let mut a = App::new();
    let mut b = App::new();
    core::plugin(&mut a);
    core::plugin(&mut b);
    let x: u64 = a.world_mut().resource_mut::<BossRng>().0.random();
    let y: u64 = b.world_mut().resource_mut::<BossRng>().0.random();
    assert_eq!(x, y);
}
