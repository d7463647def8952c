//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `nanmon::game::configure_headless` to install gameplay plugins.
//! - time advances by exactly one fixed step per `app.update()`.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use nanmon::common::tunables::Tunables;
use nanmon::plugins::encounter::Encounter;

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));

    nanmon::game::configure_headless(&mut app);

    let hz = app.world().resource::<Tunables>().tick_hz;
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / hz)));
    app
}

/// Run `frames` updates.
pub fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn encounter(app: &App) -> &Encounter {
    app.world().resource::<Encounter>()
}

pub fn encounter_or_none(app: &App) -> Option<&Encounter> {
    app.world().get_resource::<Encounter>()
}
