//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::probe::PlayerProbe;
use crate::common::tunables::Tunables;
use crate::plugins::encounter::BossRng;

pub fn plugin(app: &mut App) {
    let tunables = Tunables::default();
    app.insert_resource(Time::<Fixed>::from_hz(tunables.tick_hz));
    app.insert_resource(BossRng::seeded(tunables.rng_seed));
    app.insert_resource(PlayerProbe::default());
    app.insert_resource(tunables);
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}

#[cfg(test)]
mod tests;
