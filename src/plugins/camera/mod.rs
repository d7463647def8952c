//! Camera plugin.
//!
//! The engine works in arena pixels with y pointing down. A renderer maps an arena point to
//! world space with `arena_to_world`; the camera is parked over the arena centre so the
//! whole playfield is in view.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::{Arena, Tunables};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera);
}

/// Arena pixels (origin top-left, y down) to world units (y up).
#[inline]
pub fn arena_to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

fn camera_translation(arena: &Arena) -> Vec3 {
    arena_to_world(arena.viewport().center()).extend(999.0)
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_translation(camera_translation(&tunables.arena)),
        DespawnOnExit(GameState::InGame),
    ));
}
