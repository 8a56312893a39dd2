//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;

use kismet::components::actor::{Enemy, Facing, Player};
use kismet::events::audio::{AudioCmd, SoundCue};
use kismet::game::{build_update_schedule, build_world, load_map, step};
use kismet::geometry::Rect;
use kismet::resources::animationstore::{AnimationManifest, AnimationStore};
use kismet::resources::gameconfig::GameConfig;
use kismet::resources::input::RawInput;
use kismet::resources::map::{EnemySpawn, MapKind, MapLayout, TriggerRegion};

/// Top of the ground blocker.
pub const GROUND_TOP: i32 = 850;
pub const GROUND: Rect = Rect::new(0, GROUND_TOP, 1920, 230);

/// `y` that puts an actor of height `h` standing on the ground (1px contact).
pub fn standing_y(h: i32) -> i32 {
    GROUND_TOP + 1 - h
}

pub fn store() -> AnimationStore {
    AnimationStore::from_manifest(
        &AnimationManifest::builtin(),
        &AnimationManifest::builtin_catalog(),
    )
    .unwrap()
}

pub fn world() -> World {
    build_world(GameConfig::new(), store())
}

/// Enemy standing on the ground at `x`.
pub fn enemy_at(x: i32, health: i32, facing: Facing) -> EnemySpawn {
    EnemySpawn {
        rect: Rect::new(x, standing_y(170), 150, 170),
        health,
        facing,
    }
}

/// Four combat spawn slots; slot 1 for the player, slot 3 for the enemy.
pub fn combat_slots() -> Vec<Rect> {
    vec![
        Rect::new(0, 0, 10, 10),
        Rect::new(300, standing_y(150), 120, 150),
        Rect::new(0, 0, 10, 10),
        Rect::new(1200, standing_y(170), 150, 170),
    ]
}

/// Flat field map with the player standing at `player_x`.
pub fn field_layout(player_x: i32, enemies: Vec<EnemySpawn>) -> MapLayout {
    MapLayout {
        name: "field".to_string(),
        kind: MapKind::Field,
        player_spawn: Rect::new(player_x, standing_y(150), 120, 150),
        enemies,
        blockers: vec![GROUND],
        spawn_rects: combat_slots(),
        triggers: vec![TriggerRegion {
            name: "exit".to_string(),
            rect: Rect::new(1860, 0, 60, 1080),
        }],
    }
}

/// World with `layout` loaded and the update schedule built.
pub fn loaded(layout: &MapLayout) -> (World, Schedule) {
    let mut world = world();
    load_map(&mut world, layout).unwrap();
    (world, build_update_schedule())
}

pub fn run(world: &mut World, schedule: &mut Schedule, input: RawInput, frames: usize, delta: u32) {
    for _ in 0..frames {
        step(world, schedule, input, delta);
    }
}

pub fn idle(world: &mut World, schedule: &mut Schedule, frames: usize, delta: u32) {
    run(world, schedule, RawInput::default(), frames, delta);
}

pub fn player(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .unwrap()
}

pub fn enemies(world: &mut World) -> Vec<Entity> {
    world
        .query_filtered::<Entity, With<Enemy>>()
        .iter(world)
        .collect()
}

/// Cues readable right after the last step.
pub fn audio_cues(world: &mut World) -> Vec<SoundCue> {
    let mut state = SystemState::<MessageReader<AudioCmd>>::new(world);
    let mut reader = state.get_mut(world);
    reader
        .read()
        .map(|cmd| match cmd {
            AudioCmd::PlayFx { cue } => *cue,
        })
        .collect()
}
