//! World construction, map loading, schedule wiring and frame stepping.
//!
//! The driver (the `kismet` binary or a test) owns the [`World`] and the
//! update [`Schedule`]. Each frame it calls [`step`] with the collaborator's
//! input snapshot and the raw frame delta, then reads what it needs back:
//! [`RenderFrame`](crate::resources::renderframe::RenderFrame) for the
//! presentation layer and `Messages<AudioCmd>` for the audio layer.

use bevy_ecs::prelude::*;

use crate::components::actor::{
    Actor, ActorFlags, ActorKind, Enemy, Facing, Health, Player, Suspended,
};
use crate::components::animation::{AnimState, Animation};
use crate::components::boxcollider::BoxCollider;
use crate::components::enemyai::EnemyAi;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::error::SetupError;
use crate::events::audio::AudioCmd;
use crate::events::combat::FireProjectile;
use crate::geometry::Rect;
use crate::resources::animationstore::AnimationStore;
use crate::resources::encounter::Encounter;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputState, RawInput};
use crate::resources::map::{EnemySpawn, MapLayout, StaticGeometry, TriggerPresence};
use crate::resources::renderframe::RenderFrame;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_system;
use crate::systems::audio::update_audio_cmds;
use crate::systems::combat::{
    combat_transition, combat_trigger_detector, encounter_idle, encounter_in_transition,
    encounter_not_active,
};
use crate::systems::damage::damage_intake;
use crate::systems::enemyai::enemy_ai_system;
use crate::systems::input::update_input_state;
use crate::systems::physics::{gravity_system, jump_system};
use crate::systems::playercontroller::player_controller;
use crate::systems::projectile::{projectile_system, spawn_projectiles, update_fire_requests};
use crate::systems::render::render_projection;
use crate::systems::time::update_world_time;
use crate::systems::triggers::trigger_region_system;

/// Health the player starts with.
pub const PLAYER_HEALTH: i32 = 5;

/// Player hitbox insets (left, right, top, bottom) for a right-facing sprite.
const PLAYER_COLLIDER: (i32, i32, i32, i32) = (30, 30, 20, 0);
/// Enemy hitbox insets (left, right, top, bottom) for a right-facing sprite.
const ENEMY_COLLIDER: (i32, i32, i32, i32) = (25, 25, 20, 0);

fn collider((left, right, top, bottom): (i32, i32, i32, i32)) -> BoxCollider {
    BoxCollider::new(left, right, top, bottom)
}

/// Create a world with every resource the schedule needs.
pub fn build_world(config: GameConfig, store: AnimationStore) -> World {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(store);
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(StaticGeometry::default());
    world.insert_resource(Encounter::default());
    world.insert_resource(TriggerPresence::default());
    world.insert_resource(RenderFrame::default());
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<FireProjectile>>();
    world
}

/// Actor rectangle placed with its top-left at `spawn`, sized for Idle.
fn idle_rect(world: &World, kind: ActorKind, spawn: Rect) -> Result<Rect, SetupError> {
    let set = world.resource::<AnimationStore>().set(kind)?;
    let (w, h) = set
        .get(AnimState::Idle)
        .map(|seq| seq.size)
        .unwrap_or((spawn.w, spawn.h));
    Ok(Rect::new(spawn.x, spawn.y, w, h))
}

/// Spawn the player at `spawn`.
///
/// Fails if the animation table lacks a state the player needs.
pub fn spawn_player(world: &mut World, spawn: Rect) -> Result<Entity, SetupError> {
    let rect = idle_rect(world, ActorKind::Player, spawn)?;
    let now = world.resource::<WorldTime>().now_ms;
    let facing = Facing::Right;
    let entity = world
        .spawn((
            Actor {
                kind: ActorKind::Player,
            },
            Player,
            MapPosition::new(rect),
            collider(PLAYER_COLLIDER),
            facing,
            Animation::new(AnimState::Idle, now, facing),
            RigidBody::new(),
            ActorFlags::default(),
            Health::new(PLAYER_HEALTH),
        ))
        .id();
    log::debug!("player spawned at {:?}", rect);
    Ok(entity)
}

/// Spawn one enemy from a map placement.
///
/// Fails if the animation table lacks a state enemies need.
pub fn spawn_enemy(world: &mut World, spawn: &EnemySpawn) -> Result<Entity, SetupError> {
    let rect = idle_rect(world, ActorKind::Enemy, spawn.rect)?;
    let now = world.resource::<WorldTime>().now_ms;
    let entity = world
        .spawn((
            Actor {
                kind: ActorKind::Enemy,
            },
            Enemy,
            MapPosition::new(rect),
            collider(ENEMY_COLLIDER),
            spawn.facing,
            Animation::new(AnimState::Idle, now, spawn.facing),
            RigidBody::new(),
            ActorFlags::default(),
            Health::new(spawn.health.max(1)),
            EnemyAi::new(now),
        ))
        .id();
    log::debug!("enemy spawned at {:?}", rect);
    Ok(entity)
}

/// Install `layout` as the current map.
///
/// Everything that can fail is checked before the world is touched: an
/// invalid layout or an incomplete animation table leaves the previous map in
/// place. On success enemies and projectiles of the previous map are
/// discarded, the player is placed on the map's spawn (spawned if absent),
/// and the encounter and trigger state are reset.
pub fn load_map(world: &mut World, layout: &MapLayout) -> Result<(), SetupError> {
    layout.validate()?;
    {
        let store = world.resource::<AnimationStore>();
        store.set(ActorKind::Player)?;
        if !layout.enemies.is_empty() {
            store.set(ActorKind::Enemy)?;
        }
    }

    let stale: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Enemy>, With<Projectile>)>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    world.insert_resource(StaticGeometry::from_layout(layout));

    let existing = world
        .query_filtered::<Entity, With<Player>>()
        .iter(world)
        .next();
    match existing {
        Some(player) => {
            let rect = idle_rect(world, ActorKind::Player, layout.player_spawn)?;
            let now = world.resource::<WorldTime>().now_ms;
            let mut entity = world.entity_mut(player);
            entity.remove::<Suspended>();
            entity.insert((
                MapPosition::new(rect),
                Facing::Right,
                Animation::new(AnimState::Idle, now, Facing::Right),
                RigidBody::new(),
                ActorFlags::default(),
            ));
        }
        None => {
            spawn_player(world, layout.player_spawn)?;
        }
    }

    for spawn in &layout.enemies {
        spawn_enemy(world, spawn)?;
    }

    world.resource_mut::<Encounter>().reset();
    world.resource_mut::<TriggerPresence>().clear();
    world.resource_mut::<RenderFrame>().request_full_redraw();
    log::info!(
        "map '{}' loaded: {} enemies, {} blockers, {} triggers",
        layout.name,
        layout.enemies.len(),
        layout.blockers.len(),
        layout.triggers.len()
    );
    Ok(())
}

/// The per-frame update schedule.
///
/// Order matters: projectiles hit-test and damage is applied before enemies
/// and the player decide, so a hit landed this frame is visible to the combat
/// trigger in the same frame.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_audio_cmds,
            update_fire_requests,
            projectile_system,
            damage_intake,
            enemy_ai_system.run_if(encounter_not_active),
            player_controller.run_if(encounter_not_active),
            jump_system,
            gravity_system,
            animation_system,
            spawn_projectiles,
            combat_trigger_detector.run_if(encounter_idle),
            combat_transition.run_if(encounter_in_transition),
            trigger_region_system,
            render_projection,
        )
            .chain(),
    );
    update
}

/// Run one frame: clock, input snapshot, then the update schedule.
pub fn step(world: &mut World, schedule: &mut Schedule, input: RawInput, raw_delta_ms: u32) {
    update_world_time(world, raw_delta_ms);
    update_input_state(world, input);
    schedule.run(world);
    world.clear_trackers();
}
