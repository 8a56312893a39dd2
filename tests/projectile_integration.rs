//! Projectile lifetime through the full update schedule.
//!
//! # Test Categories
//!
//! 1. **Bounds** - despawn at either world edge
//! 2. **Hits** - one hit per projectile, impact sequence, dying targets

mod common;

use bevy_ecs::prelude::*;

use common::*;
use kismet::components::actor::{ActorFlags, Facing, Health};
use kismet::components::animation::{AnimState, Animation};
use kismet::components::enemyai::{AiPhase, EnemyAi};
use kismet::components::mapposition::MapPosition;
use kismet::components::projectile::Projectile;
use kismet::game::step;
use kismet::geometry::Rect;
use kismet::resources::input::RawInput;
use kismet::resources::worldtime::WorldTime;

const WORLD_WIDTH: i32 = 1920;

fn projectiles(world: &mut World) -> Vec<(Entity, Projectile, Rect)> {
    world
        .query::<(Entity, &Projectile, &MapPosition)>()
        .iter(world)
        .map(|(e, p, pos)| (e, *p, pos.rect))
        .collect()
}

fn press(world: &mut World, schedule: &mut Schedule, input: RawInput) {
    step(world, schedule, input, 10);
}

fn attack() -> RawInput {
    RawInput {
        attack: true,
        ..Default::default()
    }
}

/// Run until the player has fired, returning the projectile entity.
fn fire(world: &mut World, schedule: &mut Schedule) -> Entity {
    press(world, schedule, attack());
    for _ in 0..100 {
        if let Some((entity, _, _)) = projectiles(world).first() {
            return *entity;
        }
        idle(world, schedule, 1, 10);
    }
    panic!("no projectile fired");
}

// =============================================================================
// CATEGORY 1: Bounds
// =============================================================================

#[test]
fn projectile_despawns_at_right_edge() {
    let (mut world, mut schedule) = loaded(&field_layout(1600, vec![]));
    idle(&mut world, &mut schedule, 1, 10);
    let shot = fire(&mut world, &mut schedule);
    let spawned_at = projectiles(&mut world)[0].2;
    assert_eq!(spawned_at.x, 1600 + 190 - 40);

    let mut last_x = spawned_at.x;
    for _ in 0..200 {
        idle(&mut world, &mut schedule, 1, 10);
        match world.get::<MapPosition>(shot) {
            Some(position) => {
                let rect = position.rect;
                assert!(rect.right() <= WORLD_WIDTH, "drawn past the edge: {:?}", rect);
                assert!(rect.x > last_x);
                last_x = rect.x;
            }
            None => break,
        }
    }
    assert!(world.get_entity(shot).is_err());
    assert!(last_x > 1800);
}

#[test]
fn projectile_despawns_at_left_edge() {
    let (mut world, mut schedule) = loaded(&field_layout(300, vec![]));
    idle(&mut world, &mut schedule, 1, 10);
    // Turn around first.
    press(
        &mut world,
        &mut schedule,
        RawInput {
            left: true,
            ..Default::default()
        },
    );
    idle(&mut world, &mut schedule, 1, 10);
    let shot = fire(&mut world, &mut schedule);
    let (_, projectile, _) = projectiles(&mut world)[0];
    assert_eq!(projectile.direction, Facing::Left);

    let mut frames = 0;
    while let Some(position) = world.get::<MapPosition>(shot) {
        assert!(position.rect.left() >= 0);
        idle(&mut world, &mut schedule, 1, 10);
        frames += 1;
        assert!(frames < 300, "projectile never left the world");
    }
}

#[test]
fn travel_frames_cycle() {
    let (mut world, mut schedule) = loaded(&field_layout(100, vec![]));
    idle(&mut world, &mut schedule, 1, 10);
    let shot = fire(&mut world, &mut schedule);
    let mut seen = Vec::new();
    for _ in 0..60 {
        idle(&mut world, &mut schedule, 1, 10);
        let frame = world.get::<Projectile>(shot).unwrap().frame_index;
        if seen.last() != Some(&frame) {
            seen.push(frame);
        }
    }
    // 40ms per frame, 8 frames: wraps at least once in 600ms.
    assert!(seen.contains(&7));
    assert!(seen.iter().filter(|f| **f == 0).count() >= 2);
}

// =============================================================================
// CATEGORY 2: Hits
// =============================================================================

#[test]
fn hit_damages_enemy_once_and_plays_impact() {
    let (mut world, mut schedule) =
        loaded(&field_layout(300, vec![enemy_at(700, 3, Facing::Left)]));
    let enemy = enemies(&mut world)[0];
    idle(&mut world, &mut schedule, 1, 10);
    let shot = fire(&mut world, &mut schedule);

    let mut frames = 0;
    while !world.get::<Projectile>(shot).unwrap().has_hit {
        idle(&mut world, &mut schedule, 1, 10);
        frames += 1;
        assert!(frames < 200, "projectile never reached the enemy");
    }

    assert_eq!(world.get::<Health>(enemy).unwrap().current, 2);
    assert_eq!(world.get::<Animation>(enemy).unwrap().state, AnimState::Hit);
    let flags = world.get::<ActorFlags>(enemy).unwrap();
    assert!(flags.is_aggroed && flags.is_chasing);
    assert_eq!(world.get::<EnemyAi>(enemy).unwrap().phase, AiPhase::Hit);

    let impact_at = world.get::<MapPosition>(shot).unwrap().rect;
    let mut steps = 0;
    while world.get_entity(shot).is_ok() {
        assert_eq!(world.get::<MapPosition>(shot).unwrap().rect, impact_at);
        idle(&mut world, &mut schedule, 1, 10);
        steps += 1;
        assert!(steps <= 40, "impact never finished");
    }
    assert_eq!(world.get::<Health>(enemy).unwrap().current, 2);
}

#[test]
fn dying_enemy_is_not_a_target() {
    let (mut world, mut schedule) =
        loaded(&field_layout(100, vec![enemy_at(700, 3, Facing::Left)]));
    let enemy = enemies(&mut world)[0];
    world.get_mut::<Animation>(enemy).unwrap().state = AnimState::Death;

    let now = world.resource::<WorldTime>().now_ms;
    let shot = world
        .spawn((
            Projectile::new(Facing::Right, now),
            MapPosition::new(Rect::new(600, 731, 64, 40)),
        ))
        .id();
    idle(&mut world, &mut schedule, 80, 10);

    let projectile = world.get::<Projectile>(shot).unwrap();
    assert!(!projectile.has_hit);
    assert!(world.get::<MapPosition>(shot).unwrap().rect.x > 850);
    assert_eq!(world.get::<Health>(enemy).unwrap().current, 3);
}

#[test]
fn first_enemy_in_line_takes_the_hit() {
    let (mut world, mut schedule) = loaded(&field_layout(
        100,
        vec![
            enemy_at(700, 3, Facing::Left),
            enemy_at(1100, 3, Facing::Left),
        ],
    ));
    let enemies = enemies(&mut world);
    let now = world.resource::<WorldTime>().now_ms;
    world.spawn((
        Projectile::new(Facing::Right, now),
        MapPosition::new(Rect::new(600, 731, 64, 40)),
    ));
    idle(&mut world, &mut schedule, 60, 10);

    let health: Vec<i32> = enemies
        .iter()
        .map(|e| world.get::<Health>(*e).unwrap().current)
        .collect();
    let near = enemies
        .iter()
        .position(|e| world.get::<MapPosition>(*e).unwrap().rect.x < 900)
        .unwrap();
    assert_eq!(health[near], 2);
    assert_eq!(health[1 - near], 3);
}
