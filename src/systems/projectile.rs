//! Projectile simulation.
//!
//! - [`spawn_projectiles`] turns [`FireProjectile`] requests into entities
//! - [`projectile_system`] moves projectiles, cycles their travel animation,
//!   hit-tests them against enemies and plays the impact animation
//!
//! A projectile that hits only queues the hit on the enemy's [`Health`];
//! [`damage_intake`](crate::systems::damage::damage_intake) applies it.
use bevy_ecs::prelude::*;

use crate::components::actor::{Enemy, Facing, Health, Suspended};
use crate::components::animation::{AnimState, Animation};
use crate::components::mapposition::MapPosition;
use crate::components::projectile::Projectile;
use crate::events::combat::FireProjectile;
use crate::geometry::Rect;
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Pixels a projectile travels per reference tick.
pub const PROJECTILE_SPEED_PX: i32 = 4;
/// Distance of the hit point inside the projectile's leading edge.
pub const PROJECTILE_HIT_INSET: i32 = 10;

/// Point tested against enemy rectangles: just inside the leading edge, at
/// the vertical centre.
pub fn hit_point(rect: &Rect, direction: Facing) -> (i32, i32) {
    let x = match direction {
        Facing::Right => rect.right() - PROJECTILE_HIT_INSET,
        Facing::Left => rect.left() + PROJECTILE_HIT_INSET,
    };
    (x, rect.center_y())
}

/// Advance the ECS message queue for [`FireProjectile`].
pub fn update_fire_requests(mut msgs: ResMut<Messages<FireProjectile>>) {
    msgs.update();
}

/// Spawn one projectile per request written this frame.
///
/// A request whose rectangle already sticks out of the world is dropped.
pub fn spawn_projectiles(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut requests: MessageReader<FireProjectile>,
) {
    for request in requests.read() {
        if request.origin.left() < 0 || request.origin.right() > config.world_width {
            log::debug!("projectile request at {:?} is outside the world", request.origin);
            continue;
        }
        log::debug!(
            "projectile fired by {:?} at {:?} toward {:?}",
            request.shooter,
            request.origin,
            request.direction
        );
        commands.spawn((
            Projectile::new(request.direction, time.now_ms),
            MapPosition::new(request.origin),
        ));
    }
}

/// Move, animate and hit-test every projectile.
///
/// Travelling projectiles move `PROJECTILE_SPEED_PX * ticks` pixels, despawn
/// as soon as their rectangle leaves `[0, world_width)`, and otherwise test
/// their hit point against every enemy not dying or suspended. The first enemy hit
/// gets one hit queued and the projectile switches to its impact sequence. An
/// impacting projectile stays put and despawns when the sequence completes.
pub fn projectile_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    store: Res<AnimationStore>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut MapPosition), Without<Enemy>>,
    mut enemies: Query<
        (&MapPosition, &Animation, &mut Health),
        (With<Enemy>, Without<Projectile>, Without<Suspended>),
    >,
) {
    let travel = &store.projectile.travel;
    let impact = &store.projectile.impact;

    for (entity, mut projectile, mut position) in projectiles.iter_mut() {
        if projectile.has_hit {
            if time.elapsed_since(projectile.last_advance_ms, impact.interval_ms) {
                projectile.last_advance_ms = time.now_ms;
                let next = projectile.frame_index + 1;
                if next >= impact.frame_count() {
                    commands.entity(entity).try_despawn();
                } else {
                    projectile.frame_index = next;
                }
            }
            continue;
        }

        position.rect.x += projectile.direction.sign() * PROJECTILE_SPEED_PX * time.ticks;
        if position.rect.left() < 0 || position.rect.right() > config.world_width {
            log::debug!("projectile left the world at x={}", position.rect.x);
            commands.entity(entity).try_despawn();
            continue;
        }

        if time.elapsed_since(projectile.last_advance_ms, travel.interval_ms) {
            projectile.last_advance_ms = time.now_ms;
            projectile.frame_index = (projectile.frame_index + 1) % travel.frame_count();
        }

        let (px, py) = hit_point(&position.rect, projectile.direction);
        let target = enemies
            .iter_mut()
            .find(|(enemy, animation, _)| {
                animation.state != AnimState::Death && enemy.rect.contains_point(px, py)
            });
        if let Some((_, _, mut health)) = target {
            health.queue_hit();
            projectile.impact(time.now_ms);
        }
    }
}
