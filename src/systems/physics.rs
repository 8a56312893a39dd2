//! Discrete gravity, jump, and horizontal stepping.
//!
//! Nothing here integrates velocity over time. Gravity and jump run in fixed
//! ticks gated by [`WorldTime::elapsed_since`]; each tick moves the actor by
//! the integer part of its accumulator, one pixel at a time, re-testing every
//! blocker after each pixel.
//!
//! - [`gravity_system`] – fall while the hitbox touches no blocker
//! - [`jump_system`] – rise through a fixed five-step deceleration sequence
//! - [`step_horizontal`] – pixel-stepped sideways movement used by the
//!   player and enemy controllers
//!
//! Gravity is suspended while a jump is in progress, and a jump cannot be cut
//! short: it always runs its five steps.

use bevy_ecs::prelude::*;

use crate::components::actor::{ActorFlags, Facing, Suspended};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{GRAVITY_TICK_MS, JUMP_TICK_MS, RigidBody};
use crate::geometry::{Rect, overlaps_any};
use crate::resources::map::StaticGeometry;
use crate::resources::worldtime::WorldTime;

/// Rows at the bottom of the hitbox that rest inside the ground when standing.
pub const GROUND_CONTACT_PX: i32 = 1;

/// Apply one gravity tick to every airborne body.
///
/// A body whose hitbox overlaps a blocker is grounded: its fall rate resets
/// and it does not move. Otherwise, once at least [`GRAVITY_TICK_MS`] passed
/// since the last tick, the fall rate grows and the body drops pixel by pixel
/// until it lands or the tick's pixels are used up.
pub fn gravity_system(
    time: Res<WorldTime>,
    geometry: Res<StaticGeometry>,
    mut query: Query<
        (
            &mut MapPosition,
            &BoxCollider,
            &Facing,
            &mut RigidBody,
            &mut ActorFlags,
        ),
        Without<Suspended>,
    >,
) {
    for (mut position, collider, facing, mut body, mut flags) in query.iter_mut() {
        if body.frozen || body.jumping {
            continue;
        }
        let hitbox = collider.hitbox(&position.rect, *facing);
        if overlaps_any(&hitbox, &geometry.blockers) {
            flags.is_on_ground = true;
            body.land();
            body.last_gravity_ms = time.now_ms;
            continue;
        }
        flags.is_on_ground = false;
        if !time.elapsed_since(body.last_gravity_ms, GRAVITY_TICK_MS) {
            continue;
        }
        body.last_gravity_ms = time.now_ms;
        let pixels = body.accelerate_fall();
        if fall_pixels(&mut position.rect, collider, *facing, pixels, &geometry.blockers) {
            body.land();
            flags.is_on_ground = true;
        }
    }
}

/// Take one jump deceleration step for every body mid-jump.
///
/// Steps are at least [`JUMP_TICK_MS`] apart, so a slow frame produces one
/// step, never several. After the fifth step the jump ends and gravity
/// resumes.
pub fn jump_system(
    time: Res<WorldTime>,
    geometry: Res<StaticGeometry>,
    mut query: Query<
        (
            &mut MapPosition,
            &BoxCollider,
            &Facing,
            &mut RigidBody,
            &mut ActorFlags,
        ),
        Without<Suspended>,
    >,
) {
    for (mut position, collider, facing, mut body, mut flags) in query.iter_mut() {
        if body.frozen || !body.jumping {
            continue;
        }
        if !time.elapsed_since(body.last_jump_ms, JUMP_TICK_MS) {
            continue;
        }
        body.last_jump_ms = time.now_ms;
        let pixels = body.decelerate_jump();
        rise_pixels(&mut position.rect, collider, *facing, pixels, &geometry.blockers);
        flags.is_on_ground = false;
        if body.jump_exhausted() {
            body.finish_jump(time.now_ms);
            log::debug!("jump finished at y={}", position.rect.y);
        }
    }
}

/// Move `rect` down up to `pixels`, stopping on the first pixel where the
/// hitbox overlaps any blocker. Returns true if it landed.
pub fn fall_pixels(
    rect: &mut Rect,
    collider: &BoxCollider,
    facing: Facing,
    pixels: i32,
    blockers: &[Rect],
) -> bool {
    for _ in 0..pixels.max(0) {
        rect.y += 1;
        if overlaps_any(&collider.hitbox(rect, facing), blockers) {
            return true;
        }
    }
    false
}

/// Move `rect` up up to `pixels`, refusing any pixel that would push the
/// hitbox into a blocker it was not already touching. Returns pixels moved.
pub fn rise_pixels(
    rect: &mut Rect,
    collider: &BoxCollider,
    facing: Facing,
    pixels: i32,
    blockers: &[Rect],
) -> i32 {
    let mut moved = 0;
    for _ in 0..pixels.max(0) {
        let before = collider.hitbox(rect, facing);
        let candidate = rect.translated(0, -1);
        let after = collider.hitbox(&candidate, facing);
        if blockers
            .iter()
            .any(|b| after.overlaps(b) && !before.overlaps(b))
        {
            break;
        }
        *rect = candidate;
        moved += 1;
    }
    moved
}

/// Move `rect` sideways by `dx` pixels, one pixel at a time.
///
/// Stops at walls (the hitbox minus its ground-contact row would overlap a
/// blocker) and at the world's horizontal bounds `[0, world_width)`. Returns
/// the signed distance actually moved.
pub fn step_horizontal(
    rect: &mut Rect,
    collider: &BoxCollider,
    facing: Facing,
    dx: i32,
    blockers: &[Rect],
    world_width: i32,
) -> i32 {
    let step = dx.signum();
    let mut moved = 0;
    for _ in 0..dx.abs() {
        let candidate = rect.translated(step, 0);
        if candidate.left() < 0 || candidate.right() > world_width {
            break;
        }
        let probe = collider
            .hitbox(&candidate, facing)
            .without_bottom(GROUND_CONTACT_PX);
        if overlaps_any(&probe, blockers) {
            break;
        }
        *rect = candidate;
        moved += step;
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: Rect = Rect::new(0, 500, 1000, 50);

    #[test]
    fn test_fall_stops_on_first_contact() {
        let mut rect = Rect::new(0, 395, 50, 100);
        assert!(fall_pixels(&mut rect, &BoxCollider::default(), Facing::Right, 20, &[GROUND]));
        assert_eq!(rect.bottom(), 501);
    }

    #[test]
    fn test_fall_checks_every_blocker_each_pixel() {
        // A 1px platform between two far blockers must not be skipped.
        let thin = Rect::new(0, 420, 100, 1);
        let far = Rect::new(900, 0, 10, 10);
        let mut rect = Rect::new(10, 300, 20, 100);
        assert!(fall_pixels(
            &mut rect,
            &BoxCollider::default(),
            Facing::Right,
            50,
            &[far, GROUND, thin]
        ));
        assert_eq!(rect.bottom(), 421);
    }

    #[test]
    fn test_fall_without_blockers_moves_all_pixels() {
        let mut rect = Rect::new(0, 0, 10, 10);
        assert!(!fall_pixels(&mut rect, &BoxCollider::default(), Facing::Right, 7, &[]));
        assert_eq!(rect.y, 7);
    }

    #[test]
    fn test_rise_leaves_ground_but_stops_at_ceiling() {
        let ceiling = Rect::new(0, 390, 1000, 10);
        let mut rect = Rect::new(0, 401, 50, 100); // 1px into the ground
        let moved = rise_pixels(
            &mut rect,
            &BoxCollider::default(),
            Facing::Right,
            16,
            &[GROUND, ceiling],
        );
        assert_eq!(moved, 1);
        assert_eq!(rect.y, 400);
    }

    #[test]
    fn test_horizontal_ignores_ground_contact_row() {
        let mut rect = Rect::new(100, 401, 50, 100);
        let moved = step_horizontal(
            &mut rect,
            &BoxCollider::default(),
            Facing::Right,
            8,
            &[GROUND],
            1920,
        );
        assert_eq!(moved, 8);
        assert_eq!(rect.x, 108);
    }

    #[test]
    fn test_horizontal_stops_at_wall() {
        let wall = Rect::new(160, 0, 20, 500);
        let mut rect = Rect::new(100, 401, 50, 100);
        let moved = step_horizontal(
            &mut rect,
            &BoxCollider::default(),
            Facing::Right,
            30,
            &[GROUND, wall],
            1920,
        );
        assert_eq!(moved, 10);
        assert_eq!(rect.right(), 160);
    }

    #[test]
    fn test_horizontal_clamped_to_world() {
        let mut rect = Rect::new(3, 0, 50, 100);
        let moved = step_horizontal(&mut rect, &BoxCollider::default(), Facing::Left, -10, &[], 1920);
        assert_eq!(moved, -3);
        assert_eq!(rect.x, 0);
    }
}
