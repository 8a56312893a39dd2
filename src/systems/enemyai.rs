//! Enemy behaviour controller.
//!
//! Decides each enemy's [`AiPhase`] and writes its intent into
//! [`ActorFlags`]; the animation system turns the flags into animation states.
//! The player's position is read, never written.
//!
//! Phases:
//! - Patrol: stand and walk alternately, flipping facing on every toggle
//! - Reacting: aggro reaction playing, no movement
//! - Chasing: one pixel per frame toward the player
//! - Attacking: attack latched, waits for the animation to complete
//! - Hit / Dead: mirror the animation, no decisions
use bevy_ecs::prelude::*;

use crate::components::actor::{ActorFlags, Enemy, Facing, Health, Player, Suspended};
use crate::components::animation::{AnimState, Animation, select_state};
use crate::components::boxcollider::BoxCollider;
use crate::components::enemyai::{AiPhase, EnemyAi};
use crate::components::mapposition::MapPosition;
use crate::resources::gameconfig::GameConfig;
use crate::resources::map::StaticGeometry;
use crate::resources::worldtime::WorldTime;
use crate::systems::physics::step_horizontal;

/// Pixels an enemy moves per frame while walking or chasing.
pub const ENEMY_STEP_PX: i32 = 1;

/// Update every enemy's phase, intent flags, facing and position.
///
/// This runs before the animation step, so a state change decided here only
/// resizes the rectangle later in the frame. Movement is skipped when the
/// flags written here select a state the rectangle is not sized for, and on
/// the frame after a state change, so a resizing rectangle never moves into
/// a blocker.
pub fn enemy_ai_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    geometry: Res<StaticGeometry>,
    player: Query<&MapPosition, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<
        (
            &mut EnemyAi,
            &mut ActorFlags,
            &mut Facing,
            &mut MapPosition,
            &Animation,
            &Health,
            &BoxCollider,
        ),
        (With<Enemy>, Without<Player>, Without<Suspended>),
    >,
) {
    let player_x = player.single().ok().map(|p| p.rect.x);

    for (mut ai, mut flags, mut facing, mut position, animation, health, collider) in
        enemies.iter_mut()
    {
        if animation.state == AnimState::Death {
            ai.set_phase(AiPhase::Dead);
            flags.moving = false;
            continue;
        }
        if flags.is_hit {
            ai.set_phase(AiPhase::Hit);
            flags.moving = false;
            continue;
        }

        let x = position.rect.x;
        let in_aggro_range = player_x.filter(|px| (px - x).abs() < config.aggro_range);
        if let (false, Some(px)) = (flags.is_aggroed, in_aggro_range) {
            flags.is_aggroed = true;
            flags.is_reacting = true;
            flags.moving = false;
            *facing = facing.toward(x, px);
            ai.set_phase(AiPhase::Reacting);
            log::debug!("enemy aggroed at x={}", x);
            continue;
        }

        if flags.is_reacting {
            flags.moving = false;
            continue;
        }
        if flags.is_attacking {
            ai.set_phase(AiPhase::Attacking);
            flags.moving = false;
            continue;
        }

        if flags.is_aggroed && flags.is_chasing {
            ai.set_phase(AiPhase::Chasing);
            flags.running = false;
            let Some(px) = player_x else {
                flags.moving = false;
                continue;
            };
            let dx = px - position.rect.x;
            *facing = facing.toward(position.rect.x, px);
            if dx.abs() < config.attack_range {
                flags.moving = false;
                if time.now_ms < ai.cooldown_until_ms {
                    continue;
                }
                match flags.latch_attack(animation.state) {
                    Ok(()) => ai.set_phase(AiPhase::Attacking),
                    Err(e) => log::debug!("enemy attack ignored: {}", e),
                }
                continue;
            }
            flags.moving = true;
            if keeps_size(animation, &flags, health.current) {
                step_horizontal(
                    &mut position.rect,
                    collider,
                    *facing,
                    facing.sign() * ENEMY_STEP_PX,
                    &geometry.blockers,
                    config.world_width,
                );
            }
            continue;
        }

        ai.set_phase(AiPhase::Patrol);
        if time.elapsed_since(ai.last_toggle_ms, config.patrol_interval_ms) {
            ai.walking = !ai.walking;
            ai.last_toggle_ms = time.now_ms;
            *facing = facing.flipped();
        }
        flags.moving = ai.walking;
        flags.running = false;
        if ai.walking && keeps_size(animation, &flags, health.current) {
            step_horizontal(
                &mut position.rect,
                collider,
                *facing,
                facing.sign() * ENEMY_STEP_PX,
                &geometry.blockers,
                config.world_width,
            );
        }
    }
}

/// True when the animation step later this frame will not resize the actor.
fn keeps_size(animation: &Animation, flags: &ActorFlags, health: i32) -> bool {
    !animation.just_entered && select_state(animation.state, flags, health) == animation.sized_for
}
