//! Player control from the per-frame input snapshot.
//!
//! Reads [`InputState`] only; edges were computed once by
//! [`update_input_state`](crate::systems::input::update_input_state).
use bevy_ecs::prelude::*;

use crate::components::actor::{ActorFlags, Facing, Player, Suspended};
use crate::components::animation::{AnimState, Animation};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::{AudioCmd, SoundCue};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::map::StaticGeometry;
use crate::resources::worldtime::WorldTime;
use crate::systems::physics::step_horizontal;

/// Walking speed in pixels per reference tick.
pub const WALK_SPEED_PX: i32 = 3;
/// Running speed in pixels per reference tick.
pub const RUN_SPEED_PX: i32 = 6;

/// Turn held directions and action edges into player intent and movement.
///
/// While an attack or hit is playing, input is ignored: no movement, no jump,
/// and a new attack press is reported as a blocked transition. An attack press
/// takes the whole frame; the player does not also move on it.
pub fn player_controller(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    geometry: Res<StaticGeometry>,
    mut audio: MessageWriter<AudioCmd>,
    mut query: Query<
        (
            &mut MapPosition,
            &BoxCollider,
            &mut Facing,
            &mut ActorFlags,
            &mut RigidBody,
            &Animation,
        ),
        (With<Player>, Without<Suspended>),
    >,
) {
    let Ok((mut position, collider, mut facing, mut flags, mut body, animation)) =
        query.single_mut()
    else {
        return;
    };

    if animation.state == AnimState::Death {
        flags.moving = false;
        return;
    }

    flags.running = input.run.active;

    if flags.is_locked() {
        flags.moving = false;
        if input.attack.just_pressed {
            if let Err(e) = flags.latch_attack(animation.state) {
                log::debug!("player attack ignored: {}", e);
            }
        }
        return;
    }

    if input.attack.just_pressed {
        match flags.latch_attack(animation.state) {
            Ok(()) => {
                flags.moving = false;
                return;
            }
            Err(e) => log::debug!("player attack ignored: {}", e),
        }
    }

    if input.jump.just_pressed && flags.is_on_ground && body.start_jump(time.now_ms) {
        flags.is_on_ground = false;
        audio.write(AudioCmd::PlayFx {
            cue: SoundCue::Jump,
        });
    }

    let direction = input.horizontal();
    if direction == 0 {
        flags.moving = false;
        return;
    }
    *facing = if direction < 0 {
        Facing::Left
    } else {
        Facing::Right
    };
    flags.moving = true;
    let speed = if flags.running {
        RUN_SPEED_PX
    } else {
        WALK_SPEED_PX
    };
    step_horizontal(
        &mut position.rect,
        collider,
        *facing,
        direction * speed * time.ticks,
        &geometry.blockers,
        config.world_width,
    );
}
