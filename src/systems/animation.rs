//! Actor animation state machine.
//!
//! Once per frame, for every actor that is not suspended:
//! 1. pick the state with [`select_state`] and enter it if it changed
//! 2. resize the rectangle for that state with [`apply_state_size`]
//! 3. advance the frame when the sequence interval elapsed or the facing
//!    changed since the last produced frame
//! 4. react to the step: commit frames, footsteps, and completion of the
//!    one-shot sequences (Attack, Hit, React, Death)
//!
//! Frame indices only move through [`Animation::advance`], which wraps or
//! clamps against the sequence length.
use bevy_ecs::prelude::*;

use crate::components::actor::{Actor, ActorFlags, ActorKind, Facing, Health, Suspended};
use crate::components::animation::{
    AnimState, Animation, FrameStep, apply_state_size, select_state,
};
use crate::components::enemyai::{ATTACK_COOLDOWN_MS, AiPhase, EnemyAi};
use crate::components::mapposition::MapPosition;
use crate::events::actor::ActorRemovedEvent;
use crate::events::audio::{AudioCmd, SoundCue};
use crate::events::combat::FireProjectile;
use crate::geometry::Rect;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Horizontal offset of a projectile's spawn point from the shooter's
/// leading edge, measured inward.
pub const PROJECTILE_ORIGIN_X: i32 = 40;
/// Vertical offset of a projectile's spawn point from the shooter's top.
pub const PROJECTILE_ORIGIN_Y: i32 = 50;

/// Spawn rectangle of a projectile of `size` fired by an actor at `shooter`.
pub fn projectile_origin(shooter: &Rect, facing: Facing, size: (i32, i32)) -> Rect {
    let (w, h) = size;
    let x = match facing {
        Facing::Right => shooter.right() - PROJECTILE_ORIGIN_X,
        Facing::Left => shooter.left() + PROJECTILE_ORIGIN_X - w,
    };
    Rect::new(x, shooter.top() + PROJECTILE_ORIGIN_Y, w, h)
}

type AnimatedActor = (
    Entity,
    &'static Actor,
    &'static mut Animation,
    &'static mut ActorFlags,
    &'static Health,
    &'static Facing,
    &'static mut MapPosition,
    Option<&'static mut EnemyAi>,
);

/// Run the state machine for every active actor.
pub fn animation_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    mut audio: MessageWriter<AudioCmd>,
    mut fire: MessageWriter<FireProjectile>,
    mut query: Query<AnimatedActor, Without<Suspended>>,
) {
    let now = time.now_ms;
    for (entity, actor, mut animation, mut flags, health, facing, mut position, mut ai) in
        query.iter_mut()
    {
        animation.just_entered = false;
        let kind = actor.kind;

        let next = select_state(animation.state, &flags, health.current);
        if next != animation.state {
            log::debug!("{:?} {:?} -> {:?}", kind, animation.state, next);
            animation.enter(next, now);
            animation.rendered_facing = *facing;
        }

        let Some(sequence) = store.sequence(kind, animation.state) else {
            log::warn!("{:?} has no {:?} sequence", kind, animation.state);
            continue;
        };
        let state = animation.state;
        let sized_for = &mut animation.sized_for;
        apply_state_size(&mut position.rect, sized_for, state, sequence.size, *facing);

        if animation.just_entered {
            continue;
        }
        let facing_changed = animation.rendered_facing != *facing;
        if !facing_changed && !time.elapsed_since(animation.last_advance_ms, sequence.interval_ms)
        {
            continue;
        }
        animation.rendered_facing = *facing;

        match animation.advance(sequence.frame_count(), now) {
            FrameStep::Advanced => {
                if state == AnimState::Attack && sequence.commit_frame == Some(animation.frame_index)
                {
                    audio.write(AudioCmd::PlayFx {
                        cue: SoundCue::AttackSwing,
                    });
                    if kind == ActorKind::Player {
                        fire.write(FireProjectile {
                            shooter: entity,
                            origin: projectile_origin(
                                &position.rect,
                                *facing,
                                store.projectile.travel.size,
                            ),
                            direction: *facing,
                        });
                    }
                }
            }
            FrameStep::Wrapped => {
                if matches!(state, AnimState::Walk | AnimState::Run) {
                    audio.write(AudioCmd::PlayFx {
                        cue: SoundCue::WalkStep,
                    });
                }
            }
            FrameStep::Completed => {
                match state {
                    AnimState::Death => {
                        log::info!("{:?} removed after death animation", kind);
                        commands.entity(entity).try_despawn();
                        commands.trigger(ActorRemovedEvent { entity, kind });
                        continue;
                    }
                    AnimState::Attack => {
                        flags.is_attacking = false;
                        if let Some(ai) = ai.as_mut() {
                            ai.cooldown_until_ms = now + ATTACK_COOLDOWN_MS;
                            ai.set_phase(AiPhase::Chasing);
                        }
                    }
                    AnimState::Hit => {
                        flags.is_hit = false;
                        if let Some(ai) = ai.as_mut() {
                            ai.set_phase(AiPhase::Chasing);
                        }
                    }
                    AnimState::React => {
                        flags.is_reacting = false;
                        flags.is_chasing = true;
                        if let Some(ai) = ai.as_mut() {
                            ai.set_phase(AiPhase::Chasing);
                        }
                    }
                    AnimState::Idle | AnimState::Walk | AnimState::Run => {}
                }
                let next = select_state(state, &flags, health.current);
                if next != state {
                    log::debug!("{:?} {:?} completed -> {:?}", kind, state, next);
                    animation.enter(next, now);
                    if let Some(sequence) = store.sequence(kind, next) {
                        let sized_for = &mut animation.sized_for;
                        apply_state_size(&mut position.rect, sized_for, next, sequence.size, *facing);
                    }
                }
            }
        }
    }
}
