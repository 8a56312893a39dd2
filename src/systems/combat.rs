//! Combat trigger: the one-shot switch from free movement to an encounter.
//!
//! - [`combat_trigger_detector`] watches for the player's hitbox overlapping
//!   an enemy whose attack is on its commit frame, validates the spawn slots,
//!   and suspends both actors
//! - [`combat_transition`] plays the scripted sequence as timed stages
//!   (impact, flash, teleport), then repositions both actors and activates the
//!   encounter
//! - [`end_encounter`] is the resolution hook for the encounter collaborator
//!
//! The scripted pauses are frame-budget holds checked against
//! [`WorldTime`]; the frame loop keeps running throughout.
use bevy_ecs::prelude::*;

use crate::components::actor::{Actor, ActorFlags, ActorKind, Enemy, Facing, Health, Player, Suspended};
use crate::components::animation::{AnimState, Animation};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::error::SetupError;
use crate::events::audio::{AudioCmd, SoundCue};
use crate::events::combat::{CombatEndedEvent, CombatStartedEvent};
use crate::geometry::Rect;
use crate::resources::animationstore::AnimationStore;
use crate::resources::encounter::{Encounter, EncounterStage};
use crate::resources::map::{StaticGeometry, required_spawn_slots};
use crate::resources::renderframe::RenderFrame;
use crate::resources::worldtime::WorldTime;

/// Commit frame used when the enemy attack sequence does not define one.
pub const DEFAULT_ENEMY_COMMIT_FRAME: usize = 8;

/// Run condition: no encounter is running or being set up.
pub fn encounter_idle(encounter: Res<Encounter>) -> bool {
    encounter.is_idle()
}

/// Run condition: the scripted transition is playing.
pub fn encounter_in_transition(encounter: Res<Encounter>) -> bool {
    encounter.in_transition()
}

/// Run condition: no encounter is active.
pub fn encounter_not_active(encounter: Res<Encounter>) -> bool {
    !encounter.is_active()
}

fn report_setup_error(encounter: &mut Encounter, error: SetupError) {
    if encounter.last_error.as_ref() != Some(&error) {
        log::error!("combat trigger aborted: {}", error);
    }
    encounter.last_error = Some(error);
}

/// Start an encounter when the player is caught by an enemy's attack.
///
/// Fires when the player's hitbox overlaps an enemy rectangle while that
/// enemy's Attack animation is on its commit frame. A map without the combat
/// spawn slots aborts the trigger with a [`SetupError`] and leaves both
/// actors untouched.
#[allow(clippy::too_many_arguments)]
pub fn combat_trigger_detector(
    mut commands: Commands,
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    geometry: Res<StaticGeometry>,
    mut encounter: ResMut<Encounter>,
    mut audio: MessageWriter<AudioCmd>,
    mut player: Query<
        (Entity, &MapPosition, &BoxCollider, &Facing, &Animation, &mut RigidBody),
        (With<Player>, Without<Enemy>, Without<Suspended>),
    >,
    mut enemies: Query<
        (Entity, &MapPosition, &Animation, &mut RigidBody),
        (With<Enemy>, Without<Player>, Without<Suspended>),
    >,
) {
    let Ok((player_entity, player_pos, collider, facing, player_anim, mut player_body)) =
        player.single_mut()
    else {
        return;
    };
    if player_anim.state == AnimState::Death {
        return;
    }
    let commit_frame = store
        .sequence(ActorKind::Enemy, AnimState::Attack)
        .and_then(|s| s.commit_frame)
        .unwrap_or(DEFAULT_ENEMY_COMMIT_FRAME);
    let hitbox = collider.hitbox(&player_pos.rect, *facing);

    let Some((enemy_entity, _, _, mut enemy_body)) = enemies.iter_mut().find(|(_, pos, anim, _)| {
        anim.state == AnimState::Attack
            && anim.frame_index == commit_frame
            && hitbox.overlaps(&pos.rect)
    }) else {
        return;
    };

    if let Err(error) = required_spawn_slots(&geometry.spawn_rects) {
        report_setup_error(&mut encounter, error);
        return;
    }

    log::info!(
        "combat triggered on map '{}': player {:?} vs enemy {:?}",
        geometry.map_name,
        player_entity,
        enemy_entity
    );
    encounter.begin(player_entity, enemy_entity, time.now_ms);
    player_body.freeze();
    enemy_body.freeze();
    commands.entity(player_entity).insert(Suspended);
    commands.entity(enemy_entity).insert(Suspended);
    audio.write(AudioCmd::PlayFx {
        cue: SoundCue::Impact,
    });
}

type EncounterActor = (
    &'static Actor,
    &'static mut MapPosition,
    &'static mut Animation,
    &'static mut Facing,
    &'static mut Health,
    &'static mut RigidBody,
    &'static mut ActorFlags,
);

/// Step the scripted transition and finish the encounter setup.
///
/// Impact, flash and teleport each hold for their stage time. When teleport
/// ends both actors are placed with their top-left on spawn slots 1 and 3,
/// reset to Idle facing each other, the player loses one health, and the
/// encounter becomes active.
#[allow(clippy::too_many_arguments)]
pub fn combat_transition(
    mut commands: Commands,
    time: Res<WorldTime>,
    store: Res<AnimationStore>,
    geometry: Res<StaticGeometry>,
    mut encounter: ResMut<Encounter>,
    mut render: ResMut<RenderFrame>,
    mut audio: MessageWriter<AudioCmd>,
    mut actors: Query<EncounterActor, With<Suspended>>,
) {
    let Some(hold) = encounter.stage.hold_ms() else {
        return;
    };
    if !time.elapsed_since(encounter.stage_started_ms, hold) {
        return;
    }
    match encounter.stage {
        EncounterStage::Impact => {
            encounter.enter(EncounterStage::Flash, time.now_ms);
            render.request_full_redraw();
            return;
        }
        EncounterStage::Flash => {
            encounter.enter(EncounterStage::Teleport, time.now_ms);
            audio.write(AudioCmd::PlayFx {
                cue: SoundCue::Teleport,
            });
            return;
        }
        EncounterStage::Teleport => {}
        EncounterStage::Idle | EncounterStage::Active => return,
    }

    let (Some(player), Some(enemy)) = (encounter.player, encounter.enemy) else {
        log::warn!("combat transition without participants");
        encounter.reset();
        return;
    };
    let release = |commands: &mut Commands| {
        commands.entity(player).try_remove::<Suspended>();
        commands.entity(enemy).try_remove::<Suspended>();
    };

    let (player_slot, enemy_slot) = match required_spawn_slots(&geometry.spawn_rects) {
        Ok(slots) => slots,
        Err(error) => {
            for (_, _, _, _, _, mut body, _) in actors.iter_mut() {
                body.unfreeze();
            }
            release(&mut commands);
            encounter.stage = EncounterStage::Idle;
            encounter.player = None;
            encounter.enemy = None;
            report_setup_error(&mut encounter, error);
            return;
        }
    };

    let Ok([mut p, mut e]) = actors.get_many_mut([player, enemy]) else {
        log::warn!("combat participants vanished during the transition");
        release(&mut commands);
        encounter.reset();
        return;
    };

    let player_facing = Facing::Right.toward(player_slot.x, enemy_slot.x);
    for ((actor, position, animation, facing, _, body, flags), slot, new_facing) in [
        (&mut p, player_slot, player_facing),
        (&mut e, enemy_slot, player_facing.flipped()),
    ] {
        let size = store
            .sequence(actor.kind, AnimState::Idle)
            .map(|seq| seq.size)
            .unwrap_or((position.rect.w, position.rect.h));
        position.rect = Rect::new(slot.x, slot.y, size.0, size.1);
        **facing = new_facing;
        **animation = Animation::new(AnimState::Idle, time.now_ms, new_facing);
        body.finish_jump(time.now_ms);
        body.land();
        body.unfreeze();
        flags.is_attacking = false;
        flags.is_reacting = false;
        flags.is_hit = false;
        flags.moving = false;
        flags.running = false;
    }
    p.4.damage(1);

    release(&mut commands);
    encounter.enter(EncounterStage::Active, time.now_ms);
    render.request_full_redraw();
    log::info!(
        "encounter active: player health {}/{}",
        p.4.current,
        p.4.max
    );
    commands.trigger(CombatStartedEvent { player, enemy });
}

/// Resolve the active encounter. Returns false if none was active.
pub fn end_encounter(world: &mut World) -> bool {
    let ended = world.resource_mut::<Encounter>().end();
    if ended {
        log::info!("encounter ended");
        world.trigger(CombatEndedEvent);
    }
    ended
}
