//! Damage intake.
//!
//! Projectiles only queue hits on [`Health::pending`]; this system turns them
//! into damage once per frame, after projectiles moved and before anyone
//! decides what to do next.
use bevy_ecs::prelude::*;

use crate::components::actor::{ActorFlags, Health, Suspended};
use crate::components::animation::{AnimState, Animation};
use crate::components::enemyai::{AiPhase, EnemyAi};
use crate::events::audio::{AudioCmd, SoundCue};
use crate::resources::worldtime::WorldTime;

/// Apply queued hits.
///
/// Health drops by one per hit and the hit flag is latched, which cancels a
/// running attack or reaction. A second hit during the Hit animation restarts
/// it. Enemies become hostile on being struck. Hits on an actor already in
/// Death are discarded. Suspended actors are skipped.
pub fn damage_intake(
    time: Res<WorldTime>,
    mut audio: MessageWriter<AudioCmd>,
    mut query: Query<
        (
            &mut Health,
            &mut ActorFlags,
            &mut Animation,
            Option<&mut EnemyAi>,
        ),
        Without<Suspended>,
    >,
) {
    for (mut health, mut flags, mut animation, ai) in query.iter_mut() {
        if health.pending == 0 {
            continue;
        }
        if animation.state == AnimState::Death {
            health.pending = 0;
            continue;
        }
        let hits = health.apply_pending();
        flags.latch_hit();
        if animation.state == AnimState::Hit {
            animation.restart(time.now_ms);
        }
        if let Some(mut ai) = ai {
            flags.is_aggroed = true;
            flags.is_chasing = true;
            ai.set_phase(AiPhase::Hit);
        }
        audio.write(AudioCmd::PlayFx {
            cue: SoundCue::Impact,
        });
        log::debug!(
            "took {} hit(s), health {}/{}",
            hits,
            health.current,
            health.max
        );
    }
}
