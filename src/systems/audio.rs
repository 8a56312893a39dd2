//! Audio message queue upkeep.
use bevy_ecs::prelude::{Messages, ResMut};

use crate::events::audio::AudioCmd;

/// Advance the ECS message queue for [`AudioCmd`].
///
/// Run once at the start of the frame. Cues written last frame stay readable
/// for one more frame, so the collaborator can drain them after the schedule.
pub fn update_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}
