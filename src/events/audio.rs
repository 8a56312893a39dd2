//! Audio cue messages.
//!
//! The simulation only fires cues; loading, mixing and playback belong to the
//! audio collaborator, which drains `Messages<AudioCmd>` once per frame.

use bevy_ecs::message::Message;

/// Named sound events produced by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    AttackSwing,
    WalkStep,
    Impact,
    Teleport,
}

impl SoundCue {
    /// Stable name used by the audio collaborator to pick a sound.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::AttackSwing => "attack-swing",
            SoundCue::WalkStep => "walk-step",
            SoundCue::Impact => "impact",
            SoundCue::Teleport => "teleport",
        }
    }
}

/// Commands sent to the audio collaborator. Fire-and-forget.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    PlayFx { cue: SoundCue },
}
