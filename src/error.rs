//! Error taxonomy for the simulation core.
//!
//! Frame-index overruns are not represented here: indices only move through
//! [`Animation::advance`](crate::components::animation::Animation::advance),
//! which wraps or clamps against the sequence length.

use thiserror::Error;

use crate::components::actor::ActorKind;
use crate::components::animation::AnimState;

/// An animation table cannot drive the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no animation set registered for {kind:?}")]
    MissingSet { kind: ActorKind },
    #[error("animation set for {kind:?} has no {state:?} sequence")]
    MissingState { kind: ActorKind, state: AnimState },
    #[error("asset provider has no frames for key '{key}'")]
    MissingFrames { key: String },
    #[error("frame sequence '{key}' is empty")]
    EmptySequence { key: String },
    #[error("frame sequence '{key}' has a zero frame-advance interval")]
    ZeroInterval { key: String },
    #[error("commit frame {frame} is outside sequence '{key}' of {len} frames")]
    CommitFrameOutOfRange { key: String, frame: usize, len: usize },
    #[error("failed to parse animation manifest: {0}")]
    Manifest(String),
}

/// Map or encounter setup failed; the operation was aborted without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("spawn slot {slot} requested but the map only has {available} spawn rectangles")]
    MissingSpawnSlot { slot: usize, available: usize },
    #[error("player spawn rectangle of map '{map}' is empty")]
    EmptyPlayerSpawn { map: String },
    #[error("map index {0} does not exist")]
    UnknownMap(usize),
    #[error("failed to parse map layout: {0}")]
    Layout(String),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// A requested state change was ignored because an exclusive state is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot enter {requested:?} while {active:?} is active")]
    Blocked {
        requested: AnimState,
        active: AnimState,
    },
}
