//! Animation table registry.
//!
//! This module provides the store of animation definitions shared read-only
//! by every actor of a kind. A table is described by an [`AnimationManifest`]
//! (state → asset key, interval, rectangle size, commit frame) and resolved
//! against an injected [`AssetProvider`], which owns the actual frame data.
//! The simulation only ever sees opaque [`FrameHandle`]s.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::actor::ActorKind;
use crate::components::animation::AnimState;
use crate::error::ConfigurationError;

/// Opaque reference to one frame image owned by the asset provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u32);

/// Supplies ordered frame sequences addressed by a logical key.
pub trait AssetProvider {
    fn frames(&self, key: &str) -> Option<Vec<FrameHandle>>;
}

/// In-memory provider mapping keys to sequentially allocated handles.
#[derive(Debug, Clone, Default)]
pub struct FrameCatalog {
    sequences: FxHashMap<String, Vec<FrameHandle>>,
    next: u32,
}

impl FrameCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `count` fresh frames under `key`.
    pub fn insert(&mut self, key: impl Into<String>, count: usize) {
        let frames = (0..count)
            .map(|i| FrameHandle(self.next + i as u32))
            .collect();
        self.next += count as u32;
        self.sequences.insert(key.into(), frames);
    }

    pub fn with_sequence(mut self, key: impl Into<String>, count: usize) -> Self {
        self.insert(key, count);
        self
    }

    /// Build from a JSON object of `key: frame_count`.
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        let counts: Vec<(String, usize)> = serde_json::from_str::<FxHashMap<String, usize>>(text)
            .map_err(|e| ConfigurationError::Manifest(e.to_string()))?
            .into_iter()
            .collect();
        let mut sorted = counts;
        sorted.sort();
        let mut catalog = Self::new();
        for (key, count) in sorted {
            catalog.insert(key, count);
        }
        Ok(catalog)
    }
}

impl AssetProvider for FrameCatalog {
    fn frames(&self, key: &str) -> Option<Vec<FrameHandle>> {
        self.sequences.get(key).cloned()
    }
}

/// Immutable data for one animation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationResource {
    pub frames: Vec<FrameHandle>,
    /// Minimum time between frame changes.
    pub interval_ms: u64,
    /// Actor rectangle size while in this state.
    pub size: (i32, i32),
    /// Frame on which an attack lands, if any.
    pub commit_frame: Option<usize>,
}

impl AnimationResource {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame handle at `index`, clamped to the sequence. `None` only for a
    /// sequence with no frames.
    pub fn frame(&self, index: usize) -> Option<FrameHandle> {
        self.frames.get(index).or_else(|| self.frames.last()).copied()
    }
}

/// All sequences of one actor kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationSet {
    pub sequences: FxHashMap<AnimState, AnimationResource>,
}

impl AnimationSet {
    pub fn get(&self, state: AnimState) -> Option<&AnimationResource> {
        self.sequences.get(&state)
    }

    /// States the state machine can select for `kind`.
    pub fn required_states(kind: ActorKind) -> &'static [AnimState] {
        match kind {
            ActorKind::Player => &[
                AnimState::Idle,
                AnimState::Walk,
                AnimState::Run,
                AnimState::Attack,
                AnimState::Hit,
                AnimState::Death,
            ],
            ActorKind::Enemy => &[
                AnimState::Idle,
                AnimState::Walk,
                AnimState::Run,
                AnimState::React,
                AnimState::Attack,
                AnimState::Hit,
                AnimState::Death,
            ],
        }
    }

    /// Fail if any state `kind` can reach has no sequence.
    pub fn require(&self, kind: ActorKind) -> Result<(), ConfigurationError> {
        for state in Self::required_states(kind) {
            if !self.sequences.contains_key(state) {
                return Err(ConfigurationError::MissingState {
                    kind,
                    state: *state,
                });
            }
        }
        Ok(())
    }
}

/// Travel/impact pair used by every projectile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectileAnimation {
    pub travel: AnimationResource,
    pub impact: AnimationResource,
}

/// Central registry of animation tables keyed by actor kind.
#[derive(Resource, Debug, Clone)]
pub struct AnimationStore {
    pub sets: FxHashMap<ActorKind, AnimationSet>,
    pub projectile: ProjectileAnimation,
}

impl AnimationStore {
    /// Resolve every sequence of `manifest` through `provider`.
    pub fn from_manifest(
        manifest: &AnimationManifest,
        provider: &dyn AssetProvider,
    ) -> Result<Self, ConfigurationError> {
        let mut sets = FxHashMap::default();
        for kind_manifest in &manifest.actors {
            let mut set = AnimationSet::default();
            for seq in &kind_manifest.sequences {
                set.sequences.insert(seq.state, seq.resolve(provider)?);
            }
            sets.insert(kind_manifest.kind, set);
        }
        let projectile = ProjectileAnimation {
            travel: manifest.projectile.travel.resolve(provider)?,
            impact: manifest.projectile.impact.resolve(provider)?,
        };
        Ok(Self { sets, projectile })
    }

    /// Set for `kind`, verified complete.
    pub fn set(&self, kind: ActorKind) -> Result<&AnimationSet, ConfigurationError> {
        let set = self
            .sets
            .get(&kind)
            .ok_or(ConfigurationError::MissingSet { kind })?;
        set.require(kind)?;
        Ok(set)
    }

    /// Sequence for `kind` in `state`, if registered.
    pub fn sequence(&self, kind: ActorKind, state: AnimState) -> Option<&AnimationResource> {
        self.sets.get(&kind).and_then(|set| set.get(state))
    }
}

/// One state's entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSpec {
    pub state: AnimState,
    pub key: String,
    pub interval_ms: u64,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub commit_frame: Option<usize>,
}

impl SequenceSpec {
    fn resolve(&self, provider: &dyn AssetProvider) -> Result<AnimationResource, ConfigurationError> {
        let frames = provider
            .frames(&self.key)
            .ok_or_else(|| ConfigurationError::MissingFrames {
                key: self.key.clone(),
            })?;
        if frames.is_empty() {
            return Err(ConfigurationError::EmptySequence {
                key: self.key.clone(),
            });
        }
        if self.interval_ms == 0 {
            return Err(ConfigurationError::ZeroInterval {
                key: self.key.clone(),
            });
        }
        if let Some(frame) = self.commit_frame {
            if frame >= frames.len() {
                return Err(ConfigurationError::CommitFrameOutOfRange {
                    key: self.key.clone(),
                    frame,
                    len: frames.len(),
                });
            }
        }
        Ok(AnimationResource {
            frames,
            interval_ms: self.interval_ms,
            size: (self.width, self.height),
            commit_frame: self.commit_frame,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindManifest {
    pub kind: ActorKind,
    pub sequences: Vec<SequenceSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileManifest {
    pub travel: SequenceSpec,
    pub impact: SequenceSpec,
}

/// Serializable description of every animation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationManifest {
    pub actors: Vec<KindManifest>,
    pub projectile: ProjectileManifest,
}

fn seq(
    state: AnimState,
    key: &str,
    interval_ms: u64,
    size: (i32, i32),
    commit_frame: Option<usize>,
) -> SequenceSpec {
    SequenceSpec {
        state,
        key: key.to_string(),
        interval_ms,
        width: size.0,
        height: size.1,
        commit_frame,
    }
}

impl AnimationManifest {
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(text).map_err(|e| ConfigurationError::Manifest(e.to_string()))
    }

    /// Tables of the shipped player, enemy and projectile sprites.
    pub fn builtin() -> Self {
        use AnimState::*;
        Self {
            actors: vec![
                KindManifest {
                    kind: ActorKind::Player,
                    sequences: vec![
                        seq(Idle, "fursa/idle", 100, (120, 150), None),
                        seq(Walk, "fursa/walk", 70, (120, 150), None),
                        seq(Run, "fursa/run", 55, (140, 150), None),
                        seq(Attack, "fursa/attack", 50, (190, 170), Some(6)),
                        seq(Hit, "fursa/hit", 60, (120, 150), None),
                        seq(Death, "fursa/death", 90, (170, 150), None),
                    ],
                },
                KindManifest {
                    kind: ActorKind::Enemy,
                    sequences: vec![
                        seq(Idle, "enemy/idle", 100, (150, 170), None),
                        seq(Walk, "enemy/walk", 90, (150, 170), None),
                        seq(Run, "enemy/run", 70, (150, 170), None),
                        seq(React, "enemy/react", 80, (160, 180), None),
                        seq(Attack, "enemy/attack", 60, (220, 200), Some(8)),
                        seq(Hit, "enemy/hit", 70, (150, 170), None),
                        seq(Death, "enemy/death", 80, (200, 170), None),
                    ],
                },
            ],
            projectile: ProjectileManifest {
                travel: seq(Walk, "particles/blast", 40, (64, 40), None),
                impact: seq(Hit, "particles/blast_impact", 40, (64, 40), None),
            },
        }
    }

    /// Frame catalog with the frame counts of the shipped sprites.
    pub fn builtin_catalog() -> FrameCatalog {
        FrameCatalog::new()
            .with_sequence("fursa/idle", 10)
            .with_sequence("fursa/walk", 8)
            .with_sequence("fursa/run", 8)
            .with_sequence("fursa/attack", 12)
            .with_sequence("fursa/hit", 4)
            .with_sequence("fursa/death", 10)
            .with_sequence("enemy/idle", 8)
            .with_sequence("enemy/walk", 8)
            .with_sequence("enemy/run", 8)
            .with_sequence("enemy/react", 6)
            .with_sequence("enemy/attack", 14)
            .with_sequence("enemy/hit", 4)
            .with_sequence("enemy/death", 15)
            .with_sequence("particles/blast", 8)
            .with_sequence("particles/blast_impact", 8)
    }
}
