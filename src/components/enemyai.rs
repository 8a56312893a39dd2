//! Behaviour state of AI-driven actors.
//!
//! [`AiPhase`] is layered over the animation states: the controller in
//! [`crate::systems::enemyai`] decides the phase and writes intent flags, and
//! the animation state machine turns those flags into animation states.

use bevy_ecs::prelude::Component;

/// Minimum time between the end of one enemy attack and the next latch.
pub const ATTACK_COOLDOWN_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiPhase {
    /// Alternating between standing and walking.
    #[default]
    Patrol,
    /// Playing the aggro reaction.
    Reacting,
    Chasing,
    Attacking,
    Hit,
    Dead,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyAi {
    pub phase: AiPhase,
    /// Walking half of the patrol cycle.
    pub walking: bool,
    /// Timestamp (ms) of the last patrol toggle.
    pub last_toggle_ms: u64,
    /// No new attack may be latched before this timestamp (ms).
    pub cooldown_until_ms: u64,
}

impl EnemyAi {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_toggle_ms: now_ms,
            ..Default::default()
        }
    }

    pub fn set_phase(&mut self, phase: AiPhase) {
        if self.phase != phase {
            log::debug!("enemy ai {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
