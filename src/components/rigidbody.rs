//! Discrete gravity and jump accumulators.
//!
//! The [`RigidBody`] component does not integrate velocity over time. Gravity
//! and jump are stepped in fixed ticks (see [`crate::systems::physics`]): each
//! tick multiplies an accumulator and moves the actor by its integer part,
//! one pixel at a time.
//!
//! The `frozen` flag disables both while an actor's position is owned by
//! something else.

use bevy_ecs::prelude::Component;

/// Minimum time between gravity ticks.
pub const GRAVITY_TICK_MS: u64 = 20;
/// Fall-rate multiplier per gravity tick.
pub const GRAVITY_GROWTH: f32 = 1.1;
/// Fall rate after landing.
pub const BASE_FALL_RATE: f32 = 1.0;
/// Upper bound on the fall rate.
pub const TERMINAL_FALL_RATE: f32 = 24.0;

/// Minimum time between jump deceleration steps.
pub const JUMP_TICK_MS: u64 = 60;
/// Jump-rate multiplier per deceleration step.
pub const JUMP_DECAY: f32 = 0.8;
/// Jump rate at take-off.
pub const BASE_JUMP_RATE: f32 = 20.0;
/// Deceleration steps in one jump.
pub const JUMP_STEPS: u32 = 5;

/// Discrete fall/jump state of an actor.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Pixels per gravity tick (integer part is used).
    pub fall_rate: f32,
    /// Pixels per jump step (integer part is used).
    pub jump_rate: f32,
    /// Deceleration steps taken in the current jump.
    pub jump_steps: u32,
    pub jumping: bool,
    pub last_gravity_ms: u64,
    pub last_jump_ms: u64,
    /// When true, physics systems leave this body alone.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    pub fn new() -> Self {
        Self {
            fall_rate: BASE_FALL_RATE,
            jump_rate: BASE_JUMP_RATE,
            jump_steps: 0,
            jumping: false,
            last_gravity_ms: 0,
            last_jump_ms: 0,
            frozen: false,
        }
    }

    /// Grow the fall rate by one gravity tick, clamped to the terminal rate.
    /// Returns the number of whole pixels to fall this tick.
    pub fn accelerate_fall(&mut self) -> i32 {
        self.fall_rate = (self.fall_rate * GRAVITY_GROWTH).min(TERMINAL_FALL_RATE);
        self.fall_rate.floor() as i32
    }

    pub fn land(&mut self) {
        self.fall_rate = BASE_FALL_RATE;
    }

    /// Start a jump at `now_ms`. Returns false if one is already in progress.
    pub fn start_jump(&mut self, now_ms: u64) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.jump_rate = BASE_JUMP_RATE;
        self.jump_steps = 0;
        self.last_jump_ms = now_ms;
        self.fall_rate = BASE_FALL_RATE;
        true
    }

    /// Take one deceleration step. Returns the whole pixels to rise this step.
    pub fn decelerate_jump(&mut self) -> i32 {
        self.jump_rate *= JUMP_DECAY;
        self.jump_steps += 1;
        self.jump_rate.floor() as i32
    }

    /// True once the jump has taken all of its steps.
    pub fn jump_exhausted(&self) -> bool {
        self.jump_steps >= JUMP_STEPS
    }

    pub fn finish_jump(&mut self, now_ms: u64) {
        self.jumping = false;
        self.jump_rate = BASE_JUMP_RATE;
        self.jump_steps = 0;
        self.last_gravity_ms = now_ms;
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
