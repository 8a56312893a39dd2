use bevy_ecs::prelude::Component;

use crate::components::actor::Facing;

/// Short-lived straight-line shot. Its rectangle lives in
/// [`MapPosition`](crate::components::mapposition::MapPosition).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub direction: Facing,
    /// Index into the travel sequence, or the impact sequence once `has_hit`.
    pub frame_index: usize,
    pub last_advance_ms: u64,
    pub has_hit: bool,
}

impl Projectile {
    pub fn new(direction: Facing, now_ms: u64) -> Self {
        Self {
            direction,
            frame_index: 0,
            last_advance_ms: now_ms,
            has_hit: false,
        }
    }

    /// Switch to the impact sequence.
    pub fn impact(&mut self, now_ms: u64) {
        self.has_hit = true;
        self.frame_index = 0;
        self.last_advance_ms = now_ms;
    }
}
