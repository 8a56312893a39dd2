use bevy_ecs::prelude::Component;

use crate::geometry::Rect;

/// Authoritative world rectangle of an actor or projectile. Its size follows
/// the current animation state.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapPosition {
    pub rect: Rect,
}

impl MapPosition {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}
