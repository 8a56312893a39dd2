//! Combat events.
//!
//! - [`FireProjectile`] is a buffered message written by the animation system
//!   when the player's attack reaches its commit frame and consumed by the
//!   projectile spawner later in the same frame.
//! - [`CombatStartedEvent`] / [`CombatEndedEvent`] are observer events fired
//!   when an encounter becomes active and when it is resolved.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

use crate::components::actor::Facing;
use crate::geometry::Rect;

/// Request to spawn a projectile from `origin` travelling toward `direction`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireProjectile {
    pub shooter: Entity,
    pub origin: Rect,
    pub direction: Facing,
}

/// Fired once both actors are repositioned and the encounter is active.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatStartedEvent {
    pub player: Entity,
    pub enemy: Entity,
}

/// Fired when an active encounter is resolved.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatEndedEvent;
