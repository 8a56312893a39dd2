use bevy_ecs::prelude::*;

/// Fired when the player's hitbox enters a scripted trigger region.
///
/// Fired once per entry; the player has to leave the region before it can
/// fire again. The region called `"exit"` is the map-forward signal.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TriggerReachedEvent {
    pub name: String,
}
