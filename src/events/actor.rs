use bevy_ecs::prelude::*;

use crate::components::actor::ActorKind;

/// Fired when an actor's death animation completes and it is despawned.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorRemovedEvent {
    pub entity: Entity,
    pub kind: ActorKind,
}
