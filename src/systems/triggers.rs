//! Scripted trigger regions.
use bevy_ecs::prelude::*;

use crate::components::actor::{Facing, Player};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::events::trigger::TriggerReachedEvent;
use crate::resources::map::{StaticGeometry, TriggerPresence};

/// Fire [`TriggerReachedEvent`] when the player's hitbox enters a region.
///
/// Presence is tracked per region, so standing inside fires once; leaving and
/// re-entering fires again.
pub fn trigger_region_system(
    mut commands: Commands,
    geometry: Res<StaticGeometry>,
    mut presence: ResMut<TriggerPresence>,
    player: Query<(&MapPosition, &BoxCollider, &Facing), With<Player>>,
) {
    let Ok((position, collider, facing)) = player.single() else {
        return;
    };
    let hitbox = collider.hitbox(&position.rect, *facing);
    for region in &geometry.triggers {
        if presence.update(&region.name, hitbox.overlaps(&region.rect)) {
            log::info!("trigger '{}' reached on map '{}'", region.name, geometry.map_name);
            commands.trigger(TriggerReachedEvent {
                name: region.name.clone(),
            });
        }
    }
}
