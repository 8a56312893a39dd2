use bevy_ecs::prelude::*;

use crate::components::actor::{Actor, ActorKind, Facing};
use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::Projectile;
use crate::geometry::Rect;
use crate::resources::animationstore::AnimationStore;
use crate::resources::encounter::Encounter;
use crate::resources::renderframe::{RenderFrame, RenderLayer, SpriteDraw};

/// Project actors and projectiles into [`RenderFrame`].
///
/// The simulation never draws; the presentation collaborator reads the frame
/// after the schedule. Sprites are ordered enemies, player, projectiles. Dirty
/// rectangles are this frame's sprite rectangles plus last frame's, so
/// vacated regions get repainted.
pub fn render_projection(
    store: Res<AnimationStore>,
    encounter: Res<Encounter>,
    mut frame: ResMut<RenderFrame>,
    actors: Query<(&Actor, &MapPosition, &Animation, &Facing)>,
    projectiles: Query<(&Projectile, &MapPosition)>,
) {
    let mut sprites: Vec<SpriteDraw> = actors
        .iter()
        .filter_map(|(actor, position, animation, facing)| {
            // Sets are verified at spawn; a miss here means a custom store.
            let sequence = store.sequence(actor.kind, animation.state)?;
            Some(SpriteDraw {
                frame: sequence.frame(animation.frame_index)?,
                rect: position.rect,
                mirrored: facing.is_mirrored(),
                layer: match actor.kind {
                    ActorKind::Enemy => RenderLayer::Enemies,
                    ActorKind::Player => RenderLayer::Player,
                },
            })
        })
        .collect();

    sprites.extend(projectiles.iter().filter_map(|(projectile, position)| {
        let sequence = if projectile.has_hit {
            &store.projectile.impact
        } else {
            &store.projectile.travel
        };
        Some(SpriteDraw {
            frame: sequence.frame(projectile.frame_index)?,
            rect: position.rect,
            mirrored: projectile.direction == Facing::Left,
            layer: RenderLayer::Projectiles,
        })
    }));

    sprites.sort_by_key(|s| s.layer);

    let current: Vec<Rect> = sprites.iter().map(|s| s.rect).collect();
    let mut dirty = current.clone();
    dirty.extend(frame.previous.iter().copied());

    frame.full_redraw = std::mem::take(&mut frame.redraw_requested);
    frame.sprites = sprites;
    frame.dirty = dirty;
    frame.previous = current;
    frame.encounter_stage = encounter.stage;
}
