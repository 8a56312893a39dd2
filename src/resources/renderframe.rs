//! Read-only projection of the simulation for the presentation layer.
//!
//! The simulation never draws. Once per frame [`render_projection`] writes
//! what should be on screen into [`RenderFrame`]: one [`SpriteDraw`] per actor
//! and projectile in back-to-front order, plus dirty-rectangle hints for
//! incremental redraw.
//!
//! [`render_projection`]: crate::systems::render::render_projection

use bevy_ecs::prelude::Resource;

use crate::geometry::Rect;
use crate::resources::animationstore::FrameHandle;
use crate::resources::encounter::EncounterStage;

/// Draw order, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderLayer {
    Enemies,
    Player,
    Projectiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteDraw {
    pub frame: FrameHandle,
    pub rect: Rect,
    /// Draw horizontally flipped.
    pub mirrored: bool,
    pub layer: RenderLayer,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFrame {
    pub sprites: Vec<SpriteDraw>,
    /// Regions that changed since the previous projection.
    pub dirty: Vec<Rect>,
    /// Redraw the whole screen (set after a map load).
    pub full_redraw: bool,
    /// Stage of the combat transition, for the transition visual.
    pub encounter_stage: EncounterStage,
    /// Sprite rectangles of the previous projection.
    pub previous: Vec<Rect>,
    /// Picked up by the next projection as `full_redraw`.
    pub redraw_requested: bool,
}

impl RenderFrame {
    pub fn request_full_redraw(&mut self) {
        self.redraw_requested = true;
        self.previous.clear();
    }
}
