//! Map collaborator interface and the static geometry resource.
//!
//! A [`MapLayout`] is everything the simulation needs from a map: blockers,
//! spawn rectangles, enemy placements and scripted trigger regions. Render
//! surfaces stay with the map provider. [`StaticGeometry`] is the part of the
//! current layout queried every frame; it is never mutated by the systems.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::components::actor::Facing;
use crate::error::SetupError;
use crate::geometry::Rect;

/// Spawn slot the player is moved to when an encounter starts.
pub const PLAYER_COMBAT_SLOT: usize = 1;
/// Spawn slot the enemy is moved to when an encounter starts.
pub const ENEMY_COMBAT_SLOT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    #[default]
    Field,
    /// Hosts encounters; must provide the combat spawn slots.
    Combat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub rect: Rect,
    pub health: i32,
    #[serde(default)]
    pub facing: Facing,
}

/// Named scripted region reported to the dialogue/script collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRegion {
    pub name: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    pub name: String,
    #[serde(default)]
    pub kind: MapKind,
    pub player_spawn: Rect,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    pub blockers: Vec<Rect>,
    #[serde(default)]
    pub spawn_rects: Vec<Rect>,
    #[serde(default)]
    pub triggers: Vec<TriggerRegion>,
}

impl MapLayout {
    pub fn from_json(text: &str) -> Result<Self, SetupError> {
        serde_json::from_str(text).map_err(|e| SetupError::Layout(e.to_string()))
    }

    /// Check the layout before anything in the world is touched.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.player_spawn.is_empty() {
            return Err(SetupError::EmptyPlayerSpawn {
                map: self.name.clone(),
            });
        }
        if self.kind == MapKind::Combat {
            required_spawn_slots(&self.spawn_rects)?;
        }
        Ok(())
    }
}

/// Player and enemy combat spawn rectangles, or the slot that is missing.
pub fn required_spawn_slots(spawn_rects: &[Rect]) -> Result<(Rect, Rect), SetupError> {
    let slot = |index: usize| {
        spawn_rects
            .get(index)
            .copied()
            .ok_or(SetupError::MissingSpawnSlot {
                slot: index,
                available: spawn_rects.len(),
            })
    };
    Ok((slot(PLAYER_COMBAT_SLOT)?, slot(ENEMY_COMBAT_SLOT)?))
}

/// Supplies map layouts by index.
pub trait MapProvider {
    fn layout(&self, index: usize) -> Result<MapLayout, SetupError>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Layouts parsed from a JSON array.
#[derive(Debug, Clone, Default)]
pub struct JsonMapProvider {
    layouts: Vec<MapLayout>,
}

impl JsonMapProvider {
    pub fn from_json(text: &str) -> Result<Self, SetupError> {
        let layouts: Vec<MapLayout> =
            serde_json::from_str(text).map_err(|e| SetupError::Layout(e.to_string()))?;
        Ok(Self { layouts })
    }
}

impl MapProvider for JsonMapProvider {
    fn layout(&self, index: usize) -> Result<MapLayout, SetupError> {
        self.layouts
            .get(index)
            .cloned()
            .ok_or(SetupError::UnknownMap(index))
    }

    fn len(&self) -> usize {
        self.layouts.len()
    }
}

/// Collision geometry and spawn slots of the current map.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticGeometry {
    pub map_name: String,
    pub kind: MapKind,
    pub blockers: Vec<Rect>,
    pub spawn_rects: Vec<Rect>,
    pub triggers: Vec<TriggerRegion>,
}

impl StaticGeometry {
    pub fn from_layout(layout: &MapLayout) -> Self {
        Self {
            map_name: layout.name.clone(),
            kind: layout.kind,
            blockers: layout.blockers.clone(),
            spawn_rects: layout.spawn_rects.clone(),
            triggers: layout.triggers.clone(),
        }
    }
}

/// Trigger regions the player's hitbox is currently inside.
#[derive(Resource, Debug, Clone, Default)]
pub struct TriggerPresence {
    pub inside: FxHashSet<String>,
}

impl TriggerPresence {
    /// Record whether the player is inside `name`. Returns true on entry.
    pub fn update(&mut self, name: &str, inside: bool) -> bool {
        if inside {
            if self.inside.contains(name) {
                return false;
            }
            self.inside.insert(name.to_string());
            true
        } else {
            self.inside.remove(name);
            false
        }
    }

    pub fn clear(&mut self) {
        self.inside.clear();
    }
}
