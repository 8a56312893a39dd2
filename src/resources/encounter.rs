//! Encounter (combat transition) state.
//!
//! The combat trigger is a one-shot transition. [`Encounter`] tracks where it
//! is: idle and watching, playing the scripted sequence, or active until the
//! map/encounter collaborator calls [`Encounter::end`]. The scripted pauses
//! are frame-budget holds measured against [`WorldTime`](super::worldtime::WorldTime),
//! so the frame loop keeps running throughout.

use bevy_ecs::prelude::{Entity, Resource};

use crate::error::SetupError;

/// Hold after the impact cue before the screen transition starts.
pub const IMPACT_HOLD_MS: u64 = 400;
/// Length of the full-screen transition visual.
pub const FLASH_MS: u64 = 1200;
/// Hold after the teleport cue before actors are repositioned.
pub const TELEPORT_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncounterStage {
    /// Watching for the trigger condition.
    #[default]
    Idle,
    Impact,
    /// Full-screen transition visual.
    Flash,
    Teleport,
    /// Encounter running; waits for [`Encounter::end`].
    Active,
}

impl EncounterStage {
    /// Hold time before moving past this stage, for scripted stages.
    pub fn hold_ms(self) -> Option<u64> {
        match self {
            EncounterStage::Impact => Some(IMPACT_HOLD_MS),
            EncounterStage::Flash => Some(FLASH_MS),
            EncounterStage::Teleport => Some(TELEPORT_MS),
            EncounterStage::Idle | EncounterStage::Active => None,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Encounter {
    pub stage: EncounterStage,
    pub stage_started_ms: u64,
    pub player: Option<Entity>,
    pub enemy: Option<Entity>,
    /// Last setup failure reported by the trigger.
    pub last_error: Option<SetupError>,
    /// Encounters started since the map was loaded.
    pub started: u32,
}

impl Encounter {
    pub fn is_active(&self) -> bool {
        self.stage == EncounterStage::Active
    }

    pub fn is_idle(&self) -> bool {
        self.stage == EncounterStage::Idle
    }

    /// Playing the scripted sequence.
    pub fn in_transition(&self) -> bool {
        matches!(
            self.stage,
            EncounterStage::Impact | EncounterStage::Flash | EncounterStage::Teleport
        )
    }

    pub fn begin(&mut self, player: Entity, enemy: Entity, now_ms: u64) {
        self.player = Some(player);
        self.enemy = Some(enemy);
        self.last_error = None;
        self.started += 1;
        self.enter(EncounterStage::Impact, now_ms);
    }

    pub fn enter(&mut self, stage: EncounterStage, now_ms: u64) {
        self.stage = stage;
        self.stage_started_ms = now_ms;
    }

    /// Resolve the encounter. Returns false if none was active.
    pub fn end(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.stage = EncounterStage::Idle;
        self.player = None;
        self.enemy = None;
        true
    }

    /// Forget everything, including counters. Used on map load.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_lifecycle() {
        let mut world = World::new();
        let player = world.spawn_empty().id();
        let enemy = world.spawn_empty().id();
        let mut encounter = Encounter::default();
        assert!(encounter.is_idle());
        assert!(!encounter.end());

        encounter.begin(player, enemy, 100);
        assert!(encounter.in_transition());
        assert!(!encounter.is_active());
        assert_eq!(encounter.stage_started_ms, 100);

        encounter.enter(EncounterStage::Active, 2000);
        assert!(encounter.is_active());
        assert!(encounter.end());
        assert!(encounter.is_idle());
        assert_eq!(encounter.player, None);
        assert_eq!(encounter.started, 1);
    }

    #[test]
    fn test_hold_times() {
        assert_eq!(EncounterStage::Impact.hold_ms(), Some(IMPACT_HOLD_MS));
        assert_eq!(EncounterStage::Active.hold_ms(), None);
    }
}
