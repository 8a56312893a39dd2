//! Per-frame input snapshot resource.
//!
//! The input collaborator reports which actions are held this frame as a
//! [`RawInput`]; [`InputState::apply`] turns that into held/pressed/released
//! state. Every system reads the same immutable snapshot, so an edge is never
//! consumed twice.
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Held state of every action for one frame, as reported by the collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub left: bool,
    pub right: bool,
    /// Run modifier.
    pub run: bool,
    pub attack: bool,
    pub jump: bool,
    pub interact: bool,
    pub quit: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean action state with edges relative to the previous frame.
pub struct BoolState {
    /// Whether the action is held this frame.
    pub active: bool,
    /// Whether the action went from released to held this frame.
    pub just_pressed: bool,
    /// Whether the action went from held to released this frame.
    pub just_released: bool,
}

impl BoolState {
    fn update(&mut self, held: bool) {
        self.just_pressed = held && !self.active;
        self.just_released = !held && self.active;
        self.active = held;
    }
}

/// Resource capturing the per-frame input relevant to the simulation.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub run: BoolState,
    pub attack: BoolState,
    pub jump: BoolState,
    pub interact: BoolState,
    pub quit: BoolState,
}

impl InputState {
    /// Fold this frame's held state into the snapshot, computing edges.
    pub fn apply(&mut self, raw: RawInput) {
        self.left.update(raw.left);
        self.right.update(raw.right);
        self.run.update(raw.run);
        self.attack.update(raw.attack);
        self.jump.update(raw.jump);
        self.interact.update(raw.interact);
        self.quit.update(raw.quit);
    }

    /// Horizontal direction held: -1, 0 or +1. Opposite directions cancel.
    pub fn horizontal(&self) -> i32 {
        match (self.left.active, self.right.active) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        assert!(!input.left.active);
        assert!(!input.right.active);
        assert!(!input.attack.just_pressed);
        assert!(!input.quit.just_released);
        assert_eq!(input.horizontal(), 0);
    }

    #[test]
    fn test_press_edge_only_on_first_frame() {
        let mut input = InputState::default();
        let raw = RawInput {
            jump: true,
            ..Default::default()
        };
        input.apply(raw);
        assert!(input.jump.active);
        assert!(input.jump.just_pressed);
        input.apply(raw);
        assert!(input.jump.active);
        assert!(!input.jump.just_pressed);
    }

    #[test]
    fn test_release_edge() {
        let mut input = InputState::default();
        input.apply(RawInput {
            attack: true,
            ..Default::default()
        });
        input.apply(RawInput::default());
        assert!(!input.attack.active);
        assert!(input.attack.just_released);
        input.apply(RawInput::default());
        assert!(!input.attack.just_released);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut input = InputState::default();
        input.apply(RawInput {
            left: true,
            right: true,
            ..Default::default()
        });
        assert_eq!(input.horizontal(), 0);
        input.apply(RawInput {
            left: true,
            ..Default::default()
        });
        assert_eq!(input.horizontal(), -1);
    }
}
