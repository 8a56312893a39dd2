//! Animation state and the pure state-selection rules.
//!
//! [`Animation`] is the per-actor playback state. Which state an actor should
//! be in is decided by [`select_state`], a pure function of the current state,
//! the actor's [`ActorFlags`] and its health, so the priority rules can be
//! tested without a world.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::actor::{ActorFlags, Facing};
use crate::geometry::Rect;

/// Animation states shared by all actor kinds. Not every kind uses every state;
/// see [`AnimationSet::require`](crate::resources::animationstore::AnimationSet::require).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Run,
    /// Enemy aggro reaction, played once before chasing.
    React,
    Attack,
    Hit,
    Death,
}

impl AnimState {
    /// Looping states wrap to frame 0; the others complete on their last frame.
    pub fn loops(self) -> bool {
        matches!(self, AnimState::Idle | AnimState::Walk | AnimState::Run)
    }
}

/// Result of moving an animation forward by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    Advanced,
    /// A looping sequence went back to frame 0.
    Wrapped,
    /// A one-shot sequence was already on its last frame.
    Completed,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Animation {
    pub state: AnimState,
    pub frame_index: usize,
    /// Timestamp (ms) of the last frame change.
    pub last_advance_ms: u64,
    /// Facing the current frame was last produced for.
    pub rendered_facing: Facing,
    /// State the actor's rectangle is currently sized for.
    pub sized_for: AnimState,
    /// Set when the state changed during the last animation step.
    pub just_entered: bool,
}

impl Animation {
    pub fn new(state: AnimState, now_ms: u64, facing: Facing) -> Self {
        Self {
            state,
            frame_index: 0,
            last_advance_ms: now_ms,
            rendered_facing: facing,
            sized_for: state,
            just_entered: false,
        }
    }

    /// Switch to `state`, restarting its sequence.
    pub fn enter(&mut self, state: AnimState, now_ms: u64) {
        self.state = state;
        self.restart(now_ms);
        self.just_entered = true;
    }

    /// Restart the current sequence from frame 0.
    pub fn restart(&mut self, now_ms: u64) {
        self.frame_index = 0;
        self.last_advance_ms = now_ms;
    }

    /// Move one frame forward in a sequence of `frame_count` frames.
    pub fn advance(&mut self, frame_count: usize, now_ms: u64) -> FrameStep {
        debug_assert!(frame_count > 0, "animation sequences are never empty");
        self.last_advance_ms = now_ms;
        let next = self.frame_index + 1;
        if next < frame_count {
            self.frame_index = next;
            FrameStep::Advanced
        } else if self.state.loops() {
            self.frame_index = 0;
            FrameStep::Wrapped
        } else {
            self.frame_index = frame_count.saturating_sub(1);
            FrameStep::Completed
        }
    }
}

/// Pick the state an actor should be in this frame.
///
/// Death is terminal and wins as soon as health reaches zero, including the
/// frame of a lethal hit. Below it: Hit, Attack, React, Run, Walk, Idle.
pub fn select_state(current: AnimState, flags: &ActorFlags, health: i32) -> AnimState {
    if current == AnimState::Death || health <= 0 {
        return AnimState::Death;
    }
    if flags.is_hit {
        return AnimState::Hit;
    }
    if flags.is_attacking {
        return AnimState::Attack;
    }
    if flags.is_reacting {
        return AnimState::React;
    }
    match (flags.moving, flags.running) {
        (true, true) => AnimState::Run,
        (true, false) => AnimState::Walk,
        _ => AnimState::Idle,
    }
}

/// Resize `rect` for `new_state` so the feet stay planted.
///
/// `y` moves by the height delta; `x` moves by the width delta only when
/// facing left so a mirrored sprite does not appear to jump. Does nothing and
/// returns false when `sized_for` already equals `new_state`.
pub fn apply_state_size(
    rect: &mut Rect,
    sized_for: &mut AnimState,
    new_state: AnimState,
    new_size: (i32, i32),
    facing: Facing,
) -> bool {
    if *sized_for == new_state {
        return false;
    }
    let (w, h) = new_size;
    rect.y += rect.h - h;
    if facing == Facing::Left {
        rect.x += rect.w - w;
    }
    rect.w = w;
    rect.h = h;
    *sized_for = new_state;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> ActorFlags {
        ActorFlags::default()
    }

    #[test]
    fn test_select_idle_by_default() {
        assert_eq!(select_state(AnimState::Walk, &flags(), 3), AnimState::Idle);
    }

    #[test]
    fn test_select_movement() {
        let mut f = flags();
        f.moving = true;
        assert_eq!(select_state(AnimState::Idle, &f, 3), AnimState::Walk);
        f.running = true;
        assert_eq!(select_state(AnimState::Idle, &f, 3), AnimState::Run);
    }

    #[test]
    fn test_running_without_movement_is_idle() {
        let mut f = flags();
        f.running = true;
        assert_eq!(select_state(AnimState::Idle, &f, 3), AnimState::Idle);
    }

    #[test]
    fn test_attack_beats_movement() {
        let mut f = flags();
        f.moving = true;
        f.running = true;
        f.is_attacking = true;
        assert_eq!(select_state(AnimState::Run, &f, 3), AnimState::Attack);
    }

    #[test]
    fn test_hit_beats_attack_and_react() {
        let mut f = flags();
        f.is_hit = true;
        f.is_attacking = true;
        f.is_reacting = true;
        assert_eq!(select_state(AnimState::Attack, &f, 1), AnimState::Hit);
    }

    #[test]
    fn test_react_below_attack() {
        let mut f = flags();
        f.is_reacting = true;
        f.moving = true;
        assert_eq!(select_state(AnimState::Walk, &f, 1), AnimState::React);
        f.is_attacking = true;
        assert_eq!(select_state(AnimState::Walk, &f, 1), AnimState::Attack);
    }

    #[test]
    fn test_lethal_hit_selects_death() {
        let mut f = flags();
        f.is_hit = true;
        assert_eq!(select_state(AnimState::Idle, &f, 0), AnimState::Death);
    }

    #[test]
    fn test_death_is_terminal() {
        let mut f = flags();
        f.moving = true;
        f.is_hit = true;
        assert_eq!(select_state(AnimState::Death, &f, 5), AnimState::Death);
    }

    #[test]
    fn test_advance_wraps_looping_states() {
        let mut anim = Animation::new(AnimState::Walk, 0, Facing::Right);
        assert_eq!(anim.advance(2, 10), FrameStep::Advanced);
        assert_eq!(anim.frame_index, 1);
        assert_eq!(anim.advance(2, 20), FrameStep::Wrapped);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.last_advance_ms, 20);
    }

    #[test]
    fn test_advance_holds_last_frame_on_completion() {
        let mut anim = Animation::new(AnimState::Attack, 0, Facing::Right);
        anim.advance(2, 10);
        assert_eq!(anim.advance(2, 20), FrameStep::Completed);
        assert_eq!(anim.frame_index, 1);
    }

    #[test]
    fn test_enter_resets_frame() {
        let mut anim = Animation::new(AnimState::Walk, 0, Facing::Right);
        anim.advance(4, 10);
        anim.enter(AnimState::Attack, 50);
        assert_eq!(anim.state, AnimState::Attack);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.last_advance_ms, 50);
        assert!(anim.just_entered);
    }

    #[test]
    fn test_resize_keeps_feet_planted_facing_right() {
        let mut rect = Rect::new(100, 200, 50, 100);
        let mut sized_for = AnimState::Idle;
        assert!(apply_state_size(
            &mut rect,
            &mut sized_for,
            AnimState::Attack,
            (80, 120),
            Facing::Right
        ));
        assert_eq!(rect, Rect::new(100, 180, 80, 120));
        assert_eq!(rect.bottom(), 300);
        assert_eq!(sized_for, AnimState::Attack);
    }

    #[test]
    fn test_resize_shifts_x_when_facing_left() {
        let mut rect = Rect::new(100, 200, 50, 100);
        let mut sized_for = AnimState::Idle;
        apply_state_size(
            &mut rect,
            &mut sized_for,
            AnimState::Attack,
            (80, 120),
            Facing::Left,
        );
        assert_eq!(rect.x, 70);
        assert_eq!(rect.right(), 150);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut rect = Rect::new(100, 200, 50, 100);
        let mut sized_for = AnimState::Idle;
        apply_state_size(
            &mut rect,
            &mut sized_for,
            AnimState::Attack,
            (80, 120),
            Facing::Left,
        );
        let once = rect;
        assert!(!apply_state_size(
            &mut rect,
            &mut sized_for,
            AnimState::Attack,
            (80, 120),
            Facing::Left
        ));
        assert_eq!(rect, once);
    }
}
