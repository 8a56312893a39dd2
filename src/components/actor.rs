//! Actor identity, facing, intent flags and health.
//!
//! An actor is an entity carrying [`Actor`] plus one of the [`Player`] or
//! [`Enemy`] markers. The markers keep player and enemy queries disjoint so
//! systems can read the player while mutating enemies.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::animation::AnimState;
use crate::error::TransitionError;

/// Which animation set and controller drive an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Player,
    Enemy,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Actor {
    pub kind: ActorKind,
}

/// Marker for the input-driven actor.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker for AI-driven actors.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

/// Marker inserted while a scripted transition owns the actor. Per-frame actor
/// systems skip entities carrying it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Suspended;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing that looks from `from_x` toward `to_x`. Equal positions keep `self`.
    pub fn toward(self, from_x: i32, to_x: i32) -> Self {
        match to_x.cmp(&from_x) {
            std::cmp::Ordering::Less => Facing::Left,
            std::cmp::Ordering::Greater => Facing::Right,
            std::cmp::Ordering::Equal => self,
        }
    }

    pub fn is_mirrored(self) -> bool {
        self == Facing::Left
    }
}

/// Per-actor behaviour flags. These are the only intent channels between the
/// controllers (input, AI, damage) and the animation state machine.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorFlags {
    pub is_attacking: bool,
    pub is_hit: bool,
    pub is_on_ground: bool,
    pub is_aggroed: bool,
    pub is_chasing: bool,
    /// Playing the aggro reaction animation.
    pub is_reacting: bool,
    /// Movement intent this frame.
    pub moving: bool,
    /// Run modifier this frame.
    pub running: bool,
}

impl ActorFlags {
    /// Latch an attack unless a higher-priority exclusive state is active.
    ///
    /// `current` is the actor's animation state, used to refuse attacks once
    /// the actor is dying even if the flags were not cleared.
    pub fn latch_attack(&mut self, current: AnimState) -> Result<(), TransitionError> {
        if current == AnimState::Death {
            return Err(TransitionError::Blocked {
                requested: AnimState::Attack,
                active: AnimState::Death,
            });
        }
        if self.is_hit {
            return Err(TransitionError::Blocked {
                requested: AnimState::Attack,
                active: AnimState::Hit,
            });
        }
        if self.is_attacking {
            return Err(TransitionError::Blocked {
                requested: AnimState::Attack,
                active: AnimState::Attack,
            });
        }
        self.is_attacking = true;
        Ok(())
    }

    /// Latch the hit flag. Being struck interrupts an attack in progress.
    pub fn latch_hit(&mut self) {
        self.is_hit = true;
        self.is_attacking = false;
        self.is_reacting = false;
    }

    /// True while attack or hit blocks movement-based state selection.
    pub fn is_locked(&self) -> bool {
        self.is_attacking || self.is_hit
    }
}

/// Hit points plus hits queued by other actors this frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    pub pending: u32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            pending: 0,
        }
    }

    /// Queue one hit to be applied by the damage intake.
    pub fn queue_hit(&mut self) {
        self.pending += 1;
    }

    /// Apply queued hits, returning how many landed. Never goes below zero.
    pub fn apply_pending(&mut self) -> u32 {
        let hits = self.pending;
        self.pending = 0;
        self.damage(hits as i32);
        hits
    }

    pub fn damage(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_toward() {
        assert_eq!(Facing::Right.toward(100, 50), Facing::Left);
        assert_eq!(Facing::Left.toward(100, 150), Facing::Right);
        assert_eq!(Facing::Left.toward(100, 100), Facing::Left);
    }

    #[test]
    fn test_latch_attack_blocked_by_hit() {
        let mut flags = ActorFlags {
            is_hit: true,
            ..Default::default()
        };
        let err = flags.latch_attack(AnimState::Hit).unwrap_err();
        assert_eq!(
            err,
            TransitionError::Blocked {
                requested: AnimState::Attack,
                active: AnimState::Hit
            }
        );
        assert!(!flags.is_attacking);
    }

    #[test]
    fn test_latch_attack_blocked_by_death() {
        let mut flags = ActorFlags::default();
        assert!(flags.latch_attack(AnimState::Death).is_err());
        assert!(!flags.is_attacking);
    }

    #[test]
    fn test_latch_hit_clears_attack() {
        let mut flags = ActorFlags::default();
        flags.latch_attack(AnimState::Idle).unwrap();
        flags.latch_hit();
        assert!(flags.is_hit);
        assert!(!flags.is_attacking);
    }

    #[test]
    fn test_health_never_negative() {
        let mut health = Health::new(2);
        health.queue_hit();
        health.queue_hit();
        health.queue_hit();
        assert_eq!(health.apply_pending(), 3);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
        assert_eq!(health.pending, 0);
    }
}
