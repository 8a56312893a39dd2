//! ECS components for actors and projectiles.
//!
//! Submodules overview:
//! - [`actor`] – actor kind markers, facing, intent flags and health
//! - [`animation`] – animation playback state and the pure state-selection rules
//! - [`boxcollider`] – hitbox insets relative to the actor rectangle
//! - [`enemyai`] – AI behaviour phase and timers
//! - [`mapposition`] – authoritative world rectangle
//! - [`projectile`] – straight-line shot state
//! - [`rigidbody`] – discrete gravity/jump accumulators

pub mod actor;
pub mod animation;
pub mod boxcollider;
pub mod enemyai;
pub mod mapposition;
pub mod projectile;
pub mod rigidbody;
