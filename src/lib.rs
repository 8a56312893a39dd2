//! Kismet entity simulation core.
//!
//! The per-frame simulation of a 2D side-scrolling action game: actor state
//! machine, discrete gravity and jump, AABB collision against static
//! blockers, enemy AI, the combat trigger and the projectile simulator. It
//! draws nothing, plays nothing and reads no devices; collaborators feed it an
//! input snapshot and read back a render projection and audio cues.
//!
//! This module exposes the ECS components, resources, systems and events for
//! use by the driver binary and integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod resources;
pub mod systems;
