//! Event and message types exchanged between systems and collaborators.
//!
//! Submodules:
//! - [`actor`] – actor removal notifications
//! - [`audio`] – fire-and-forget sound cues for the audio collaborator
//! - [`combat`] – projectile requests and encounter start/end notifications
//! - [`trigger`] – scripted trigger regions reached by the player
pub mod actor;
pub mod audio;
pub mod combat;
pub mod trigger;
