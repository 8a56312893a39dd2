//! Simulation systems.
//!
//! This module groups all ECS systems that advance the simulation one frame.
//! The order they run in is fixed by
//! [`build_update_schedule`](crate::game::build_update_schedule).
//!
//! Submodules overview
//! - [`animation`] – actor state machine: select, resize, advance, complete
//! - [`audio`] – keep the audio cue queue readable for the collaborator
//! - [`combat`] – combat trigger detection, scripted transition, resolution
//! - [`damage`] – apply queued hits to health and flags
//! - [`enemyai`] – patrol, aggro, chase and attack decisions
//! - [`input`] – fold the collaborator's input into [`crate::resources::input::InputState`]
//! - [`physics`] – gravity, jump and pixel-stepped horizontal movement
//! - [`playercontroller`] – translate input state into player intent and movement
//! - [`projectile`] – spawn, move, hit-test and expire projectiles
//! - [`render`] – read-only projection for the presentation layer
//! - [`time`] – update the frame clock
//! - [`triggers`] – scripted trigger regions

pub mod animation;
pub mod audio;
pub mod combat;
pub mod damage;
pub mod enemyai;
pub mod input;
pub mod physics;
pub mod playercontroller;
pub mod projectile;
pub mod render;
pub mod time;
pub mod triggers;
