//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: timing, input, configuration, the
//! animation tables, map geometry, encounter state, and the render projection.
//!
//! Overview
//! - `animationstore` – animation tables per actor kind and the asset provider seam
//! - `encounter` – combat transition stage and participants
//! - `gameconfig` – world bounds, timing and AI thresholds loaded from INI
//! - `input` – per-frame input snapshot with edges
//! - `map` – map collaborator interface and static collision geometry
//! - `renderframe` – sprites and dirty rectangles for the presentation layer
//! - `worldtime` – frame clock
pub mod animationstore;
pub mod encounter;
pub mod gameconfig;
pub mod input;
pub mod map;
pub mod renderframe;
pub mod worldtime;
