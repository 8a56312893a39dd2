//! Frame clock update.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, before the update schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Advance the frame clock by `raw_delta_ms`.
///
/// The delta is capped at `max_frame_delta_ms` so one slow frame cannot
/// teleport actors, then converted to whole reference ticks.
pub fn update_world_time(world: &mut World, raw_delta_ms: u32) {
    let (cap, reference) = world
        .get_resource::<GameConfig>()
        .map(|c| (c.max_frame_delta_ms, c.reference_tick_ms))
        .unwrap_or_else(|| {
            let c = GameConfig::new();
            (c.max_frame_delta_ms, c.reference_tick_ms)
        });
    let mut wt = world.resource_mut::<WorldTime>();
    let delta = raw_delta_ms.min(cap);
    wt.now_ms += u64::from(delta);
    wt.delta_ms = delta;
    wt.ticks = reference_ticks(delta, reference);
    wt.frame_count += 1;
}

/// `delta_ms / reference_ms`, rounded to the nearest whole tick.
pub fn reference_ticks(delta_ms: u32, reference_ms: u32) -> i32 {
    let reference = reference_ms.max(1);
    ((delta_ms + reference / 2) / reference) as i32
}
