use bevy_ecs::prelude::Resource;

/// Frame clock sampled once per frame.
///
/// `ticks` is the frame-time normalization factor: the capped delta measured
/// in reference ticks and rounded, so horizontal movement advances in whole
/// reference-tick steps.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldTime {
    pub now_ms: u64,
    pub delta_ms: u32,
    pub ticks: i32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            now_ms: 0,
            delta_ms: 0,
            ticks: 0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Edge-triggered timer test shared by every timer in the simulation.
    ///
    /// Uses `>=` so a slow frame still fires, and callers store `now_ms` as the
    /// new reference so one interval never fires twice.
    pub fn elapsed_since(&self, since_ms: u64, interval_ms: u64) -> bool {
        self.now_ms.saturating_sub(since_ms) >= interval_ms
    }
}
