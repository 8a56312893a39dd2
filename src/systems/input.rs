//! Input snapshot update.
//!
//! [`update_input_state`] is the only place input edges are computed. It runs
//! once per frame with the collaborator's [`RawInput`], before the update
//! schedule, and every system reads the resulting
//! [`InputState`](crate::resources::input::InputState).
use bevy_ecs::prelude::*;

use crate::resources::input::{InputState, RawInput};

/// Store this frame's input in the `InputState` resource.
pub fn update_input_state(world: &mut World, raw: RawInput) {
    world.resource_mut::<InputState>().apply(raw);
}
