//! Builds the per-frame render snapshot from component state.

use hecs::World;

use fwog_core::components::{Position, Tint};
use fwog_core::state::{RenderSnapshot, SpriteInstance};
use fwog_core::types::SimTime;

pub fn build_snapshot(world: &World, time: SimTime) -> RenderSnapshot {
    let mut query = world.query::<(&Position, &Tint)>();
    let sprites = query
        .iter()
        .map(|(_entity, (position, tint))| SpriteInstance {
            position: position.0.to_array(),
            color: tint.0.to_array(),
        })
        .collect();
    RenderSnapshot { time, sprites }
}
