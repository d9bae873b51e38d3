//! Render snapshot handed to the renderer once per rendered frame.

use serde::{Deserialize, Serialize};

use crate::types::SimTime;

/// One instanced sprite: where to draw it and in what color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub time: SimTime,
    pub sprites: Vec<SpriteInstance>,
}
