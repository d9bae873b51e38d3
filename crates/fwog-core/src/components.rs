//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::types::BodyHandle;

/// Link from an entity to its body in the physics backend.
///
/// The backend owns the body; this is only a handle. Previous/current
/// positions are the body positions sampled at the last two physics steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub handle: BodyHandle,
    pub previous_position: Vec2,
    pub current_position: Vec2,
}

/// Position fed to rendering. Refreshed from the body every physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Constant RGBA sprite color, set once at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint(pub Vec4);

/// Marks the player-controlled entity. Exactly one exists in a live world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an enemy that seeks the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Seek speed in world units per second.
    pub speed: f32,
}
