//! Input-to-motion mapping for the player body.
//!
//! Runs once per rendered frame, not per physics step.

use glam::Vec2;
use hecs::{Entity, World};

use fwog_core::components::PhysicsBody;
use fwog_core::enums::{DiagonalPolicy, InputMode};
use fwog_core::input::DirectionalKeys;

use crate::error::SimError;
use crate::physics::PhysicsBackend;

/// Direction requested by the held keys. Opposing keys cancel.
pub fn direction(keys: DirectionalKeys, policy: DiagonalPolicy) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if keys.up {
        dir.y -= 1.0;
    }
    if keys.down {
        dir.y += 1.0;
    }
    if keys.left {
        dir.x -= 1.0;
    }
    if keys.right {
        dir.x += 1.0;
    }
    match policy {
        DiagonalPolicy::Unnormalized => dir,
        DiagonalPolicy::Normalized => dir.normalize_or_zero(),
    }
}

/// Apply held keys to the player's body.
///
/// Teleport mode writes the position directly and only when movement is
/// requested. Velocity mode always writes the velocity, so releasing the keys
/// stops the player.
pub fn run(
    world: &World,
    physics: &mut dyn PhysicsBackend,
    player: Entity,
    keys: DirectionalKeys,
    policy: DiagonalPolicy,
    mode: InputMode,
) -> Result<(), SimError> {
    let handle = world
        .get::<&PhysicsBody>(player)
        .map_err(|_| SimError::MissingBody(player))?
        .handle;
    let dir = direction(keys, policy);

    match mode {
        InputMode::Teleport { step } => {
            if dir != Vec2::ZERO {
                let position = physics
                    .position(handle)
                    .ok_or(SimError::MissingBody(player))?;
                physics.set_position(handle, position + dir * step);
            }
        }
        InputMode::Velocity { speed } => {
            physics.set_velocity(handle, dir * speed);
        }
    }
    Ok(())
}
