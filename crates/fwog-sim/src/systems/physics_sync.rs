//! Physics step and body -> component sync.
//!
//! One call advances the backend by exactly `dt`, copies the player body
//! position verbatim, re-aims every enemy at the player, and refreshes enemy
//! position history.

use glam::Vec2;
use hecs::World;

use fwog_core::components::{Enemy, PhysicsBody, Player, Position};
use fwog_core::enums::InterpolationPolicy;

use crate::error::SimError;
use crate::physics::{ContactEvent, PhysicsBackend};
use crate::systems::steering;

pub fn run(
    world: &mut World,
    physics: &mut dyn PhysicsBackend,
    contacts: &mut Vec<ContactEvent>,
    dt: f32,
    interpolation: InterpolationPolicy,
) -> Result<(), SimError> {
    physics.step(dt, contacts);
    let player_position = sync_player(world, physics)?;
    steer_enemies(world, physics, player_position, dt, interpolation)
}

/// Copy the single player's body position into its Position component.
fn sync_player(world: &mut World, physics: &dyn PhysicsBackend) -> Result<Vec2, SimError> {
    let mut players = 0usize;
    let mut player_position = Vec2::ZERO;

    for (entity, (body, position, _player)) in
        world.query_mut::<(&mut PhysicsBody, &mut Position, &Player)>()
    {
        players += 1;
        let current = physics
            .position(body.handle)
            .ok_or(SimError::MissingBody(entity))?;
        body.previous_position = body.current_position;
        body.current_position = current;
        position.0 = current;
        player_position = current;
    }

    match players {
        0 => Err(SimError::NoPlayer),
        1 => Ok(player_position),
        n => Err(SimError::MultiplePlayers(n)),
    }
}

/// Set each enemy's velocity toward the player for the next step.
fn steer_enemies(
    world: &mut World,
    physics: &mut dyn PhysicsBackend,
    player_position: Vec2,
    dt: f32,
    interpolation: InterpolationPolicy,
) -> Result<(), SimError> {
    for (entity, (body, enemy, position)) in
        world.query_mut::<(&mut PhysicsBody, &Enemy, &mut Position)>()
    {
        let current = physics
            .position(body.handle)
            .ok_or(SimError::MissingBody(entity))?;
        physics.set_velocity(body.handle, steering::seek(current, player_position, enemy.speed));

        body.previous_position = body.current_position;
        body.current_position = current;
        position.0 = match interpolation {
            InterpolationPolicy::Raw => current,
            // Blend factor is the step size, not the accumulator remainder.
            InterpolationPolicy::FixedStepBlend => {
                body.previous_position.lerp(body.current_position, dt)
            }
        };
    }
    Ok(())
}
