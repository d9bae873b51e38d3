//! Policy enums selecting between the observed variants of the prototype.

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_MOVE_SPEED, PLAYER_TELEPORT_STEP};

/// Which physics backend drives the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicsBackendKind {
    /// Rigid-body solver with velocity/position iterations.
    #[default]
    Rapier,
    /// Simple space integrator with damping and slop.
    Space,
}

/// Whether diagonal input is scaled back to unit length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalPolicy {
    /// Held axes add up, so diagonals move sqrt(2) faster.
    #[default]
    Unnormalized,
    /// Diagonals move at the same speed as single axes.
    Normalized,
}

/// How an enemy's render position is derived from its position history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationPolicy {
    /// Render position is the body position after the step.
    #[default]
    Raw,
    /// Lerp previous to current by the fixed step size.
    FixedStepBlend,
}

/// How held keys move the player body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InputMode {
    /// Write the body position directly: `position += direction * step`.
    /// Bypasses collision response.
    Teleport { step: f32 },
    /// Set the body velocity to `direction * speed` and let physics integrate.
    Velocity { speed: f32 },
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Teleport {
            step: PLAYER_TELEPORT_STEP,
        }
    }
}

impl InputMode {
    /// Velocity mode at the default player move speed.
    pub fn velocity() -> Self {
        InputMode::Velocity {
            speed: PLAYER_MOVE_SPEED,
        }
    }
}

/// Begin or end of a contact between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPhase {
    Begin,
    End,
}
