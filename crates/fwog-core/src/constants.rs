//! Simulation constants and tuning parameters.

use glam::Vec4;

/// Physics tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per physics step.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Bodies ---

/// Side length of every box body (world units).
pub const BODY_SIZE: f32 = 32.0;

/// Player body density, heavy enough that enemies barely shove it.
pub const PLAYER_MASS: f32 = 10_000.0;

/// Enemy body density.
pub const ENEMY_MASS: f32 = 10.0;

// --- Level ---

/// Number of enemies spawned by a default level.
pub const ENEMY_COUNT: usize = 400;

/// Enemy seek speed (units/s).
pub const ENEMY_SPEED: f32 = 100.0;

/// Lower corner of the square enemy spawn region (both axes).
pub const SPAWN_MIN: f32 = -800.0;

/// Side length of the square enemy spawn region.
pub const SPAWN_EXTENT: f32 = 800.0;

// --- Player control ---

/// Position offset per rendered frame per held axis in teleport mode.
pub const PLAYER_TELEPORT_STEP: f32 = 25.0;

/// Player speed (units/s) in velocity mode.
pub const PLAYER_MOVE_SPEED: f32 = 300.0;

// --- Solver ---

/// Velocity solver iterations per step.
pub const VELOCITY_ITERATIONS: usize = 6;

/// Position correction iterations per step.
pub const POSITION_ITERATIONS: usize = 2;

/// Fraction of velocity kept after one second in the space backend (1.0 = none lost).
pub const SPACE_DAMPING: f32 = 1.0;

/// Penetration the space backend tolerates before pushing bodies apart.
pub const COLLISION_SLOP: f32 = 0.5;

// --- Colors ---

pub const PLAYER_COLOR: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const ENEMY_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
