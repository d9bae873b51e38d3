//! Seek steering: velocity straight at the target's current position.

use glam::Vec2;

/// Velocity of magnitude `speed` pointing from `from` to `target`.
///
/// Coincident points yield zero velocity instead of a NaN direction.
pub fn seek(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    (target - from).normalize_or_zero() * speed
}
