//! Simulation engine for FwogSurvivors.
//!
//! Owns the hecs ECS world and the physics backend, advances them at a fixed
//! step, and produces render snapshots for the frame loop.

pub mod clock;
pub mod engine;
pub mod error;
pub mod physics;
pub mod systems;
pub mod world_setup;

pub use engine::{GameWorld, SimConfig};
pub use error::SimError;
pub use fwog_core as core;

#[cfg(test)]
mod tests;
