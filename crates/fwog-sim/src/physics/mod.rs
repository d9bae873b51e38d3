//! Physics capability interface and its backends.
//!
//! The simulation is written once against [`PhysicsBackend`]. Backends own
//! their bodies; the rest of the crate only sees [`BodyHandle`]s. The world
//! keeps a [`BodyLinks`] side table to get from a handle back to its entity.

pub mod rapier;
pub mod space;

use std::collections::HashMap;

use glam::Vec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use fwog_core::constants::{COLLISION_SLOP, POSITION_ITERATIONS, SPACE_DAMPING, VELOCITY_ITERATIONS};
use fwog_core::enums::{ContactPhase, PhysicsBackendKind};
use fwog_core::types::{BodyHandle, CollisionCategory};

pub use self::rapier::RapierBackend;
pub use self::space::SpaceBackend;

/// Description of a dynamic box body.
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub position: Vec2,
    pub half_extent: f32,
    /// Density of the box (mass per unit area).
    pub mass: f32,
    pub category: CollisionCategory,
    pub mask: CollisionCategory,
}

/// Contact begin/end between two bodies, reported by a backend step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub phase: ContactPhase,
    pub first: BodyHandle,
    pub second: BodyHandle,
}

/// Entity and category behind a body handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLink {
    pub entity: Entity,
    pub category: CollisionCategory,
}

/// Body handle -> entity side table.
pub type BodyLinks = HashMap<BodyHandle, BodyLink>;

/// Tuning shared by both backends. Fields a backend has no use for are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub backend: PhysicsBackendKind,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    /// Space backend: fraction of velocity kept after one second.
    pub damping: f32,
    /// Space backend: tolerated penetration depth.
    pub collision_slop: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            backend: PhysicsBackendKind::default(),
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,
            damping: SPACE_DAMPING,
            collision_slop: COLLISION_SLOP,
        }
    }
}

/// What the simulation needs from a physics engine.
pub trait PhysicsBackend {
    fn name(&self) -> &'static str;

    /// Create a body. Infallible.
    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Destroy a body. Returns `false` if the handle was unknown.
    fn destroy_body(&mut self, handle: BodyHandle) -> bool;

    /// Advance by exactly `dt`, appending contact begin/end events.
    fn step(&mut self, dt: f32, contacts: &mut Vec<ContactEvent>);

    fn position(&self, handle: BodyHandle) -> Option<Vec2>;
    fn set_position(&mut self, handle: BodyHandle, position: Vec2);
    fn velocity(&self, handle: BodyHandle) -> Option<Vec2>;
    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2);

    fn body_count(&self) -> usize;
}

/// Build the backend selected by `settings`, with zero gravity.
pub fn create_backend(settings: &PhysicsSettings) -> Box<dyn PhysicsBackend> {
    match settings.backend {
        PhysicsBackendKind::Rapier => Box::new(RapierBackend::new(settings)),
        PhysicsBackendKind::Space => Box::new(SpaceBackend::new(settings)),
    }
}

/// Order contacts by (phase, low handle, high handle) so event sequences do
/// not depend on backend iteration order.
pub(crate) fn sort_contacts(contacts: &mut [ContactEvent]) {
    contacts.sort_by_key(|c| {
        let phase = match c.phase {
            ContactPhase::Begin => 0u8,
            ContactPhase::End => 1u8,
        };
        (phase, c.first.min(c.second), c.first.max(c.second))
    });
}
