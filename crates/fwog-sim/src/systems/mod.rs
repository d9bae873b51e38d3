//! ECS systems that operate on the simulation world.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only) plus whatever physics state they touch. They do not own state.

pub mod collision;
pub mod input;
pub mod physics_sync;
pub mod snapshot;
pub mod steering;
