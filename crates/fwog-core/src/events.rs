//! Collision events emitted by the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::ContactPhase;
use crate::types::CollisionCategory;

/// Category pair a collision handler listens on. Order-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPair {
    pub first: CollisionCategory,
    pub second: CollisionCategory,
}

impl CategoryPair {
    pub fn new(first: CollisionCategory, second: CollisionCategory) -> Self {
        Self { first, second }
    }

    /// True if `a`/`b` (in either order) intersect this pair's categories.
    pub fn matches(&self, a: CollisionCategory, b: CollisionCategory) -> bool {
        (self.first.intersects(a) && self.second.intersects(b))
            || (self.first.intersects(b) && self.second.intersects(a))
    }
}

/// Serializable summary of collisions seen during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionTally {
    pub begin: u32,
    pub end: u32,
}

impl CollisionTally {
    pub fn record(&mut self, phase: ContactPhase) {
        match phase {
            ContactPhase::Begin => self.begin += 1,
            ContactPhase::End => self.end += 1,
        }
    }
}
