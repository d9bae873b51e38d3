//! Fundamental identifier and simulation types.

use serde::{Deserialize, Serialize};

/// Opaque handle to a body owned by a physics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

bitflags::bitflags! {
    /// Collision filter bits. A pair of bodies is tested for contact only if
    /// each one's category intersects the other's mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionCategory: u32 {
        const PLAYER = 1;
        const ENEMY = 2;
        const WALL = 4;
        const BULLET = 8;
    }
}

impl CollisionCategory {
    /// Mask for player bodies.
    pub fn player_mask() -> Self {
        Self::ENEMY | Self::WALL
    }

    /// Mask for enemy bodies.
    pub fn enemy_mask() -> Self {
        Self::ENEMY | Self::PLAYER | Self::WALL
    }

    /// Two-sided category/mask test.
    pub fn accepts(self, mask: Self, other: Self, other_mask: Self) -> bool {
        self.intersects(other_mask) && other.intersects(mask)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Physics steps taken since the world was initialized.
    pub tick: u64,
    /// Simulated seconds since the world was initialized.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
