//! Game world: the context object the frame loop threads through every call.
//!
//! `GameWorld` owns the hecs ECS world, the physics backend, and the body
//! link table. It builds and tears down the level, applies input, steps
//! physics, and produces `RenderSnapshot`s. Completely headless, so it can be
//! driven deterministically from tests.

use std::mem;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use fwog_core::components::{Enemy, Player};
use fwog_core::constants::*;
use fwog_core::enums::{DiagonalPolicy, InputMode, InterpolationPolicy};
use fwog_core::input::DirectionalKeys;
use fwog_core::state::RenderSnapshot;
use fwog_core::types::{BodyHandle, CollisionCategory, SimTime};

use crate::error::SimError;
use crate::physics::{self, BodyLinks, ContactEvent, PhysicsBackend, PhysicsSettings};
use crate::systems;
use crate::systems::collision::{CollisionEvent, CollisionHandlers};
use crate::world_setup::{self, SpawnContext};

/// Configuration for building a world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for enemy placement. Same seed = same level.
    pub seed: u64,
    pub enemy_count: usize,
    pub enemy_speed: f32,
    pub spawn_min: f32,
    pub spawn_extent: f32,
    pub body_size: f32,
    pub player_mass: f32,
    pub enemy_mass: f32,
    pub physics: PhysicsSettings,
    pub interpolation: InterpolationPolicy,
    pub diagonal: DiagonalPolicy,
    pub input_mode: InputMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            enemy_count: ENEMY_COUNT,
            enemy_speed: ENEMY_SPEED,
            spawn_min: SPAWN_MIN,
            spawn_extent: SPAWN_EXTENT,
            body_size: BODY_SIZE,
            player_mass: PLAYER_MASS,
            enemy_mass: ENEMY_MASS,
            physics: PhysicsSettings::default(),
            interpolation: InterpolationPolicy::default(),
            diagonal: DiagonalPolicy::default(),
            input_mode: InputMode::default(),
        }
    }
}

pub struct GameWorld {
    world: World,
    physics: Box<dyn PhysicsBackend>,
    config: SimConfig,
    rng: ChaCha8Rng,
    time: SimTime,
    player: Option<Entity>,
    links: BodyLinks,
    handlers: CollisionHandlers,
    contacts: Vec<ContactEvent>,
    collision_events: Vec<CollisionEvent>,
}

impl GameWorld {
    /// Create an empty world. Call [`GameWorld::initialize`] to build the level.
    pub fn new(config: SimConfig) -> Self {
        let physics = physics::create_backend(&config.physics);
        Self {
            world: World::new(),
            physics,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            player: None,
            links: BodyLinks::new(),
            handlers: CollisionHandlers::default(),
            contacts: Vec::new(),
            collision_events: Vec::new(),
        }
    }

    /// Build the level: collision handlers, the player at the origin, and
    /// `enemy_count` enemies at seeded random positions.
    ///
    /// A populated world is torn down first.
    pub fn initialize(&mut self) {
        if self.is_initialized() || !self.links.is_empty() {
            log::warn!("initialize called on a populated world; shutting it down first");
            self.shutdown();
        }

        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.time = SimTime::default();

        self.handlers
            .register(CollisionCategory::PLAYER, CollisionCategory::ENEMY);
        self.handlers
            .register(CollisionCategory::ENEMY, CollisionCategory::ENEMY);

        let mut ctx = SpawnContext {
            world: &mut self.world,
            physics: self.physics.as_mut(),
            links: &mut self.links,
            config: &self.config,
        };
        let player = world_setup::spawn_player(&mut ctx, Vec2::ZERO);
        world_setup::spawn_enemy_wave(&mut ctx, &mut self.rng, self.config.enemy_count);
        self.player = Some(player);

        log::info!(
            "world initialized on {} backend: 1 player, {} enemies",
            self.physics.name(),
            self.config.enemy_count
        );
    }

    /// Destroy every tracked body, then clear the entity store.
    ///
    /// Safe to call on an empty world and idempotent.
    pub fn shutdown(&mut self) {
        let bodies = self.links.len();
        for (handle, link) in self.links.drain() {
            if !self.physics.destroy_body(handle) {
                log::warn!("body {handle:?} of {:?} was already gone", link.entity);
            }
        }
        self.world.clear();
        self.handlers.clear();
        self.contacts.clear();
        self.collision_events.clear();
        self.player = None;
        if bodies > 0 {
            log::info!("world shut down, {bodies} bodies destroyed");
        }
    }

    /// Spawn the player at `position`. Fails if a player already exists.
    pub fn spawn_player_at(&mut self, position: Vec2) -> Result<Entity, SimError> {
        if let Some(existing) = self.player {
            return Err(SimError::PlayerAlreadySpawned(existing));
        }
        let mut ctx = self.spawn_context();
        let player = world_setup::spawn_player(&mut ctx, position);
        self.player = Some(player);
        Ok(player)
    }

    /// Spawn one enemy at `position`.
    pub fn spawn_enemy_at(&mut self, position: Vec2) -> Entity {
        let mut ctx = self.spawn_context();
        world_setup::spawn_enemy(&mut ctx, position)
    }

    /// Apply one rendered frame's worth of input to the player body.
    pub fn apply_input(&mut self, keys: DirectionalKeys) -> Result<(), SimError> {
        let player = self.player.ok_or(SimError::NoPlayer)?;
        systems::input::run(
            &self.world,
            self.physics.as_mut(),
            player,
            keys,
            self.config.diagonal,
            self.config.input_mode,
        )
    }

    /// Advance the simulation by exactly one physics step of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> Result<(), SimError> {
        systems::physics_sync::run(
            &mut self.world,
            self.physics.as_mut(),
            &mut self.contacts,
            dt,
            self.config.interpolation,
        )?;
        systems::collision::run(
            &mut self.contacts,
            &self.links,
            &self.handlers,
            &mut self.collision_events,
        );
        self.time.advance(dt);
        Ok(())
    }

    /// Current component state as (position, color) sprites.
    pub fn snapshot(&self) -> RenderSnapshot {
        systems::snapshot::build_snapshot(&self.world, self.time)
    }

    /// Take the collision events queued since the last drain.
    pub fn drain_collision_events(&mut self) -> Vec<CollisionEvent> {
        mem::take(&mut self.collision_events)
    }

    pub fn is_initialized(&self) -> bool {
        self.player.is_some()
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn entity_for_body(&self, handle: BodyHandle) -> Option<Entity> {
        self.links.get(&handle).map(|link| link.entity)
    }

    pub fn body_count(&self) -> usize {
        self.physics.body_count()
    }

    pub fn player_count(&self) -> usize {
        self.world.query::<&Player>().iter().count()
    }

    pub fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn collision_handlers(&self) -> &CollisionHandlers {
        &self.handlers
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn physics(&self) -> &dyn PhysicsBackend {
        self.physics.as_ref()
    }

    pub fn physics_mut(&mut self) -> &mut dyn PhysicsBackend {
        self.physics.as_mut()
    }

    /// Mutable ECS access for tests that need to break invariants on purpose.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn spawn_context(&mut self) -> SpawnContext<'_> {
        SpawnContext {
            world: &mut self.world,
            physics: self.physics.as_mut(),
            links: &mut self.links,
            config: &self.config,
        }
    }
}
