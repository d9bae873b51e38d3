//! Entity spawn factories for setting up the level.
//!
//! Every spawn pairs one physics body with one component bundle and records
//! the body in the link table, so bodies and entities live and die together.

use glam::Vec2;
use hecs::{DynamicBundle, Entity, EntityBuilder, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use fwog_core::components::*;
use fwog_core::constants::{ENEMY_COLOR, PLAYER_COLOR};
use fwog_core::types::CollisionCategory;

use crate::engine::SimConfig;
use crate::physics::{BodyDesc, BodyLink, BodyLinks, PhysicsBackend};

/// Mutable state every spawn touches.
pub struct SpawnContext<'a> {
    pub world: &'a mut World,
    pub physics: &'a mut dyn PhysicsBackend,
    pub links: &'a mut BodyLinks,
    pub config: &'a SimConfig,
}

/// Spawn the player at `position`.
pub fn spawn_player(ctx: &mut SpawnContext<'_>, position: Vec2) -> Entity {
    let desc = BodyDesc {
        position,
        half_extent: ctx.config.body_size * 0.5,
        mass: ctx.config.player_mass,
        category: CollisionCategory::PLAYER,
        mask: CollisionCategory::player_mask(),
    };
    spawn_mobile(ctx, &desc, (Player, Tint(PLAYER_COLOR)))
}

/// Spawn one enemy at `position` with the configured seek speed.
pub fn spawn_enemy(ctx: &mut SpawnContext<'_>, position: Vec2) -> Entity {
    let desc = BodyDesc {
        position,
        half_extent: ctx.config.body_size * 0.5,
        mass: ctx.config.enemy_mass,
        category: CollisionCategory::ENEMY,
        mask: CollisionCategory::enemy_mask(),
    };
    let enemy = Enemy {
        speed: ctx.config.enemy_speed,
    };
    spawn_mobile(ctx, &desc, (enemy, Tint(ENEMY_COLOR)))
}

/// Spawn `count` enemies uniformly inside the configured spawn square.
pub fn spawn_enemy_wave(ctx: &mut SpawnContext<'_>, rng: &mut ChaCha8Rng, count: usize) {
    for _ in 0..count {
        let position = random_spawn_position(rng, ctx.config);
        spawn_enemy(ctx, position);
    }
}

/// Uniform point in `[spawn_min, spawn_min + spawn_extent)` on both axes.
pub fn random_spawn_position(rng: &mut ChaCha8Rng, config: &SimConfig) -> Vec2 {
    let extent = config.spawn_extent.max(f32::EPSILON);
    let x = config.spawn_min + rng.gen_range(0.0..extent);
    let y = config.spawn_min + rng.gen_range(0.0..extent);
    Vec2::new(x, y)
}

fn spawn_mobile(
    ctx: &mut SpawnContext<'_>,
    desc: &BodyDesc,
    role: impl DynamicBundle,
) -> Entity {
    let handle = ctx.physics.create_body(desc);
    let body = PhysicsBody {
        handle,
        previous_position: desc.position,
        current_position: desc.position,
    };
    let mut builder = EntityBuilder::new();
    builder
        .add(body)
        .add(Position(desc.position))
        .add_bundle(role);
    let entity = ctx.world.spawn(builder.build());
    ctx.links.insert(
        handle,
        BodyLink {
            entity,
            category: desc.category,
        },
    );
    entity
}
