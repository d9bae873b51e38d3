//! Tests for world setup, the physics step, steering, input, and collision events.

use approx::assert_abs_diff_eq;
use glam::Vec2;

use fwog_core::components::{Enemy, PhysicsBody, Player, Position, Tint};
use fwog_core::constants::{DT, ENEMY_COLOR, PLAYER_COLOR};
use fwog_core::enums::*;
use fwog_core::input::DirectionalKeys;
use fwog_core::types::BodyHandle;

use crate::clock::FixedTimestep;
use crate::engine::{GameWorld, SimConfig};
use crate::error::SimError;
use crate::physics::{BodyDesc, BodyLinks, ContactEvent, PhysicsBackend, PhysicsSettings};
use crate::systems;
use crate::world_setup::{self, SpawnContext};

const BACKENDS: [PhysicsBackendKind; 2] = [PhysicsBackendKind::Rapier, PhysicsBackendKind::Space];

fn config_with(backend: PhysicsBackendKind, enemy_count: usize) -> SimConfig {
    SimConfig {
        enemy_count,
        physics: PhysicsSettings {
            backend,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A world with only the player at the origin.
fn lone_player(backend: PhysicsBackendKind) -> GameWorld {
    let mut world = GameWorld::new(config_with(backend, 0));
    world.initialize();
    world
}

fn body_of(world: &GameWorld, entity: hecs::Entity) -> PhysicsBody {
    *world.world().get::<&PhysicsBody>(entity).unwrap()
}

fn position_of(world: &GameWorld, entity: hecs::Entity) -> Vec2 {
    world.world().get::<&Position>(entity).unwrap().0
}

fn player_body_position(world: &GameWorld) -> Vec2 {
    let handle = body_of(world, world.player().unwrap()).handle;
    world.physics().position(handle).unwrap()
}

// ---- World setup ----

#[test]
fn test_initialize_spawns_player_and_enemies() {
    for backend in BACKENDS {
        let mut world = GameWorld::new(config_with(backend, 25));
        world.initialize();

        assert_eq!(world.player_count(), 1);
        assert_eq!(world.enemy_count(), 25);
        assert_eq!(world.body_count(), 26);
        assert_eq!(player_body_position(&world), Vec2::ZERO);
        assert_eq!(world.collision_handlers().len(), 2);
    }
}

#[test]
fn test_enemies_spawn_inside_region() {
    let mut world = GameWorld::new(config_with(PhysicsBackendKind::Space, 200));
    world.initialize();

    let config = world.config().clone();
    let max = config.spawn_min + config.spawn_extent;
    let mut query = world.world().query::<(&Position, &Enemy)>();
    for (_entity, (pos, enemy)) in query.iter() {
        assert!(pos.0.x >= config.spawn_min && pos.0.x < max, "x {}", pos.0.x);
        assert!(pos.0.y >= config.spawn_min && pos.0.y < max, "y {}", pos.0.y);
        assert_eq!(enemy.speed, config.enemy_speed);
    }
}

#[test]
fn test_colors_tag_roles() {
    let mut world = GameWorld::new(config_with(PhysicsBackendKind::Space, 3));
    world.initialize();

    let mut players = world.world().query::<(&Tint, &Player)>();
    for (_e, (tint, _)) in players.iter() {
        assert_eq!(tint.0, PLAYER_COLOR);
    }
    let mut enemies = world.world().query::<(&Tint, &Enemy)>();
    for (_e, (tint, _)) in enemies.iter() {
        assert_eq!(tint.0, ENEMY_COLOR);
    }
}

#[test]
fn test_every_body_links_back_to_its_entity() {
    let mut world = GameWorld::new(config_with(PhysicsBackendKind::Rapier, 10));
    world.initialize();

    let mut query = world.world().query::<&PhysicsBody>();
    let mut seen = 0;
    for (entity, body) in query.iter() {
        assert_eq!(world.entity_for_body(body.handle), Some(entity));
        assert!(world.physics().position(body.handle).is_some());
        seen += 1;
    }
    assert_eq!(seen, world.body_count());
}

#[test]
fn test_same_seed_same_level() {
    let positions = |seed: u64| {
        let mut world = GameWorld::new(SimConfig {
            seed,
            ..config_with(PhysicsBackendKind::Space, 20)
        });
        world.initialize();
        world
            .snapshot()
            .sprites
            .iter()
            .map(|s| s.position)
            .collect::<Vec<_>>()
    };
    assert_eq!(positions(7), positions(7));
    assert_ne!(positions(7), positions(8));
}

#[test]
fn test_shutdown_then_initialize_twice_leaks_nothing() {
    for backend in BACKENDS {
        let mut world = GameWorld::new(config_with(backend, 12));
        world.initialize();

        for _ in 0..2 {
            world.shutdown();
            assert_eq!(world.body_count(), 0);
            assert!(world.world().is_empty());
            assert!(!world.is_initialized());

            world.initialize();
            assert_eq!(world.player_count(), 1);
            assert_eq!(world.enemy_count(), 12);
            assert_eq!(world.body_count(), 13);
        }
    }
}

#[test]
fn test_shutdown_on_empty_world_is_safe() {
    let mut world = GameWorld::new(SimConfig::default());
    world.shutdown();
    world.shutdown();
    assert_eq!(world.body_count(), 0);
}

#[test]
fn test_initialize_on_populated_world_rebuilds() {
    let mut world = GameWorld::new(config_with(PhysicsBackendKind::Space, 5));
    world.initialize();
    world.initialize();
    assert_eq!(world.player_count(), 1);
    assert_eq!(world.body_count(), 6);
}

#[test]
fn test_second_player_rejected() {
    let mut world = lone_player(PhysicsBackendKind::Space);
    let existing = world.player().unwrap();
    assert_eq!(
        world.spawn_player_at(Vec2::new(5.0, 5.0)),
        Err(SimError::PlayerAlreadySpawned(existing))
    );
    assert_eq!(world.player_count(), 1);
}

// ---- Physics step & sync ----

#[test]
fn test_player_position_matches_body_after_step() {
    for backend in BACKENDS {
        let mut world = lone_player(backend);
        world.spawn_enemy_at(Vec2::new(300.0, -200.0));
        let player = world.player().unwrap();
        let handle = body_of(&world, player).handle;
        world.physics_mut().set_velocity(handle, Vec2::new(12.0, -7.5));

        world.step(DT).unwrap();

        let body_pos = world.physics().position(handle).unwrap();
        assert_eq!(position_of(&world, player), body_pos);
        assert_ne!(body_pos, Vec2::ZERO);
    }
}

#[test]
fn test_enemy_seek_scenario() {
    for backend in BACKENDS {
        let mut world = lone_player(backend);
        let enemy = world.spawn_enemy_at(Vec2::new(100.0, 100.0));

        world.step(1.0 / 60.0).unwrap();

        let handle = body_of(&world, enemy).handle;
        let velocity = world.physics().velocity(handle).unwrap();
        assert_abs_diff_eq!(velocity.x, -70.71, epsilon = 0.01);
        assert_abs_diff_eq!(velocity.y, -70.71, epsilon = 0.01);
    }
}

#[test]
fn test_enemy_velocity_points_at_player() {
    for backend in BACKENDS {
        let mut world = lone_player(backend);
        let player_handle = body_of(&world, world.player().unwrap()).handle;
        world
            .physics_mut()
            .set_position(player_handle, Vec2::new(-250.0, 40.0));
        let enemy = world.spawn_enemy_at(Vec2::new(500.0, 600.0));

        world.step(DT).unwrap();

        let p = world.physics().position(player_handle).unwrap();
        let enemy_handle = body_of(&world, enemy).handle;
        let e = world.physics().position(enemy_handle).unwrap();
        let v = world.physics().velocity(enemy_handle).unwrap();
        let expected = (p - e).normalize() * world.config().enemy_speed;

        assert_abs_diff_eq!(v.length(), world.config().enemy_speed, epsilon = 1e-2);
        assert_abs_diff_eq!(v.x, expected.x, epsilon = 1e-2);
        assert_abs_diff_eq!(v.y, expected.y, epsilon = 1e-2);
    }
}

/// Backend whose step only integrates velocity, with no contact response.
#[derive(Default)]
struct GhostBackend {
    bodies: Vec<(Vec2, Vec2)>,
}

impl PhysicsBackend for GhostBackend {
    fn name(&self) -> &'static str {
        "ghost"
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        self.bodies.push((desc.position, Vec2::ZERO));
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    fn destroy_body(&mut self, _handle: BodyHandle) -> bool {
        false
    }

    fn step(&mut self, dt: f32, _contacts: &mut Vec<ContactEvent>) {
        for (position, velocity) in &mut self.bodies {
            *position += *velocity * dt;
        }
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle.0 as usize).map(|b| b.0)
    }

    fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(b) = self.bodies.get_mut(handle.0 as usize) {
            b.0 = position;
        }
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle.0 as usize).map(|b| b.1)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.bodies.get_mut(handle.0 as usize) {
            b.1 = velocity;
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[test]
fn test_enemy_on_player_gets_zero_velocity() {
    let config = SimConfig::default();
    let mut world = hecs::World::new();
    let mut physics = GhostBackend::default();
    let mut links = BodyLinks::new();
    let mut ctx = SpawnContext {
        world: &mut world,
        physics: &mut physics,
        links: &mut links,
        config: &config,
    };
    let spot = Vec2::new(64.0, -32.0);
    world_setup::spawn_player(&mut ctx, spot);
    let enemy = world_setup::spawn_enemy(&mut ctx, spot);

    let mut contacts = Vec::new();
    systems::physics_sync::run(
        &mut world,
        &mut physics,
        &mut contacts,
        DT,
        InterpolationPolicy::Raw,
    )
    .unwrap();

    let handle = world.get::<&PhysicsBody>(enemy).unwrap().handle;
    let velocity = physics.velocity(handle).unwrap();
    assert_eq!(velocity, Vec2::ZERO);
    assert!(!velocity.is_nan());
    assert_eq!(world.get::<&Position>(enemy).unwrap().0, spot);
}

#[test]
fn test_raw_interpolation_uses_current_position() {
    let mut world = lone_player(PhysicsBackendKind::Space);
    let enemy = world.spawn_enemy_at(Vec2::new(600.0, 0.0));

    for _ in 0..3 {
        world.step(DT).unwrap();
    }

    let body = body_of(&world, enemy);
    assert_eq!(position_of(&world, enemy), body.current_position);
    assert!(body.current_position.x < body.previous_position.x);
}

#[test]
fn test_fixed_step_blend_lerps_by_step() {
    let mut world = GameWorld::new(SimConfig {
        interpolation: InterpolationPolicy::FixedStepBlend,
        ..config_with(PhysicsBackendKind::Space, 0)
    });
    world.initialize();
    let enemy = world.spawn_enemy_at(Vec2::new(600.0, 0.0));

    for _ in 0..3 {
        world.step(DT).unwrap();
    }

    let body = body_of(&world, enemy);
    let expected = body.previous_position.lerp(body.current_position, DT);
    let rendered = position_of(&world, enemy);
    assert_eq!(rendered, expected);
    // Constant blend sits near the previous sample, not the current one.
    assert!((rendered - body.previous_position).length() < (rendered - body.current_position).length());
}

#[test]
fn test_step_without_player_errors() {
    let mut world = GameWorld::new(SimConfig::default());
    assert_eq!(world.step(DT), Err(SimError::NoPlayer));
    assert_eq!(world.apply_input(DirectionalKeys::NONE), Err(SimError::NoPlayer));
}

#[test]
fn test_step_with_two_players_errors() {
    let mut world = lone_player(PhysicsBackendKind::Space);
    let extra = world.spawn_enemy_at(Vec2::new(400.0, 400.0));
    world.world_mut().insert_one(extra, Player).unwrap();
    assert_eq!(world.step(DT), Err(SimError::MultiplePlayers(2)));
}

#[test]
fn test_simulated_time_is_whole_steps() {
    let mut world = lone_player(PhysicsBackendKind::Space);
    let mut timestep = FixedTimestep::new(DT);

    // Ragged frame times; only whole steps reach the world.
    for frame in [0.005, 0.021, 0.013, 0.040, 0.002, 0.050] {
        timestep.accumulate(frame);
        while timestep.consume_step() {
            world.step(timestep.step()).unwrap();
        }
    }

    assert_eq!(world.time().tick, timestep.steps_taken());
    assert_abs_diff_eq!(
        world.time().elapsed_secs,
        timestep.steps_taken() as f64 * f64::from(DT),
        epsilon = 1e-9
    );
}

// ---- Input ----

#[test]
fn test_no_keys_leaves_player_in_place() {
    for mode in [InputMode::default(), InputMode::velocity()] {
        let mut world = GameWorld::new(SimConfig {
            input_mode: mode,
            ..config_with(PhysicsBackendKind::Rapier, 0)
        });
        world.initialize();
        let before = player_body_position(&world);
        world.apply_input(DirectionalKeys::NONE).unwrap();
        assert_eq!(player_body_position(&world), before);
    }
}

#[test]
fn test_teleport_moves_by_step() {
    let mut world = GameWorld::new(SimConfig {
        input_mode: InputMode::Teleport { step: 25.0 },
        ..config_with(PhysicsBackendKind::Space, 0)
    });
    world.initialize();

    world
        .apply_input(DirectionalKeys {
            right: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(player_body_position(&world), Vec2::new(25.0, 0.0));

    world
        .apply_input(DirectionalKeys {
            up: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(player_body_position(&world), Vec2::new(25.0, -25.0));
}

#[test]
fn test_teleport_diagonal_policies() {
    let diagonal = DirectionalKeys {
        down: true,
        right: true,
        ..Default::default()
    };

    let mut fast = GameWorld::new(SimConfig {
        diagonal: DiagonalPolicy::Unnormalized,
        ..config_with(PhysicsBackendKind::Space, 0)
    });
    fast.initialize();
    fast.apply_input(diagonal).unwrap();
    assert_eq!(player_body_position(&fast), Vec2::new(25.0, 25.0));

    let mut even = GameWorld::new(SimConfig {
        diagonal: DiagonalPolicy::Normalized,
        ..config_with(PhysicsBackendKind::Space, 0)
    });
    even.initialize();
    even.apply_input(diagonal).unwrap();
    assert_abs_diff_eq!(player_body_position(&even).length(), 25.0, epsilon = 1e-4);
}

#[test]
fn test_velocity_mode_sets_and_clears_velocity() {
    let mut world = GameWorld::new(SimConfig {
        input_mode: InputMode::Velocity { speed: 300.0 },
        diagonal: DiagonalPolicy::Normalized,
        ..config_with(PhysicsBackendKind::Space, 0)
    });
    world.initialize();
    let handle = body_of(&world, world.player().unwrap()).handle;

    world
        .apply_input(DirectionalKeys {
            up: true,
            left: true,
            ..Default::default()
        })
        .unwrap();
    let v = world.physics().velocity(handle).unwrap();
    assert_abs_diff_eq!(v.length(), 300.0, epsilon = 1e-3);
    assert!(v.x < 0.0 && v.y < 0.0);
    // Velocity mode goes through physics: position only changes on step.
    assert_eq!(player_body_position(&world), Vec2::ZERO);

    world.step(DT).unwrap();
    assert_ne!(player_body_position(&world), Vec2::ZERO);

    world.apply_input(DirectionalKeys::NONE).unwrap();
    assert_eq!(world.physics().velocity(handle), Some(Vec2::ZERO));
}

// ---- Collision events ----

#[test]
fn test_enemy_contacts_reach_event_queue() {
    for backend in BACKENDS {
        let mut world = lone_player(backend);
        let a = world.spawn_enemy_at(Vec2::new(400.0, 0.0));
        let b = world.spawn_enemy_at(Vec2::new(420.0, 0.0));

        world.step(DT).unwrap();
        let events = world.drain_collision_events();

        assert!(
            events.iter().any(|e| e.phase == ContactPhase::Begin
                && ((e.first == a && e.second == b) || (e.first == b && e.second == a))),
            "{backend:?} produced {events:?}"
        );
        assert!(world.drain_collision_events().is_empty());
    }
}

#[test]
fn test_player_enemy_contact_reported() {
    let mut world = lone_player(PhysicsBackendKind::Space);
    let player = world.player().unwrap();
    let enemy = world.spawn_enemy_at(Vec2::new(20.0, 0.0));

    world.step(DT).unwrap();
    let events = world.drain_collision_events();

    assert_eq!(events.len(), 1);
    let event = events[0];
    assert_eq!(event.phase, ContactPhase::Begin);
    let mut pair = [event.first, event.second];
    pair.sort();
    let mut expected = [player, enemy];
    expected.sort();
    assert_eq!(pair, expected);
}

#[test]
fn test_shutdown_clears_pending_events() {
    let mut world = lone_player(PhysicsBackendKind::Space);
    world.spawn_enemy_at(Vec2::new(10.0, 0.0));
    world.step(DT).unwrap();
    world.shutdown();
    assert!(world.drain_collision_events().is_empty());
}

// ---- Snapshot ----

#[test]
fn test_snapshot_has_one_sprite_per_entity() {
    let mut world = GameWorld::new(config_with(PhysicsBackendKind::Space, 40));
    world.initialize();
    world.step(DT).unwrap();

    let snapshot = world.snapshot();
    assert_eq!(snapshot.sprites.len(), 41);
    assert_eq!(snapshot.time.tick, 1);
    let greens = snapshot
        .sprites
        .iter()
        .filter(|s| s.color == PLAYER_COLOR.to_array())
        .count();
    assert_eq!(greens, 1);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(!json.is_empty());
}
