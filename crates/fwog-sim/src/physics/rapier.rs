//! rapier2d rigid-body backend.
//!
//! Full velocity/position solver. Bodies are dynamic boxes with locked
//! rotation; contact filtering uses rapier interaction groups built from the
//! collision category/mask bits.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use fwog_core::enums::ContactPhase;
use fwog_core::types::BodyHandle;

use super::{sort_contacts, BodyDesc, ContactEvent, PhysicsBackend, PhysicsSettings};

pub struct RapierBackend {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    next_handle: u32,
    bodies: HashMap<BodyHandle, RigidBodyHandle>,
    collider_to_body: HashMap<ColliderHandle, BodyHandle>,
}

impl RapierBackend {
    pub fn new(settings: &PhysicsSettings) -> Self {
        let mut integration_params = IntegrationParameters::default();
        integration_params.num_solver_iterations =
            NonZeroUsize::new(settings.velocity_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![0.0, 0.0],
            integration_params,
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            next_handle: 0,
            bodies: HashMap::new(),
            collider_to_body: HashMap::new(),
        }
    }

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies
            .get(&handle)
            .and_then(|rb| self.rigid_body_set.get(*rb))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let rb = *self.bodies.get(&handle)?;
        self.rigid_body_set.get_mut(rb)
    }
}

impl PhysicsBackend for RapierBackend {
    fn name(&self) -> &'static str {
        "rapier"
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let rb = RigidBodyBuilder::dynamic()
            .translation(vector![desc.position.x, desc.position.y])
            .lock_rotations()
            .can_sleep(false)
            .build();
        let rb_handle = self.rigid_body_set.insert(rb);

        let groups = InteractionGroups::new(
            Group::from_bits_truncate(desc.category.bits()),
            Group::from_bits_truncate(desc.mask.bits()),
        );
        let collider = ColliderBuilder::cuboid(desc.half_extent, desc.half_extent)
            .density(desc.mass)
            .friction(0.0)
            .restitution(0.0)
            .collision_groups(groups)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);

        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.insert(handle, rb_handle);
        self.collider_to_body.insert(collider_handle, handle);
        handle
    }

    fn destroy_body(&mut self, handle: BodyHandle) -> bool {
        let Some(rb_handle) = self.bodies.remove(&handle) else {
            return false;
        };
        self.rigid_body_set.remove(
            rb_handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        self.collider_to_body.retain(|_, body| *body != handle);
        true
    }

    fn step(&mut self, dt: f32, contacts: &mut Vec<ContactEvent>) {
        self.integration_params.dt = dt;

        let (collision_send, collision_recv) = rapier2d::crossbeam::channel::unbounded();
        let (force_send, _force_recv) = rapier2d::crossbeam::channel::unbounded();
        let event_handler = ChannelEventCollector::new(collision_send, force_send);

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &event_handler,
        );

        let start = contacts.len();
        while let Ok(event) = collision_recv.try_recv() {
            let (phase, h1, h2) = match event {
                CollisionEvent::Started(h1, h2, _) => (ContactPhase::Begin, h1, h2),
                CollisionEvent::Stopped(h1, h2, _) => (ContactPhase::End, h1, h2),
            };
            // Colliders of destroyed bodies are no longer mapped.
            if let (Some(&first), Some(&second)) =
                (self.collider_to_body.get(&h1), self.collider_to_body.get(&h2))
            {
                contacts.push(ContactEvent {
                    phase,
                    first,
                    second,
                });
            }
        }
        sort_contacts(&mut contacts[start..]);
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.body(handle).map(|rb| {
            let t = rb.translation();
            Vec2::new(t.x, t.y)
        })
    }

    fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(rb) = self.body_mut(handle) {
            rb.set_translation(vector![position.x, position.y], true);
        }
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.body(handle).map(|rb| {
            let v = rb.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(rb) = self.body_mut(handle) {
            rb.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }
}
