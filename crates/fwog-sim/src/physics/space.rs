//! Space backend: semi-implicit Euler integration with positional overlap
//! resolution between axis-aligned boxes.
//!
//! Each step: damp and integrate velocities, push overlapping accepted pairs
//! apart (leaving `collision_slop` of penetration) for `position_iterations`
//! passes, then diff the set of touching pairs against the previous step to
//! report contact begin/end.

use std::collections::BTreeSet;

use glam::Vec2;

use fwog_core::enums::ContactPhase;
use fwog_core::types::{BodyHandle, CollisionCategory};

use super::{sort_contacts, BodyDesc, ContactEvent, PhysicsBackend, PhysicsSettings};

#[derive(Debug, Clone)]
struct SpaceBody {
    handle: BodyHandle,
    position: Vec2,
    velocity: Vec2,
    half_extent: f32,
    inverse_mass: f32,
    category: CollisionCategory,
    mask: CollisionCategory,
}

impl SpaceBody {
    fn accepts(&self, other: &SpaceBody) -> bool {
        self.category
            .accepts(self.mask, other.category, other.mask)
    }

    /// Minimum translation axis and depth if the boxes overlap.
    fn penetration(&self, other: &SpaceBody) -> Option<(Vec2, f32)> {
        let delta = other.position - self.position;
        let reach = self.half_extent + other.half_extent;
        let overlap_x = reach - delta.x.abs();
        let overlap_y = reach - delta.y.abs();
        if overlap_x <= 0.0 || overlap_y <= 0.0 {
            return None;
        }
        if overlap_x < overlap_y {
            let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
            Some((Vec2::new(sign, 0.0), overlap_x))
        } else {
            let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
            Some((Vec2::new(0.0, sign), overlap_y))
        }
    }
}

pub struct SpaceBackend {
    /// Sorted by handle; handles are issued in increasing order.
    bodies: Vec<SpaceBody>,
    next_handle: u32,
    damping: f32,
    collision_slop: f32,
    position_iterations: usize,
    touching: BTreeSet<(BodyHandle, BodyHandle)>,
}

impl SpaceBackend {
    pub fn new(settings: &PhysicsSettings) -> Self {
        Self {
            bodies: Vec::new(),
            next_handle: 0,
            damping: settings.damping.clamp(0.0, 1.0),
            collision_slop: settings.collision_slop.max(0.0),
            position_iterations: settings.position_iterations,
            touching: BTreeSet::new(),
        }
    }

    fn index(&self, handle: BodyHandle) -> Option<usize> {
        self.bodies.binary_search_by_key(&handle, |b| b.handle).ok()
    }

    fn resolve_overlaps(&mut self) {
        let slop = self.collision_slop;
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (left, right) = self.bodies.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                if !a.accepts(b) {
                    continue;
                }
                let Some((normal, depth)) = a.penetration(b) else {
                    continue;
                };
                let correction = depth - slop;
                let total_inverse_mass = a.inverse_mass + b.inverse_mass;
                if correction <= 0.0 || total_inverse_mass <= 0.0 {
                    continue;
                }
                let push = normal * (correction / total_inverse_mass);
                a.position -= push * a.inverse_mass;
                b.position += push * b.inverse_mass;
            }
        }
    }

    fn touching_pairs(&self) -> BTreeSet<(BodyHandle, BodyHandle)> {
        let mut pairs = BTreeSet::new();
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                if a.accepts(b) && a.penetration(b).is_some() {
                    pairs.insert((a.handle, b.handle));
                }
            }
        }
        pairs
    }
}

impl PhysicsBackend for SpaceBackend {
    fn name(&self) -> &'static str {
        "space"
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;

        let side = desc.half_extent * 2.0;
        let mass = desc.mass * side * side;
        self.bodies.push(SpaceBody {
            handle,
            position: desc.position,
            velocity: Vec2::ZERO,
            half_extent: desc.half_extent,
            inverse_mass: if mass > 0.0 { 1.0 / mass } else { 0.0 },
            category: desc.category,
            mask: desc.mask,
        });
        handle
    }

    fn destroy_body(&mut self, handle: BodyHandle) -> bool {
        let Some(index) = self.index(handle) else {
            return false;
        };
        self.bodies.remove(index);
        self.touching.retain(|(a, b)| *a != handle && *b != handle);
        true
    }

    fn step(&mut self, dt: f32, contacts: &mut Vec<ContactEvent>) {
        let retained = self.damping.powf(dt);
        for body in &mut self.bodies {
            body.velocity *= retained;
            body.position += body.velocity * dt;
        }

        for _ in 0..self.position_iterations {
            self.resolve_overlaps();
        }

        let touching = self.touching_pairs();
        let start = contacts.len();
        for &(first, second) in touching.difference(&self.touching) {
            contacts.push(ContactEvent {
                phase: ContactPhase::Begin,
                first,
                second,
            });
        }
        for &(first, second) in self.touching.difference(&touching) {
            contacts.push(ContactEvent {
                phase: ContactPhase::End,
                first,
                second,
            });
        }
        sort_contacts(&mut contacts[start..]);
        self.touching = touching;
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.index(handle).map(|i| self.bodies[i].position)
    }

    fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(i) = self.index(handle) {
            self.bodies[i].position = position;
        }
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.index(handle).map(|i| self.bodies[i].velocity)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(i) = self.index(handle) {
            self.bodies[i].velocity = velocity;
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
