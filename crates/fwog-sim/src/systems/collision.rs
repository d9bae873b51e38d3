//! Collision event queue.
//!
//! Backends report contacts during the step; this system drains them once per
//! step, resolves handles to entities through the body links, and dispatches
//! to the handlers registered for the contact's category pair. Handlers only
//! log; contacts are always left to the backend to resolve.

use hecs::Entity;

use fwog_core::enums::ContactPhase;
use fwog_core::events::CategoryPair;
use fwog_core::types::CollisionCategory;

use crate::physics::{BodyLinks, ContactEvent};

/// A contact between two entities, in gameplay terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub phase: ContactPhase,
    pub first: Entity,
    pub second: Entity,
    pub first_category: CollisionCategory,
    pub second_category: CollisionCategory,
}

/// Category pairs with a registered begin/end handler.
#[derive(Debug, Clone, Default)]
pub struct CollisionHandlers {
    pairs: Vec<CategoryPair>,
}

impl CollisionHandlers {
    pub fn register(&mut self, first: CollisionCategory, second: CollisionCategory) {
        let pair = CategoryPair::new(first, second);
        if !self.pairs.contains(&pair) {
            self.pairs.push(pair);
        }
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn is_registered(&self, a: CollisionCategory, b: CollisionCategory) -> bool {
        self.pairs.iter().any(|pair| pair.matches(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn dispatch(&self, event: &CollisionEvent) {
        log::trace!(
            "contact {:?}: {:?} ({:?}) <-> {:?} ({:?})",
            event.phase,
            event.first,
            event.first_category,
            event.second,
            event.second_category
        );
    }
}

/// Drain `contacts`, forwarding events for registered pairs into `out`.
pub fn run(
    contacts: &mut Vec<ContactEvent>,
    links: &BodyLinks,
    handlers: &CollisionHandlers,
    out: &mut Vec<CollisionEvent>,
) {
    for contact in contacts.drain(..) {
        let (Some(first), Some(second)) = (links.get(&contact.first), links.get(&contact.second))
        else {
            log::warn!(
                "dropping contact between unlinked bodies {:?} and {:?}",
                contact.first,
                contact.second
            );
            continue;
        };
        if !handlers.is_registered(first.category, second.category) {
            continue;
        }
        let event = CollisionEvent {
            phase: contact.phase,
            first: first.entity,
            second: second.entity,
            first_category: first.category,
            second_category: second.category,
        };
        handlers.dispatch(&event);
        out.push(event);
    }
}
