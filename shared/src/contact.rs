//! Contact event buffer.
//!
//! Rapier reports contacts from inside `PhysicsPipeline::step`, while bodies are still being
//! integrated. Creating or removing bodies there is off-limits, so the callback only records
//! who touched whom; the session drains the buffer after `step` returns and does the actual
//! work then.

use std::sync::{Mutex, PoisonError};

use rapier2d::prelude::{
    ColliderHandle, ColliderSet, CollisionEvent, ContactPair, EventHandler, Real, RigidBodySet,
};

use crate::entity::EntityId;

/// Two entities whose colliders started touching. Unordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: EntityId,
    pub b: EntityId,
}

impl ContactEvent {
    #[inline]
    pub fn new(a: EntityId, b: EntityId) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn involves(&self, id: EntityId) -> bool {
        self.a == id || self.b == id
    }

    /// Both participants, lowest id first. Box ids grow with creation order, so this is
    /// also the order in which the boxes were registered.
    #[inline]
    pub fn sides(&self) -> [EntityId; 2] {
        if self.a <= self.b {
            [self.a, self.b]
        } else {
            [self.b, self.a]
        }
    }
}

/// Pending contacts captured during the last `step`.
///
/// The `Mutex` exists because Rapier's `EventHandler` receives `&self` and must be
/// `Send + Sync`; in practice only the simulation thread ever touches it.
#[derive(Debug, Default)]
pub struct ContactBuffer {
    pending: Mutex<Vec<ContactEvent>>,
}

impl ContactBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, a: EntityId, b: EntityId) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ContactEvent::new(a, b));
    }

    /// Remove one pending contact. Order is not meaningful.
    pub fn pop(&mut self) -> Option<ContactEvent> {
        self.pending_mut().pop()
    }

    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything without processing it.
    pub fn clear(&mut self) {
        self.pending_mut().clear();
    }

    fn pending_mut(&mut self) -> &mut Vec<ContactEvent> {
        self.pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventHandler for ContactBuffer {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if !event.started() {
            return;
        }

        let owner = |handle: ColliderHandle| {
            colliders
                .get(handle)
                .and_then(|collider| EntityId::from_user_data(collider.user_data))
        };
        let (Some(a), Some(b)) = (owner(event.collider1()), owner(event.collider2())) else {
            log::warn!("contact between colliders without an owner: {event:?}");
            return;
        };

        log::trace!("contact started: {a} <-> {b}");
        self.push(a, b);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_pop_drains_everything() {
        let mut buffer = ContactBuffer::new();
        buffer.push(EntityId(1), EntityId(2));
        buffer.push(EntityId(3), EntityId::GROUND);
        assert_eq!(buffer.len(), 2);

        let mut seen = Vec::new();
        while let Some(contact) = buffer.pop() {
            seen.push(contact);
        }
        assert!(buffer.is_empty());
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&ContactEvent::new(EntityId(1), EntityId(2))));
        assert!(seen.contains(&ContactEvent::new(EntityId(3), EntityId::GROUND)));
    }

    #[test]
    fn sides_are_ordered_by_id() {
        let contact = ContactEvent::new(EntityId(8), EntityId(3));
        assert_eq!(contact.sides(), [EntityId(3), EntityId(8)]);
        assert!(contact.involves(EntityId(8)));
        assert!(!contact.involves(EntityId(4)));
    }

    #[test]
    fn clear_discards_pending() {
        let mut buffer = ContactBuffer::new();
        buffer.push(EntityId(1), EntityId(2));
        buffer.clear();
        assert_eq!(buffer.pop(), None);
    }
}
