//! Live set of simulated boxes.
//!
//! Keyed by [`EntityId`]. Ids grow monotonically, so map order is insertion order, and
//! removing one box never shifts the position of another: lookups stay valid while other
//! boxes come and go. Code that removes while walking the set takes an id snapshot first
//! (see [`BoxRegistry::ids`]).

use std::collections::BTreeMap;

use rapier2d::prelude::RigidBodyHandle;

use crate::{config::Material, entity::EntityId, geometry::Vec2};

/// One box: a physics body paired with the visual that mirrors it.
#[derive(Debug)]
pub struct BoxEntity<V> {
    pub id: EntityId,
    /// Rapier body (with its single collider). Released when the box is despawned.
    pub body: RigidBodyHandle,
    /// Full width and height in meters. Never changes; splitting makes new boxes.
    pub size: Vec2,
    pub material: Material,
    pub visual: V,
}

#[derive(Debug)]
pub struct BoxRegistry<V> {
    boxes: BTreeMap<EntityId, BoxEntity<V>>,
}

impl<V> Default for BoxRegistry<V> {
    fn default() -> Self {
        Self {
            boxes: BTreeMap::new(),
        }
    }
}

impl<V> BoxRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box. Ids are unique per session, so an existing entry is a caller bug.
    pub fn insert(&mut self, entity: BoxEntity<V>) {
        let replaced = self.boxes.insert(entity.id, entity);
        debug_assert!(replaced.is_none(), "box id registered twice");
    }

    pub fn get(&self, id: EntityId) -> Option<&BoxEntity<V>> {
        self.boxes.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.boxes.contains_key(&id)
    }

    /// Take a box out of the live set. The caller now owns its body and visual and must
    /// release both.
    pub fn remove(&mut self, id: EntityId) -> Option<BoxEntity<V>> {
        self.boxes.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Boxes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BoxEntity<V>> {
        self.boxes.values()
    }

    /// Snapshot of the live ids in insertion order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.boxes.keys().copied().collect()
    }
}
