//! Declarative body/collider definitions and their Rapier builders.
//!
//! Callers describe what they want (`BodyDef` + `ColliderDef`); only this module knows how
//! that maps onto Rapier builders.

// Re-export Rapier so the client can name handles and types without depending on
// `rapier2d` directly.
pub use rapier2d;

use rapier2d::prelude::*;

use crate::{config::Material, entity::EntityId, geometry::Vec2};

/// How a body participates in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Moved by gravity, impulses and contacts.
    Dynamic,
    /// Never moves (ground).
    Fixed,
}

/// Rigid-body parameters (meters).
#[derive(Clone, Copy, Debug)]
pub struct BodyDef {
    pub kind: BodyKind,
    /// World-space center.
    pub translation: Vec2,
    pub can_sleep: bool,
}

impl BodyDef {
    #[inline]
    pub fn dynamic(translation: Vec2, can_sleep: bool) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            translation,
            can_sleep,
        }
    }

    #[inline]
    pub fn fixed(translation: Vec2) -> Self {
        Self {
            kind: BodyKind::Fixed,
            translation,
            can_sleep: true,
        }
    }
}

/// Rectangular collider parameters (meters).
#[derive(Clone, Copy, Debug)]
pub struct ColliderDef {
    pub half_extents: Vec2,
    pub material: Material,
    /// Written to the collider user data so contacts can be traced back to an entity.
    pub owner: EntityId,
    /// Emit start/stop collision events for this collider.
    pub report_contacts: bool,
}

impl ColliderDef {
    /// Axis-aligned box of full size `size` that reports its contacts.
    #[inline]
    pub fn cuboid(size: Vec2, material: Material, owner: EntityId) -> Self {
        Self {
            half_extents: size * 0.5,
            material,
            owner,
            report_contacts: true,
        }
    }
}

pub fn body_from_def(def: &BodyDef) -> RigidBody {
    let builder = match def.kind {
        BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        BodyKind::Fixed => RigidBodyBuilder::fixed(),
    };
    builder
        .translation(def.translation)
        .can_sleep(def.can_sleep)
        .build()
}

pub fn collider_from_def(def: &ColliderDef) -> Collider {
    let events = if def.report_contacts {
        ActiveEvents::COLLISION_EVENTS
    } else {
        ActiveEvents::empty()
    };
    ColliderBuilder::cuboid(def.half_extents.x, def.half_extents.y)
        .density(def.material.density)
        .friction(def.material.friction)
        .restitution(def.material.restitution)
        .active_events(events)
        .user_data(def.owner.to_user_data())
        .build()
}
