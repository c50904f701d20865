//! Rapier-backed dynamic world.
//!
//! Owns every Rapier set and pipeline needed to simulate the boxes and exposes the small
//! surface the session needs: step, create/remove bodies, read/write velocity, apply
//! impulses.
//!
//! Handle discipline
//! - A handle passed to `remove_body` must not be used again. The registry guarantees this;
//!   the getters return `None` and the setters do nothing for stale handles instead of
//!   panicking.

use rapier2d::prelude::*;

use crate::{
    contact::ContactBuffer,
    geometry::Vec2,
    rapier::{BodyDef, ColliderDef, body_from_def, collider_from_def},
};

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advance the world by `dt` seconds.
    ///
    /// Every contact that starts during this step is pushed to `contacts` before this
    /// function returns.
    pub fn step(&mut self, dt: f32, contacts: &ContactBuffer) {
        self.integration_parameters.dt = dt;

        let hooks = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            contacts,
        );
    }

    /// Insert a body with a single attached collider.
    pub fn create_body(&mut self, body: &BodyDef, collider: &ColliderDef) -> RigidBodyHandle {
        let handle = self.bodies.insert(body_from_def(body));
        self.colliders
            .insert_with_parent(collider_from_def(collider), handle, &mut self.bodies);

        // Make the mass available right away so an impulse applied before the next step
        // is not lost.
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }
        handle
    }

    /// Remove a body together with its colliders. Returns `false` for a stale handle.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|rb| *rb.translation())
    }

    /// Rotation in radians.
    pub fn angle(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|rb| rb.rotation().angle())
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|rb| *rb.linvel())
    }

    pub fn mass(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|rb| rb.mass())
    }

    pub fn set_linvel(&mut self, handle: RigidBodyHandle, linvel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(linvel, true);
        }
    }

    /// Apply an instantaneous impulse (N·s) through the center of mass.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.apply_impulse(impulse, true);
        }
    }

    /// Bodies currently alive, including static ones.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}
